//! Host-facing run wrapper
//!
//! Owns the simulation, its seeded RNG and the best-run store so hosts only
//! feed inputs and read snapshots.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscores::BestRun;
use crate::persistence::KeyValueStore;
use crate::sim::{GameEvent, SimulationState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<S: KeyValueStore> {
    state: SimulationState,
    rng: Pcg32,
    seed: u64,
    store: S,
    best: BestRun,
}

impl<S: KeyValueStore> Session<S> {
    /// Tuning that fails `Tuning::validate` is replaced by the defaults
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning: {}", e);
                Tuning::default()
            }
        };
        let best = BestRun::load(&store);
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = SimulationState::new(tuning, best.clone(), &mut rng);
        log::info!("New session (seed {}, best {})", seed, best.distance);
        Self {
            state,
            rng,
            seed,
            store,
            best,
        }
    }

    /// Advance one tick and return the events it produced
    pub fn tick(&mut self, input: &TickInput) -> &[GameEvent] {
        tick(&mut self.state, input, &mut self.rng);
        let ended = self
            .state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Crashed { .. } | GameEvent::Caught { .. }));
        if ended {
            self.record_run();
        }
        &self.state.events
    }

    /// Start a new run. The RNG stream continues, so a whole session replays
    /// from its seed.
    pub fn reset(&mut self) {
        self.state.best = self.best.clone();
        self.state.reset(&mut self.rng);
        log::debug!("Run reset (best {})", self.best.distance);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn best(&self) -> &BestRun {
        &self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn record_run(&mut self) {
        if !self.best.record(self.state.distance, self.state.player.x) {
            return;
        }
        match self.best.save(&mut self.store) {
            Ok(()) => log::info!(
                "New best run: {} at x {}",
                self.best.distance,
                self.best.x
            ),
            Err(e) => log::warn!("Failed to save best run: {}", e),
        }
    }
}
