//! Snowdrift headless runner
//!
//! Plays autopilot runs against the simulation and reports how they ended.
//! Usage: `snowdrift [seed] [runs]`. `SNOWDRIFT_SAVE` names a best-run file.

#[cfg(not(target_arch = "wasm32"))]
use snowdrift::{
    Session, Tuning,
    demo::autopilot,
    persistence::{FileStore, KeyValueStore, MemoryStore},
    platform::FixedStepper,
    sim::GameEvent,
};

/// Give up on a run after ten simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const MAX_RUN_TICKS: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snowdrift (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);
    let runs = args.next().and_then(|s| s.parse().ok()).unwrap_or(3u32);
    let tuning = Tuning::load();

    match std::env::var("SNOWDRIFT_SAVE") {
        Ok(path) => run_demo(Session::new(seed, tuning, FileStore::new(path)), runs),
        Err(_) => run_demo(Session::new(seed, tuning, MemoryStore::new()), runs),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_demo<S: KeyValueStore>(mut session: Session<S>, runs: u32) {
    let mut stepper = FixedStepper::new();
    let frame_dt = snowdrift::consts::SIM_DT;

    for run in 1..=runs {
        let mut pursuer_seen = false;
        while !session.state().mode.is_terminal() && session.state().time_ticks < MAX_RUN_TICKS {
            for _ in 0..stepper.advance(frame_dt) {
                let input = autopilot(session.state());
                let events = session.tick(&input);
                pursuer_seen |= events
                    .iter()
                    .any(|e| matches!(e, GameEvent::PursuerActivated { .. }));
            }
        }

        let state = session.state();
        println!(
            "run {}: {:?} at {:.0} after {} ticks{}",
            run,
            state.mode,
            state.distance,
            state.time_ticks,
            if pursuer_seen { " (chased)" } else { "" }
        );
        session.reset();
    }

    println!("best: {} (seed {})", session.best().distance, session.seed());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    snowdrift::platform::init_web_logging();
    // Browser hosts drive `snowdrift::Session` from their own frame loop
    log::info!("Snowdrift (web) ready");
}
