//! Simulation state and core entity types
//!
//! Everything a run needs lives in `SimulationState`, so a state can be
//! cloned or serialized and resumed deterministically.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::spawn;
use super::timer::Timer;
use crate::consts::*;
use crate::highscores::BestRun;
use crate::tuning::Tuning;

/// Top-level mode of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// On the snow, steering
    Playing,
    /// Airborne after a ramp or manual jump
    Jumping,
    /// Hit an obstacle (terminal until reset)
    Crashed,
    /// Grabbed by the pursuer (terminal until reset)
    Caught,
}

impl GameMode {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameMode::Crashed | GameMode::Caught)
    }
}

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max().x
            && self.max().x > other.min.x
            && self.min.y < other.max().y
            && self.max().y > other.min.y
    }
}

/// The skier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal position; vertical screen position is fixed at `PLAYER_Y`
    pub x: f32,
    /// Steering angle in [-max_angle, max_angle]
    pub angle: f32,
    pub speed: f32,
    pub jump_height: f32,
    pub jump_velocity: f32,
}

impl Player {
    pub fn new(base_speed: f32) -> Self {
        Self {
            x: WORLD_WIDTH / 2.0,
            angle: 0.0,
            speed: base_speed,
            jump_height: 0.0,
            jump_velocity: 0.0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, PLAYER_Y)
    }

    /// True while rising or falling
    pub fn is_airborne(&self) -> bool {
        self.jump_height > 0.0 || self.jump_velocity > 0.0
    }

    /// Hit-box around the feet
    pub fn hitbox(&self) -> Rect {
        Rect {
            min: Vec2::new(
                self.x - PLAYER_HITBOX_W / 2.0,
                PLAYER_Y - PLAYER_HITBOX_OFFSET_Y,
            ),
            size: Vec2::new(PLAYER_HITBOX_W, PLAYER_HITBOX_H),
        }
    }
}

/// Obstacle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree { snowy: bool },
    Rock,
    /// Launch ramp; never crashes the player
    Jump,
}

impl ObstacleKind {
    /// Collision box size
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Tree { .. } => Vec2::new(30.0, 40.0),
            ObstacleKind::Rock => Vec2::new(25.0, 20.0),
            ObstacleKind::Jump => Vec2::new(40.0, 10.0),
        }
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, ObstacleKind::Jump)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    /// Set by projectiles/explosions; removed on the next cull
    pub destroyed: bool,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.kind.size())
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Boost,
    Snowball,
    Shield,
    Freeze,
    Bomb,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 5] = [
        PowerupKind::Boost,
        PowerupKind::Snowball,
        PowerupKind::Shield,
        PowerupKind::Freeze,
        PowerupKind::Bomb,
    ];
}

/// A collectible on the slope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Cosmetic bob phase (radians)
    pub bob_phase: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Snowball,
    Bomb { fuse: u32 },
}

/// A thrown snowball or bomb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Drift with the world as it scrolls past
    pub scroll_compensated: bool,
}

/// Derived pursuer state for hosts and renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PursuerStatus {
    Dormant,
    Seeking,
    Frozen,
    Stunned,
    /// Outrun; waiting out the distance cooldown
    Retreating,
}

/// The chasing yeti
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub pos: Vec2,
    pub active: bool,
    pub speed: f32,
    pub frozen: Timer,
    pub stunned: Timer,
    /// Distance budget left before it may return
    pub retreat_cooldown: f32,
}

impl Pursuer {
    pub fn new(base_speed: f32) -> Self {
        Self {
            pos: Vec2::new(0.0, PURSUER_PARKED_Y),
            active: false,
            speed: base_speed,
            frozen: Timer::default(),
            stunned: Timer::default(),
            retreat_cooldown: 0.0,
        }
    }

    pub fn status(&self) -> PursuerStatus {
        if !self.active {
            if self.retreat_cooldown > 0.0 {
                PursuerStatus::Retreating
            } else {
                PursuerStatus::Dormant
            }
        } else if self.stunned.is_active() {
            PursuerStatus::Stunned
        } else if self.frozen.is_active() {
            PursuerStatus::Frozen
        } else {
            PursuerStatus::Seeking
        }
    }

    /// Neither frozen nor stunned
    pub fn is_vulnerable(&self) -> bool {
        self.active && !self.frozen.is_active() && !self.stunned.is_active()
    }
}

/// Timed power-up effects on the player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub boost: Timer,
    pub shield: Timer,
    /// World scroll halted
    pub freeze: Timer,
}

impl ActiveEffects {
    pub fn shielded(&self) -> bool {
        self.shield.is_active()
    }

    pub fn frozen(&self) -> bool {
        self.freeze.is_active()
    }
}

/// Where the previous best run ended, shown as the player approaches it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestMarker {
    pub pos: Vec2,
    pub distance: u32,
}

/// Notable things that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    JumpStarted,
    Landed,
    Crashed { distance: f32 },
    Caught { distance: f32 },
    PickupCollected(PowerupKind),
    PowerupActivated(PowerupKind),
    ObstacleDestroyed { id: u32 },
    BombExploded { pos: Vec2 },
    PursuerStunned { ticks: u32 },
    PursuerActivated { pos: Vec2 },
    PursuerRetreated,
    MarkerPlaced { distance: u32 },
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub tuning: Tuning,
    pub mode: GameMode,
    /// Ticks advanced this run
    pub time_ticks: u64,
    /// Cumulative distance travelled
    pub distance: f32,
    /// Obstacle density multiplier, recomputed each tick
    pub difficulty: f32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    pub projectiles: Vec<Projectile>,
    pub pursuer: Pursuer,
    /// Single power-up slot
    pub held: Option<PowerupKind>,
    pub effects: ActiveEffects,
    /// Best run at the start of this run (drives the marker)
    pub best: BestRun,
    pub marker: Option<BestMarker>,
    pub marker_placed: bool,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl SimulationState {
    /// Fresh run with the initial obstacle field
    pub fn new<R: Rng + ?Sized>(tuning: Tuning, best: BestRun, rng: &mut R) -> Self {
        let mut state = Self {
            tuning,
            mode: GameMode::Playing,
            time_ticks: 0,
            distance: 0.0,
            difficulty: tuning.difficulty_start,
            player: Player::new(tuning.base_speed),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            projectiles: Vec::new(),
            pursuer: Pursuer::new(tuning.pursuer_base_speed),
            held: None,
            effects: ActiveEffects::default(),
            best,
            marker: None,
            marker_placed: false,
            events: Vec::new(),
            next_id: 1,
        };
        spawn::populate_initial(&mut state, rng);
        state
    }

    /// Start over, keeping tuning and the best run
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::new(self.tuning, self.best.clone(), rng);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Enter a terminal mode, recording the outcome
    pub fn end_run(&mut self, mode: GameMode) {
        debug_assert!(mode.is_terminal());
        self.mode = mode;
        let event = match mode {
            GameMode::Caught => GameEvent::Caught {
                distance: self.distance,
            },
            _ => GameEvent::Crashed {
                distance: self.distance,
            },
        };
        log::debug!("{:?} at distance {:.0}", mode, self.distance);
        self.push_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_state_defaults() {
        let mut rng = Pcg32::seed_from_u64(1);
        let state = SimulationState::new(Tuning::default(), BestRun::default(), &mut rng);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.player.speed, 5.0);
        assert_eq!(state.player.x, WORLD_WIDTH / 2.0);
        assert_eq!(state.obstacles.len(), INITIAL_OBSTACLES);
        assert!(state.pickups.is_empty());
        assert_eq!(state.pursuer.status(), PursuerStatus::Dormant);
    }

    #[test]
    fn test_rect_overlap_is_strict() {
        let a = Rect::centered(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Rect::centered(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let inside = Rect::centered(Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn test_pursuer_status_priority() {
        let mut p = Pursuer::new(4.0);
        p.retreat_cooldown = 100.0;
        assert_eq!(p.status(), PursuerStatus::Retreating);
        p.active = true;
        p.frozen.start(5);
        p.stunned.start(5);
        assert_eq!(p.status(), PursuerStatus::Stunned);
        assert!(!p.is_vulnerable());
        p.stunned.clear();
        assert_eq!(p.status(), PursuerStatus::Frozen);
        p.frozen.clear();
        assert!(p.is_vulnerable());
    }
}
