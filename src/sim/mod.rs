//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seeded RNG only
//! - Stable iteration order (entities keep insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod player;
pub mod powerup;
pub mod pursuer;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;
pub mod world;

pub use difficulty::difficulty_factor;
pub use player::{Steering, Throttle};
pub use snapshot::Snapshot;
pub use state::{
    ActiveEffects, BestMarker, GameEvent, GameMode, Obstacle, ObstacleKind, Pickup, Player,
    PowerupKind, Projectile, ProjectileKind, Pursuer, PursuerStatus, Rect, SimulationState,
};
pub use tick::{TickInput, tick};
pub use timer::Timer;
