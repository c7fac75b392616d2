//! Snowdrift - An endless downhill chase
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, power-ups, pursuer)
//! - `session`: Host-facing wrapper owning the RNG, tuning and best-run store
//! - `platform`: Fixed-step scheduling and browser storage
//! - `persistence`: Key-value stores for the best run
//! - `tuning`: Data-driven game balance

pub mod demo;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::BestRun;
pub use session::Session;
pub use tuning::Tuning;

use glam::Vec2;

/// World geometry constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, all per-tick constants assume it)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Visible window (logical units)
    pub const WORLD_WIDTH: f32 = 640.0;
    pub const WORLD_HEIGHT: f32 = 480.0;

    /// Player sits at a fixed screen row; the world scrolls past it
    pub const PLAYER_Y: f32 = 150.0;
    /// Horizontal clamp margin for the player
    pub const PLAYER_MARGIN: f32 = 20.0;
    /// Player hit-box (centred horizontally, offset up from the feet)
    pub const PLAYER_HITBOX_W: f32 = 20.0;
    pub const PLAYER_HITBOX_H: f32 = 30.0;
    pub const PLAYER_HITBOX_OFFSET_Y: f32 = 20.0;
    /// Above this jump height only Jump obstacles register
    pub const AIRBORNE_GATE: f32 = 20.0;

    /// Entities spawn this far below the window
    pub const SPAWN_OFFSET: f32 = 50.0;
    /// Obstacles and pickups are culled once above this y
    pub const CULL_Y: f32 = -50.0;
    /// Horizontal inset for new obstacles / pickups
    pub const OBSTACLE_INSET: f32 = 20.0;
    pub const PICKUP_INSET: f32 = 30.0;
    /// Obstacles on the slope at the start of a run
    pub const INITIAL_OBSTACLES: usize = 10;

    pub const PICKUP_RADIUS: f32 = 15.0;
    /// Added to the pickup radius for collection
    pub const PICKUP_REACH: f32 = 15.0;

    pub const CAPTURE_RADIUS: f32 = 40.0;
    pub const PROJECTILE_PURSUER_RADIUS: f32 = 50.0;
    pub const PROJECTILE_OBSTACLE_RADIUS: f32 = 25.0;
    pub const EXPLOSION_RADIUS: f32 = 80.0;
    /// Projectiles survive this far outside the window
    pub const PROJECTILE_BOUNDS_MARGIN: f32 = 80.0;

    /// Pursuer spawn depth below the window and escape height above it
    pub const PURSUER_SPAWN_OFFSET: f32 = 100.0;
    pub const PURSUER_ESCAPE_Y: f32 = -350.0;
    /// Parked position while dormant
    pub const PURSUER_PARKED_Y: f32 = -200.0;

    /// Best-run marker placement
    pub const MARKER_LEAD: f32 = 250.0;
    pub const MARKER_SPAWN_OFFSET: f32 = 60.0;
    pub const MARKER_CULL_Y: f32 = -80.0;
}

/// Unit vector from `from` toward `to`, or `fallback` when they coincide
#[inline]
pub fn direction_or(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(fallback)
}

/// Replace NaN/inf with zero so clamps downstream stay meaningful
#[inline]
pub fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}
