//! Data-driven game balance
//!
//! Every gameplay number the simulation reads per tick. Defaults reproduce
//! the shipped feel at 60 Hz; a JSON file can override any subset.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a JSON tuning file
pub const TUNING_ENV: &str = "SNOWDRIFT_TUNING";

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("inconsistent tuning: {0}")]
    Invalid(String),
}

/// Gameplay balance values (all rates are per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player speed ===
    /// Cruising speed the player relaxes toward
    pub base_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Added while accelerating or holding boost
    pub accel: f32,
    /// Removed while braking
    pub brake: f32,
    /// Relaxation toward base speed when above it
    pub relax_down: f32,
    /// Relaxation toward base speed when below it
    pub relax_up: f32,

    // === Steering ===
    pub max_angle: f32,
    /// Keyboard turn rate while a direction is held
    pub key_turn_rate: f32,
    /// Keyboard return-to-centre rate
    pub key_return_rate: f32,
    /// Angle snaps to zero inside this band
    pub key_snap_band: f32,
    /// Pointer steering: linear zone and divisor outside it
    pub pointer_dead_zone: f32,
    pub pointer_saturation: f32,
    /// Drag steering divisor
    pub drag_scale: f32,
    /// Horizontal motion and distance both use speed * this
    pub travel_factor: f32,

    // === Jumping ===
    pub jump_launch_velocity: f32,
    pub jump_gravity: f32,

    // === Spawning ===
    pub tree_spawn_rate: f32,
    pub rock_spawn_rate: f32,
    pub jump_spawn_rate: f32,
    pub pickup_spawn_rate: f32,
    /// Kind partition for new obstacles: below tree_share is a tree,
    /// below rock_share a rock, otherwise a jump
    pub tree_share: f32,
    pub rock_share: f32,
    /// Fraction of trees drawn with heavy snow
    pub snowy_tree_share: f32,

    // === Difficulty ===
    pub difficulty_start: f32,
    /// Distance at which obstacle density saturates
    pub difficulty_ramp_distance: f32,

    // === Power-ups ===
    pub boost_ticks: u32,
    pub boost_speed_bonus: f32,
    pub shield_ticks: u32,
    pub freeze_ticks: u32,
    pub pursuer_freeze_ticks: u32,
    pub snowball_speed: f32,
    pub bomb_lateral_factor: f32,
    pub bomb_launch_vy: f32,
    pub bomb_fuse_ticks: u32,
    pub snowball_stun_ticks: u32,
    pub bomb_stun_ticks: u32,
    /// Projectile vertical scroll compensation (fraction of player speed)
    pub projectile_scroll_factor: f32,

    // === Pursuer ===
    pub pursuer_activation_distance: f32,
    pub pursuer_base_speed: f32,
    pub pursuer_max_speed: f32,
    /// Distance past activation over which speed ramps base -> max
    pub pursuer_ramp_distance: f32,
    /// Upward bias while seeking (fraction of player speed)
    pub pursuer_scroll_bias: f32,
    /// Backward drift while stunned (fraction of player speed)
    pub pursuer_stun_drift: f32,
    /// Distance the player must cover before the pursuer returns
    pub pursuer_retreat_cooldown: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 5.0,
            min_speed: 2.0,
            max_speed: 15.0,
            accel: 0.2,
            brake: 0.1,
            relax_down: 0.05,
            relax_up: 0.02,

            max_angle: 2.0,
            key_turn_rate: 0.15,
            key_return_rate: 0.05,
            key_snap_band: 0.1,
            pointer_dead_zone: 30.0,
            pointer_saturation: 50.0,
            drag_scale: 40.0,
            travel_factor: 0.5,

            jump_launch_velocity: 12.0,
            jump_gravity: 0.8,

            tree_spawn_rate: 0.026,
            rock_spawn_rate: 0.012,
            jump_spawn_rate: 0.007,
            pickup_spawn_rate: 0.004,
            tree_share: 0.6,
            rock_share: 0.85,
            snowy_tree_share: 0.55,

            difficulty_start: 0.25,
            difficulty_ramp_distance: 1200.0,

            boost_ticks: 300,
            boost_speed_bonus: 4.0,
            shield_ticks: 360,
            freeze_ticks: 240,
            pursuer_freeze_ticks: 240,
            snowball_speed: 10.0,
            bomb_lateral_factor: 2.0,
            bomb_launch_vy: -6.0,
            bomb_fuse_ticks: 60,
            snowball_stun_ticks: 180,
            bomb_stun_ticks: 300,
            projectile_scroll_factor: 0.5,

            pursuer_activation_distance: 5000.0,
            pursuer_base_speed: 4.0,
            pursuer_max_speed: 8.0,
            pursuer_ramp_distance: 2000.0,
            pursuer_scroll_bias: 0.7,
            pursuer_stun_drift: 0.4,
            pursuer_retreat_cooldown: 3000.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the tick would clamp against inverted bounds or divide by.
    /// Comparisons are written so NaN fails them.
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: String| -> Result<(), TuningError> { Err(TuningError::Invalid(msg)) };

        if !(self.min_speed <= self.base_speed && self.base_speed <= self.max_speed) {
            return invalid(format!(
                "speeds must satisfy min <= base <= max (got {} / {} / {})",
                self.min_speed, self.base_speed, self.max_speed
            ));
        }
        if !(self.max_angle > 0.0) {
            return invalid(format!("max_angle must be positive (got {})", self.max_angle));
        }
        if !(0.0..=1.0).contains(&self.difficulty_start) {
            return invalid(format!(
                "difficulty_start must be within [0, 1] (got {})",
                self.difficulty_start
            ));
        }
        if !(self.pursuer_base_speed <= self.pursuer_max_speed) {
            return invalid(format!(
                "pursuer_base_speed must not exceed pursuer_max_speed (got {} / {})",
                self.pursuer_base_speed, self.pursuer_max_speed
            ));
        }
        for (name, value) in [
            ("pointer_dead_zone", self.pointer_dead_zone),
            ("pointer_saturation", self.pointer_saturation),
            ("drag_scale", self.drag_scale),
            ("difficulty_ramp_distance", self.difficulty_ramp_distance),
            ("pursuer_ramp_distance", self.pursuer_ramp_distance),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return invalid(format!("{} must be positive (got {})", name, value));
            }
        }
        Ok(())
    }

    /// Read a tuning file from disk
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load from the file named by `SNOWDRIFT_TUNING`, falling back to defaults
    pub fn load() -> Self {
        let Ok(path) = std::env::var(TUNING_ENV) else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_speed": 20.0, "shield_ticks": 10 }"#).unwrap();
        assert_eq!(tuning.max_speed, 20.0);
        assert_eq!(tuning.shield_ticks, 10);
        assert_eq!(tuning.base_speed, Tuning::default().base_speed);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            Tuning::from_json("{ max_speed: }"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_speed_bounds_rejected() {
        assert!(matches!(
            Tuning::from_json(r#"{ "min_speed": 20.0 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "base_speed": 1.0 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "pursuer_base_speed": 9.0 }"#),
            Err(TuningError::Invalid(_))
        ));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        for json in [
            r#"{ "difficulty_start": 1.5 }"#,
            r#"{ "difficulty_start": -0.1 }"#,
            r#"{ "max_angle": 0.0 }"#,
            r#"{ "pointer_dead_zone": 0.0 }"#,
            r#"{ "pointer_saturation": -5.0 }"#,
            r#"{ "drag_scale": 0.0 }"#,
        ] {
            assert!(
                matches!(Tuning::from_json(json), Err(TuningError::Invalid(_))),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_inconsistent_file_is_rejected() {
        let path =
            std::env::temp_dir().join(format!("snowdrift-tuning-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "min_speed": 20.0 }"#).unwrap();
        assert!(matches!(Tuning::from_file(&path), Err(TuningError::Invalid(_))));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Tuning::from_file("/nonexistent/snowdrift-tuning.json"),
            Err(TuningError::Io(_))
        ));
    }
}
