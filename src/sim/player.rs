//! Player controller: steering, throttle, jump physics and travel

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameMode, SimulationState};
use crate::consts::*;
use crate::finite_or_zero;

/// Steering command for one tick. Exactly one mode applies per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Steering {
    /// Absolute pointer position (mouse x in world units)
    Pointer { target_x: f32 },
    /// Horizontal drag distance since the touch began
    Drag { delta_x: f32 },
    /// Held direction keys
    Keys { left: bool, right: bool },
}

impl Default for Steering {
    fn default() -> Self {
        Steering::Keys {
            left: false,
            right: false,
        }
    }
}

/// Throttle flags for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Throttle {
    pub accelerate: bool,
    pub brake: bool,
    /// Held boost key (accelerates like `accelerate`)
    pub boost: bool,
}

/// Resolve the steering command into a new angle
pub fn steer(state: &mut SimulationState, steering: Steering) {
    let t = state.tuning;
    let max = t.max_angle;
    let player = &mut state.player;

    let angle = match steering {
        Steering::Pointer { target_x } => {
            let diff = finite_or_zero(target_x - player.x);
            if diff.abs() > t.pointer_dead_zone {
                diff / t.pointer_saturation
            } else {
                diff / t.pointer_dead_zone
            }
        }
        Steering::Drag { delta_x } => finite_or_zero(delta_x) / t.drag_scale,
        Steering::Keys { left, right } => {
            let mut angle = player.angle;
            if left && angle > -max {
                angle -= t.key_turn_rate;
            }
            if right && angle < max {
                angle += t.key_turn_rate;
            }
            if !left && !right {
                if angle > t.key_snap_band {
                    angle -= t.key_return_rate;
                } else if angle < -t.key_snap_band {
                    angle += t.key_return_rate;
                } else {
                    angle = 0.0;
                }
            }
            angle
        }
    };

    player.angle = angle.clamp(-max, max);
}

/// Apply throttle, or relax toward base speed when idle
pub fn apply_throttle(state: &mut SimulationState, throttle: Throttle) {
    let t = state.tuning;
    let mut speed = state.player.speed;

    if throttle.brake {
        speed -= t.brake;
    }
    if throttle.accelerate || throttle.boost {
        speed += t.accel;
    }
    if !throttle.brake && !throttle.accelerate && !throttle.boost {
        if speed > t.base_speed {
            speed -= t.relax_down;
        }
        if speed < t.base_speed {
            speed += t.relax_up;
        }
    }

    state.player.speed = speed.clamp(t.min_speed, t.max_speed);
}

/// Leave the ground if not already airborne. Returns true on launch.
pub fn launch_jump(state: &mut SimulationState) -> bool {
    if state.player.jump_height != 0.0 {
        return false;
    }
    state.player.jump_velocity = state.tuning.jump_launch_velocity;
    if state.mode != GameMode::Jumping {
        state.mode = GameMode::Jumping;
        state.push_event(GameEvent::JumpStarted);
    }
    true
}

/// Integrate jump height; touching down returns to Playing
pub fn update_jump(state: &mut SimulationState) {
    let gravity = state.tuning.jump_gravity;
    let player = &mut state.player;
    if !player.is_airborne() {
        return;
    }
    player.jump_height += player.jump_velocity;
    player.jump_velocity -= gravity;
    if player.jump_height <= 0.0 {
        player.jump_height = 0.0;
        player.jump_velocity = 0.0;
        state.mode = GameMode::Playing;
        state.push_event(GameEvent::Landed);
    }
}

/// Horizontal integration and distance travelled
pub fn travel(state: &mut SimulationState) {
    let factor = state.tuning.travel_factor;
    let player = &mut state.player;
    player.x = (player.x + player.angle * player.speed * factor)
        .clamp(PLAYER_MARGIN, WORLD_WIDTH - PLAYER_MARGIN);
    state.distance += player.speed * factor;
}
