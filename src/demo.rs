//! Autopilot for attract mode and headless runs

use crate::consts::*;
use crate::sim::{SimulationState, Steering, Throttle, TickInput};

/// How far down the slope the autopilot looks for trouble
const LOOKAHEAD: f32 = 160.0;
/// Horizontal clearance it tries to keep from an obstacle centre
const CLEARANCE: f32 = 45.0;
/// Pursuer distance at which held power-ups get fired
const PANIC_RANGE: f32 = 220.0;

/// Pick an input for the next tick from the current state
pub fn autopilot(state: &SimulationState) -> TickInput {
    let player = state.player.pos();

    // Nearest hazard ahead in the player's lane
    let threat = state
        .obstacles
        .iter()
        .filter(|o| !o.destroyed && !o.kind.is_jump())
        .filter(|o| o.pos.y > player.y - 10.0 && o.pos.y < player.y + LOOKAHEAD)
        .filter(|o| (o.pos.x - player.x).abs() < CLEARANCE)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let target_x = if let Some(obs) = threat {
        // Dodge toward the side with more room
        if obs.pos.x > WORLD_WIDTH / 2.0 {
            obs.pos.x - CLEARANCE * 2.0
        } else {
            obs.pos.x + CLEARANCE * 2.0
        }
    } else if let Some(pickup) = state
        .pickups
        .iter()
        .filter(|p| p.pos.y > player.y && p.pos.y < player.y + LOOKAHEAD * 2.0)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        pickup.pos.x
    } else {
        // Wander around the centre line so runs differ
        let time_factor = state.time_ticks as f32 * 0.01;
        WORLD_WIDTH / 2.0 + (time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15) * 400.0
    };

    let chased = state.pursuer.active;
    let pursuer_near = chased && state.pursuer.pos.distance(player) < PANIC_RANGE;

    TickInput {
        steering: Steering::Pointer {
            target_x: target_x.clamp(PLAYER_MARGIN, WORLD_WIDTH - PLAYER_MARGIN),
        },
        throttle: Throttle {
            accelerate: chased,
            brake: threat.is_some() && !chased,
            boost: false,
        },
        jump: false,
        activate: state.held.is_some() && pursuer_near,
    }
}
