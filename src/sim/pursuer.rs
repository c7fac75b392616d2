//! Pursuer AI: activation, seeking, retreat cooldown and capture

use glam::Vec2;
use rand::Rng;

use super::collision::pursuer_catches;
use super::state::{GameEvent, GameMode, SimulationState};
use crate::consts::*;

/// One pursuer step. Capture is checked whenever the pursuer is active,
/// even while frozen or stunned.
pub fn update<R: Rng + ?Sized>(state: &mut SimulationState, rng: &mut R) {
    let t = state.tuning;

    if !state.pursuer.active
        && state.distance > t.pursuer_activation_distance
        && state.pursuer.retreat_cooldown <= 0.0
    {
        activate(state, rng);
    }

    if !state.pursuer.active && state.pursuer.retreat_cooldown > 0.0 {
        let travelled = state.player.speed * t.travel_factor;
        state.pursuer.retreat_cooldown = (state.pursuer.retreat_cooldown - travelled).max(0.0);
    }

    if !state.pursuer.active {
        return;
    }

    let player_pos = state.player.pos();
    let player_speed = state.player.speed;
    let pursuer = &mut state.pursuer;
    pursuer.frozen.tick();
    pursuer.stunned.tick();

    if pursuer.stunned.is_active() {
        pursuer.pos.y -= player_speed * t.pursuer_stun_drift;
    } else if !pursuer.frozen.is_active() {
        // Coincident with the player: nothing to steer toward
        if let Some(dir) = (player_pos - pursuer.pos).try_normalize() {
            pursuer.pos += dir * pursuer.speed;
            pursuer.pos.y -= player_speed * t.pursuer_scroll_bias;
        }
    }

    let past_activation = state.distance - t.pursuer_activation_distance;
    let ramp = t.pursuer_ramp_distance.max(f32::EPSILON);
    pursuer.speed = (t.pursuer_base_speed
        + past_activation / ramp * (t.pursuer_max_speed - t.pursuer_base_speed))
        .clamp(t.pursuer_base_speed, t.pursuer_max_speed);

    if pursuer.pos.y < PURSUER_ESCAPE_Y {
        pursuer.active = false;
        pursuer.retreat_cooldown = t.pursuer_retreat_cooldown;
        pursuer.frozen.clear();
        pursuer.stunned.clear();
        log::debug!("Pursuer outrun at distance {:.0}", state.distance);
        state.push_event(GameEvent::PursuerRetreated);
        return;
    }

    if pursuer_catches(state) {
        state.end_run(GameMode::Caught);
    }
}

/// Spawn below the window at a random column
fn activate<R: Rng + ?Sized>(state: &mut SimulationState, rng: &mut R) {
    let x = rng.random::<f32>() * WORLD_WIDTH;
    let pos = Vec2::new(x, WORLD_HEIGHT + PURSUER_SPAWN_OFFSET);
    let pursuer = &mut state.pursuer;
    pursuer.active = true;
    pursuer.pos = pos;
    pursuer.frozen.clear();
    pursuer.stunned.clear();
    log::debug!("Pursuer joined the chase at distance {:.0}", state.distance);
    state.push_event(GameEvent::PursuerActivated { pos });
}
