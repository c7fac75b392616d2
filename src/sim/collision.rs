//! Overlap tests and player-side collision resolution
//!
//! Obstacles use boxes; everything else is a centre-distance circle check.

use glam::Vec2;

use super::player::launch_jump;
use super::state::{GameEvent, GameMode, Obstacle, Pickup, Player, SimulationState};
use crate::consts::*;

/// Strict circle test on centre distance
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Box overlap between the player and an obstacle. Above the airborne gate
/// only Jump obstacles register.
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    if player.jump_height > AIRBORNE_GATE && !obstacle.kind.is_jump() {
        return false;
    }
    player.hitbox().overlaps(&obstacle.bounds())
}

pub fn player_reaches_pickup(player: &Player, pickup: &Pickup) -> bool {
    within_radius(player.pos(), pickup.pos, pickup.radius + PICKUP_REACH)
}

/// Capture only counts while the pursuer is active and the player is low
pub fn pursuer_catches(state: &SimulationState) -> bool {
    state.pursuer.active
        && within_radius(state.player.pos(), state.pursuer.pos, CAPTURE_RADIUS)
        && state.player.jump_height < AIRBORNE_GATE
        && !state.effects.shielded()
}

/// Collect any pickups in reach; the newest one replaces the held slot
pub fn collect_pickups(state: &mut SimulationState) {
    let mut collected = Vec::new();
    let player = &state.player;
    state.pickups.retain(|p| {
        if player_reaches_pickup(player, p) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        state.held = Some(kind);
        state.push_event(GameEvent::PickupCollected(kind));
    }
}

/// Ramps launch, anything else crashes unless shielded
pub fn resolve_obstacles(state: &mut SimulationState) {
    let mut hit_jump = false;
    let mut crashed = false;
    for obs in &state.obstacles {
        if obs.destroyed || !player_hits_obstacle(&state.player, obs) {
            continue;
        }
        if obs.kind.is_jump() {
            hit_jump = true;
        } else if !state.effects.shielded() {
            crashed = true;
            break;
        }
    }

    if crashed {
        state.player.speed = 0.0;
        state.end_run(GameMode::Crashed);
    } else if hit_jump {
        launch_jump(state);
    }
}
