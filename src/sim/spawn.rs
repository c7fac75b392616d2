//! Procedural placement of obstacles and pickups

use glam::Vec2;
use rand::Rng;

use super::state::{Obstacle, ObstacleKind, Pickup, PowerupKind, SimulationState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Seed the slope with the opening obstacle field (spread over one window below)
pub fn populate_initial<R: Rng + ?Sized>(state: &mut SimulationState, rng: &mut R) {
    state.obstacles.clear();
    state.pickups.clear();
    state.projectiles.clear();
    for _ in 0..INITIAL_OBSTACLES {
        let y = WORLD_HEIGHT + rng.random::<f32>() * WORLD_HEIGHT;
        spawn_obstacle(state, y, rng);
    }
}

/// Per-tick spawn trials. Obstacle trials scale with speed and difficulty,
/// pickups with speed only.
pub fn spawn_tick<R: Rng + ?Sized>(state: &mut SimulationState, rng: &mut R) {
    let t = state.tuning;
    let speed_factor = state.player.speed / t.base_speed;
    let obstacle_scale = speed_factor * state.difficulty;
    let y = WORLD_HEIGHT + SPAWN_OFFSET;

    for rate in [t.tree_spawn_rate, t.rock_spawn_rate, t.jump_spawn_rate] {
        if rng.random::<f32>() < rate * obstacle_scale {
            spawn_obstacle(state, y, rng);
        }
    }
    if rng.random::<f32>() < t.pickup_spawn_rate * speed_factor {
        spawn_pickup(state, y, rng);
    }
}

/// Draw an obstacle category from the tree/rock/jump partition
pub fn roll_obstacle_kind<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> ObstacleKind {
    let roll = rng.random::<f32>();
    if roll < tuning.tree_share {
        ObstacleKind::Tree {
            snowy: rng.random::<f32>() < tuning.snowy_tree_share,
        }
    } else if roll < tuning.rock_share {
        ObstacleKind::Rock
    } else {
        ObstacleKind::Jump
    }
}

pub fn spawn_obstacle<R: Rng + ?Sized>(state: &mut SimulationState, y: f32, rng: &mut R) {
    let kind = roll_obstacle_kind(&state.tuning, rng);
    let x = OBSTACLE_INSET + rng.random::<f32>() * (WORLD_WIDTH - 2.0 * OBSTACLE_INSET);
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        kind,
        pos: Vec2::new(x, y),
        destroyed: false,
    });
}

pub fn spawn_pickup<R: Rng + ?Sized>(state: &mut SimulationState, y: f32, rng: &mut R) {
    let kind = PowerupKind::ALL[rng.random_range(0..PowerupKind::ALL.len())];
    let x = PICKUP_INSET + rng.random::<f32>() * (WORLD_WIDTH - 2.0 * PICKUP_INSET);
    let bob_phase = rng.random::<f32>() * std::f32::consts::TAU;
    let id = state.next_entity_id();
    state.pickups.push(Pickup {
        id,
        kind,
        pos: Vec2::new(x, y),
        radius: PICKUP_RADIUS,
        bob_phase,
    });
}
