//! World scrolling, culling and the best-run marker
//!
//! The player holds a fixed screen row; everything else moves up past it
//! at the player's speed.

use glam::Vec2;

use super::state::{BestMarker, GameEvent, SimulationState};
use crate::consts::*;

/// Move obstacles and pickups up by the current speed (halted by Freeze)
pub fn scroll(state: &mut SimulationState) {
    if state.effects.frozen() {
        return;
    }
    let dy = state.player.speed;
    for obs in &mut state.obstacles {
        obs.pos.y -= dy;
    }
    for pickup in &mut state.pickups {
        pickup.pos.y -= dy;
    }
}

/// Drop entities that left the top of the window and destroyed obstacles
pub fn cull(state: &mut SimulationState) {
    state
        .obstacles
        .retain(|o| o.pos.y > CULL_Y && !o.destroyed);
    state.pickups.retain(|p| p.pos.y > CULL_Y);
}

/// Place the marker once the run nears the best distance, then scroll it away
pub fn update_marker(state: &mut SimulationState) {
    let best = state.best.distance;
    if !state.marker_placed && best > 0 && state.distance >= best as f32 - MARKER_LEAD {
        state.marker = Some(BestMarker {
            pos: Vec2::new(state.best.x as f32, WORLD_HEIGHT + MARKER_SPAWN_OFFSET),
            distance: best,
        });
        state.marker_placed = true;
        state.push_event(GameEvent::MarkerPlaced { distance: best });
    }

    let frozen = state.effects.frozen();
    let dy = state.player.speed;
    if let Some(marker) = &mut state.marker {
        if !frozen {
            marker.pos.y -= dy;
        }
        if marker.pos.y < MARKER_CULL_Y {
            state.marker = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::BestRun;
    use crate::sim::state::{Obstacle, ObstacleKind, Pickup, PowerupKind};
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn new_state(best: BestRun) -> SimulationState {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = SimulationState::new(Tuning::default(), best, &mut rng);
        state.obstacles.clear();
        state
    }

    fn obstacle(state: &mut SimulationState, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Rock,
            pos: Vec2::new(100.0, y),
            destroyed: false,
        });
        id
    }

    fn pickup(state: &mut SimulationState, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.pickups.push(Pickup {
            id,
            kind: PowerupKind::Boost,
            pos: Vec2::new(400.0, y),
            radius: PICKUP_RADIUS,
            bob_phase: 0.0,
        });
        id
    }

    #[test]
    fn test_scroll_moves_by_speed() {
        let mut state = new_state(BestRun::default());
        obstacle(&mut state, 300.0);
        pickup(&mut state, 250.0);
        state.player.speed = 7.0;
        scroll(&mut state);
        assert_eq!(state.obstacles[0].pos.y, 293.0);
        assert_eq!(state.pickups[0].pos.y, 243.0);
    }

    #[test]
    fn test_freeze_halts_scroll() {
        let mut state = new_state(BestRun::default());
        obstacle(&mut state, 300.0);
        pickup(&mut state, 250.0);
        state.effects.freeze.start(10);
        for _ in 0..5 {
            scroll(&mut state);
        }
        assert!(state.effects.frozen());
        assert_eq!(state.obstacles[0].pos, Vec2::new(100.0, 300.0));
        assert_eq!(state.pickups[0].pos, Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_cull_removes_offscreen_pickups() {
        let mut state = new_state(BestRun::default());
        pickup(&mut state, -50.0);
        let kept = pickup(&mut state, -49.0);
        cull(&mut state);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].id, kept);
    }

    #[test]
    fn test_cull_removes_offscreen_and_destroyed() {
        let mut state = new_state(BestRun::default());
        obstacle(&mut state, -50.0);
        let kept = obstacle(&mut state, -49.0);
        obstacle(&mut state, 200.0);
        state.obstacles[2].destroyed = true;
        cull(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, kept);
    }

    #[test]
    fn test_marker_placed_once_near_best() {
        let mut state = new_state(BestRun {
            distance: 1000,
            x: 200,
        });
        state.distance = 700.0;
        update_marker(&mut state);
        assert!(state.marker.is_none());

        state.distance = 750.0;
        update_marker(&mut state);
        let marker = state.marker.as_ref().unwrap();
        assert_eq!(marker.pos.x, 200.0);
        assert_eq!(marker.pos.y, WORLD_HEIGHT + MARKER_SPAWN_OFFSET - state.player.speed);
        assert!(state.events.contains(&GameEvent::MarkerPlaced { distance: 1000 }));

        // Scrolls off and never returns
        for _ in 0..200 {
            update_marker(&mut state);
        }
        assert!(state.marker.is_none());
        assert!(state.marker_placed);
    }

    #[test]
    fn test_no_marker_without_best() {
        let mut state = new_state(BestRun::default());
        state.distance = 10_000.0;
        update_marker(&mut state);
        assert!(state.marker.is_none());
    }
}
