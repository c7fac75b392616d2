//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Stage order
//! matters: later stages read what earlier ones wrote this tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::difficulty_factor;
use super::player::{Steering, Throttle};
use super::state::SimulationState;
use super::{collision, player, powerup, pursuer, spawn, world};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub steering: Steering,
    pub throttle: Throttle,
    /// Manual jump (touch jump button)
    pub jump: bool,
    /// Fire the held power-up
    pub activate: bool,
}

/// Advance the run by one fixed step. A no-op once the run has ended;
/// hosts call `SimulationState::reset` to start over.
pub fn tick<R: Rng + ?Sized>(state: &mut SimulationState, input: &TickInput, rng: &mut R) {
    state.events.clear();
    if state.mode.is_terminal() {
        return;
    }
    state.time_ticks += 1;

    // Input resolution
    if input.activate {
        powerup::activate(state);
    }
    if input.jump {
        player::launch_jump(state);
    }
    player::steer(state, input.steering);
    player::apply_throttle(state, input.throttle);

    // Movement
    player::update_jump(state);
    player::travel(state);
    state.difficulty = difficulty_factor(state.distance, &state.tuning);
    world::update_marker(state);

    // Scroll, cull, spawn
    world::scroll(state);
    world::cull(state);
    spawn::spawn_tick(state, rng);

    // Collisions
    collision::collect_pickups(state);
    collision::resolve_obstacles(state);
    if state.mode.is_terminal() {
        return;
    }

    // Effects and projectiles
    powerup::advance_effects(state);
    powerup::update_projectiles(state);

    pursuer::update(state, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::highscores::BestRun;
    use crate::sim::state::{GameEvent, GameMode, Obstacle, ObstacleKind, Pickup, PowerupKind};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    fn new_run(seed: u64) -> (SimulationState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = SimulationState::new(Tuning::default(), BestRun::default(), &mut rng);
        (state, rng)
    }

    /// Place an obstacle where it will sit on the player after this tick's scroll
    fn place_ahead(state: &mut SimulationState, kind: ObstacleKind) {
        let id = state.next_entity_id();
        let pos = state.player.pos() + Vec2::new(0.0, state.player.speed);
        state.obstacles.push(Obstacle {
            id,
            kind,
            pos,
            destroyed: false,
        });
    }

    #[test]
    fn test_jump_collision_then_arc() {
        let (mut state, mut rng) = new_run(1);
        state.obstacles.clear();
        place_ahead(&mut state, ObstacleKind::Jump);

        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.mode, GameMode::Jumping);
        assert_eq!(state.player.jump_velocity, 12.0);
        assert_eq!(state.player.jump_height, 0.0);

        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.player.jump_height, 12.0);
        assert!((state.player.jump_velocity - 11.2).abs() < 1e-5);
    }

    #[test]
    fn test_crash_is_terminal() {
        let (mut state, mut rng) = new_run(2);
        state.obstacles.clear();
        place_ahead(&mut state, ObstacleKind::Rock);
        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.mode, GameMode::Crashed);

        let ticks = state.time_ticks;
        let distance = state.distance;
        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.distance, distance);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_shield_prevents_crash_and_capture() {
        let (mut state, mut rng) = new_run(3);
        state.effects.shield.start(100_000);
        state.distance = 6000.0;
        state.pursuer.active = true;
        for _ in 0..300 {
            place_ahead(&mut state, ObstacleKind::Tree { snowy: false });
            state.pursuer.pos = state.player.pos();
            tick(&mut state, &TickInput::default(), &mut rng);
            assert!(!state.mode.is_terminal());
        }
    }

    #[test]
    fn test_freeze_holds_world_while_player_moves() {
        let (mut state, mut rng) = new_run(4);
        state.held = Some(PowerupKind::Freeze);
        let steer_right = TickInput {
            steering: Steering::Keys {
                left: false,
                right: true,
            },
            ..Default::default()
        };
        tick(
            &mut state,
            &TickInput {
                activate: true,
                ..steer_right
            },
            &mut rng,
        );
        assert!(state.effects.frozen());

        let pickup_id = state.next_entity_id();
        state.pickups.push(Pickup {
            id: pickup_id,
            kind: PowerupKind::Shield,
            pos: Vec2::new(100.0, 400.0),
            radius: PICKUP_RADIUS,
            bob_phase: 0.0,
        });

        let before: HashMap<u32, Vec2> = state.obstacles.iter().map(|o| (o.id, o.pos)).collect();
        let x_before = state.player.x;
        for _ in 0..100 {
            tick(&mut state, &steer_right, &mut rng);
        }
        assert!(state.effects.frozen());
        for (id, pos) in &before {
            let obs = state.obstacles.iter().find(|o| o.id == *id);
            assert_eq!(obs.map(|o| o.pos), Some(*pos));
        }
        let pickup = state.pickups.iter().find(|p| p.id == pickup_id);
        assert_eq!(pickup.map(|p| p.pos), Some(Vec2::new(100.0, 400.0)));
        assert!(state.player.x > x_before);
    }

    #[test]
    fn test_bomb_explodes_on_sixtieth_tick() {
        let (mut state, mut rng) = new_run(5);
        state.obstacles.clear();
        state.held = Some(PowerupKind::Bomb);
        let fire = TickInput {
            activate: true,
            ..Default::default()
        };
        tick(&mut state, &fire, &mut rng);
        for _ in 1..59 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert_eq!(state.projectiles.len(), 1);
        tick(&mut state, &TickInput::default(), &mut rng);
        assert!(state.projectiles.is_empty());
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BombExploded { .. })));
    }

    #[test]
    fn test_reset_after_crash() {
        let (mut state, mut rng) = new_run(6);
        state.held = Some(PowerupKind::Shield);
        state.effects.boost.start(50);
        state.distance = 7000.0;
        state.pursuer.active = true;
        state.pursuer.pos = Vec2::new(10.0, 900.0);
        state.obstacles.clear();
        place_ahead(&mut state, ObstacleKind::Rock);
        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.mode, GameMode::Crashed);

        state.reset(&mut rng);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.player.speed, 5.0);
        assert!(!state.pursuer.active);
        assert_eq!(state.pursuer.retreat_cooldown, 0.0);
        assert!(state.held.is_none());
        assert!(!state.effects.boost.is_active());
        assert!(!state.effects.shielded());
        assert!(!state.effects.frozen());
        assert_eq!(state.obstacles.len(), INITIAL_OBSTACLES);
        assert!(state.pickups.is_empty());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let (mut state1, mut rng1) = new_run(99999);
        let (mut state2, mut rng2) = new_run(99999);

        let inputs = [
            TickInput {
                steering: Steering::Pointer { target_x: 500.0 },
                ..Default::default()
            },
            TickInput {
                throttle: Throttle {
                    accelerate: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            TickInput {
                steering: Steering::Drag { delta_x: -30.0 },
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut state1, input, &mut rng1);
                tick(&mut state2, input, &mut rng2);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.distance, state2.distance);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.player.x, state2.player.x);
    }

    proptest! {
        #[test]
        fn angle_and_speed_stay_in_range(
            seed in 0u64..500,
            inputs in proptest::collection::vec((0u8..3, -400.0f32..400.0, 0u8..32), 1..300)
        ) {
            let (mut state, mut rng) = new_run(seed);
            for (mode, value, flags) in inputs {
                let steering = match mode {
                    0 => Steering::Pointer { target_x: state.player.x + value },
                    1 => Steering::Drag { delta_x: value },
                    _ => Steering::Keys { left: flags & 1 != 0, right: flags & 2 != 0 },
                };
                let input = TickInput {
                    steering,
                    throttle: Throttle {
                        accelerate: flags & 4 != 0,
                        brake: flags & 8 != 0,
                        boost: flags & 1 != 0,
                    },
                    jump: flags & 16 != 0,
                    activate: flags & 2 != 0,
                };
                tick(&mut state, &input, &mut rng);
                if state.mode.is_terminal() {
                    break;
                }
                prop_assert!((-2.0..=2.0).contains(&state.player.angle));
                prop_assert!((2.0..=15.0).contains(&state.player.speed));
                prop_assert!(state.player.jump_height >= 0.0);
                prop_assert!(state.obstacles.iter().all(|o| o.pos.y > CULL_Y));
            }
        }
    }
}
