//! Power-up activation, effect timers and projectiles

use glam::Vec2;

use super::collision::within_radius;
use super::state::{GameEvent, PowerupKind, Projectile, ProjectileKind, SimulationState};
use crate::consts::*;
use crate::direction_or;

/// Straight up the screen (away from the oncoming slope)
const UP: Vec2 = Vec2::NEG_Y;

/// Spend the held power-up. Returns the kind that fired, if any.
pub fn activate(state: &mut SimulationState) -> Option<PowerupKind> {
    let kind = state.held.take()?;
    let t = state.tuning;

    match kind {
        PowerupKind::Boost => {
            state.effects.boost.start(t.boost_ticks);
            state.player.speed = (state.player.speed + t.boost_speed_bonus).min(t.max_speed);
        }
        PowerupKind::Shield => {
            state.effects.shield.start(t.shield_ticks);
        }
        PowerupKind::Snowball => {
            let from = state.player.pos();
            let vel = if state.pursuer.active {
                let dir = direction_or(from, state.pursuer.pos, UP);
                let mut vel = dir * t.snowball_speed;
                vel.y -= state.player.speed * t.projectile_scroll_factor;
                vel
            } else {
                UP * t.snowball_speed
            };
            spawn_projectile(state, ProjectileKind::Snowball, from, vel);
        }
        PowerupKind::Freeze => {
            state.effects.freeze.start(t.freeze_ticks);
            if state.pursuer.active {
                state.pursuer.frozen.start(t.pursuer_freeze_ticks);
            }
        }
        PowerupKind::Bomb => {
            let from = state.player.pos();
            let vel = Vec2::new(state.player.angle * t.bomb_lateral_factor, t.bomb_launch_vy);
            spawn_projectile(
                state,
                ProjectileKind::Bomb {
                    fuse: t.bomb_fuse_ticks,
                },
                from,
                vel,
            );
        }
    }

    state.push_event(GameEvent::PowerupActivated(kind));
    Some(kind)
}

fn spawn_projectile(state: &mut SimulationState, kind: ProjectileKind, pos: Vec2, vel: Vec2) {
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        kind,
        pos,
        vel,
        scroll_compensated: true,
    });
}

/// Count down the player's timed effects
pub fn advance_effects(state: &mut SimulationState) {
    state.effects.boost.tick();
    state.effects.shield.tick();
    state.effects.freeze.tick();
}

/// Area blast: destroys nearby obstacles and stuns a nearby pursuer
pub fn explode(state: &mut SimulationState, center: Vec2) {
    let mut destroyed = Vec::new();
    for obs in &mut state.obstacles {
        if !obs.destroyed && within_radius(center, obs.pos, EXPLOSION_RADIUS) {
            obs.destroyed = true;
            destroyed.push(obs.id);
        }
    }
    state.push_event(GameEvent::BombExploded { pos: center });
    for id in destroyed {
        state.push_event(GameEvent::ObstacleDestroyed { id });
    }

    if state.pursuer.active && within_radius(center, state.pursuer.pos, EXPLOSION_RADIUS) {
        let ticks = state.tuning.bomb_stun_ticks;
        stun_pursuer(state, ticks);
    }
}

fn stun_pursuer(state: &mut SimulationState, ticks: u32) {
    state.pursuer.stunned.start(ticks);
    state.push_event(GameEvent::PursuerStunned { ticks });
}

fn out_of_bounds(pos: Vec2) -> bool {
    pos.x < -PROJECTILE_BOUNDS_MARGIN
        || pos.x > WORLD_WIDTH + PROJECTILE_BOUNDS_MARGIN
        || pos.y < -PROJECTILE_BOUNDS_MARGIN
        || pos.y > WORLD_HEIGHT + PROJECTILE_BOUNDS_MARGIN
}

/// Move projectiles and resolve fuses and hits. Hits against the pursuer
/// only land while it is neither frozen nor stunned.
pub fn update_projectiles(state: &mut SimulationState) {
    let scroll = state.player.speed * state.tuning.projectile_scroll_factor;
    let snowball_stun = state.tuning.snowball_stun_ticks;
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());

    for mut proj in projectiles {
        proj.pos += proj.vel;
        if proj.scroll_compensated {
            proj.pos.y -= scroll;
        }

        if let ProjectileKind::Bomb { fuse } = &mut proj.kind {
            *fuse = fuse.saturating_sub(1);
            if *fuse == 0 {
                explode(state, proj.pos);
                continue;
            }
        }

        if state.pursuer.is_vulnerable()
            && within_radius(proj.pos, state.pursuer.pos, PROJECTILE_PURSUER_RADIUS)
        {
            match proj.kind {
                ProjectileKind::Snowball => stun_pursuer(state, snowball_stun),
                ProjectileKind::Bomb { .. } => explode(state, proj.pos),
            }
            continue;
        }

        let hit = state.obstacles.iter_mut().find(|o| {
            !o.destroyed
                && !o.kind.is_jump()
                && within_radius(proj.pos, o.pos, PROJECTILE_OBSTACLE_RADIUS)
        });
        if let Some(obs) = hit {
            obs.destroyed = true;
            let id = obs.id;
            state.push_event(GameEvent::ObstacleDestroyed { id });
            continue;
        }

        // Bombs always burn their fuse down, even off-screen
        if proj.kind == ProjectileKind::Snowball && out_of_bounds(proj.pos) {
            continue;
        }
        survivors.push(proj);
    }

    state.projectiles = survivors;
}
