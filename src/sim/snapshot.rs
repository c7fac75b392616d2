//! Read-only view of a tick for renderers and UI

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{
    GameEvent, GameMode, ObstacleKind, PowerupKind, ProjectileKind, PursuerStatus,
    SimulationState,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub jump_height: f32,
}

/// Remaining ticks for each timed effect (0 when inactive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTimers {
    pub boost: u32,
    pub shield: u32,
    pub freeze: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySnapshot<K> {
    pub id: u32,
    pub kind: K,
    pub pos: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PursuerSnapshot {
    pub pos: Vec2,
    pub status: PursuerStatus,
    pub frozen_ticks: u32,
    pub stunned_ticks: u32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub mode: GameMode,
    pub distance: f32,
    pub difficulty: f32,
    pub player: PlayerSnapshot,
    pub effects: EffectTimers,
    pub held: Option<PowerupKind>,
    pub obstacles: Vec<EntitySnapshot<ObstacleKind>>,
    pub pickups: Vec<EntitySnapshot<PowerupKind>>,
    pub projectiles: Vec<EntitySnapshot<ProjectileKind>>,
    pub pursuer: PursuerSnapshot,
    pub best_distance: u32,
    pub marker: Option<Vec2>,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(state: &SimulationState) -> Self {
        let obstacles = state
            .obstacles
            .iter()
            .filter(|o| !o.destroyed)
            .map(|o| EntitySnapshot {
                id: o.id,
                kind: o.kind,
                pos: o.pos,
            })
            .collect();
        let pickups = state
            .pickups
            .iter()
            .map(|p| EntitySnapshot {
                id: p.id,
                kind: p.kind,
                pos: p.pos,
            })
            .collect();
        let projectiles = state
            .projectiles
            .iter()
            .map(|p| EntitySnapshot {
                id: p.id,
                kind: p.kind,
                pos: p.pos,
            })
            .collect();

        Self {
            tick: state.time_ticks,
            mode: state.mode,
            distance: state.distance,
            difficulty: state.difficulty,
            player: PlayerSnapshot {
                pos: state.player.pos(),
                angle: state.player.angle,
                speed: state.player.speed,
                jump_height: state.player.jump_height,
            },
            effects: EffectTimers {
                boost: state.effects.boost.remaining(),
                shield: state.effects.shield.remaining(),
                freeze: state.effects.freeze.remaining(),
            },
            held: state.held,
            obstacles,
            pickups,
            projectiles,
            pursuer: PursuerSnapshot {
                pos: state.pursuer.pos,
                status: state.pursuer.status(),
                frozen_ticks: state.pursuer.frozen.remaining(),
                stunned_ticks: state.pursuer.stunned.remaining(),
            },
            best_distance: state.best.distance,
            marker: state.marker.as_ref().map(|m| m.pos),
            events: state.events.clone(),
        }
    }
}
