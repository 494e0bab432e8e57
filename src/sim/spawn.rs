//! Enemy spawning
//!
//! Enemies enter from a random point on one of the four arena edges, just
//! outside the visible area, and walk in toward the player.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameState};
use crate::consts::*;

/// Pick a spawn point `ENEMY_SPAWN_OFFSET` outside a random edge
pub fn edge_spawn_point<R: Rng>(rng: &mut R, arena: Vec2) -> Vec2 {
    let along_x = rng.random::<f32>() * arena.x;
    let along_y = rng.random::<f32>() * arena.y;
    match rng.random_range(0..4) {
        // Top
        0 => Vec2::new(along_x, -ENEMY_SPAWN_OFFSET),
        // Right
        1 => Vec2::new(arena.x + ENEMY_SPAWN_OFFSET, along_y),
        // Bottom
        2 => Vec2::new(along_x, arena.y + ENEMY_SPAWN_OFFSET),
        // Left
        _ => Vec2::new(-ENEMY_SPAWN_OFFSET, along_y),
    }
}

/// Spawn one enemy with randomized speed and kind
pub fn spawn_enemy(state: &mut GameState) -> u32 {
    let pos = edge_spawn_point(&mut state.rng, state.arena);
    let speed = state.rng.random_range(ENEMY_SPEED_MIN..=ENEMY_SPEED_MAX);
    let kind = EnemyKind::ALL[state.rng.random_range(0..EnemyKind::ALL.len())];

    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(id, pos, speed, kind));
    log::debug!("Spawned {:?} #{} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
    id
}

/// Place the opening batch of enemies
pub fn seed_enemies(state: &mut GameState) {
    for _ in 0..state.settings.initial_enemies {
        spawn_enemy(state);
    }
}

/// Spawner timer callback: adds one enemy while the match is running and
/// below the enemy ceiling. Returns true if an enemy was spawned.
pub fn periodic_spawn(state: &mut GameState) -> bool {
    if !state.is_running() || state.enemies.len() >= state.settings.max_enemies {
        return false;
    }
    spawn_enemy(state);
    true
}
