//! Per-frame simulation step
//!
//! Movement and physics advance in fixed per-frame increments; the attack
//! cooldown and contact damage (in per-second mode) read the wall clock.

use glam::Vec2;
use rand::Rng;

use super::collision::{circles_overlap, in_arena, point_in_circle};
use super::state::{EndReason, GameEvent, GameState, Particle, ParticleKind, Projectile};
use crate::consts::*;
use crate::{clamp_to_arena, unit_from_angle};

/// Input commands for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Movement direction, each component in [-1, 1]
    pub movement: Vec2,
    /// Pointer position (facing and aim)
    pub pointer: Vec2,
    /// Attack requested since the previous step
    pub attack: bool,
}

/// Advance the match by one frame. No-op unless running.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if !state.is_running() {
        return;
    }

    let elapsed_ms = state
        .last_step_ms
        .map_or(0.0, |last| (now_ms - last).max(0.0));
    state.last_step_ms = Some(now_ms);

    if input.attack {
        attack(state, input.pointer, now_ms);
    }

    // Player movement, clamped so the whole body stays on screen
    let player = &mut state.player;
    player.pos = clamp_to_arena(
        player.pos + input.movement * player.speed,
        player.radius,
        state.arena,
    );
    let to_pointer = input.pointer - player.pos;
    player.facing = to_pointer.y.atan2(to_pointer.x);

    update_enemies(state, elapsed_ms);
    update_projectiles(state);
    sweep_dead_enemies(state);
    update_particles(state);
}

/// Fire at `pointer` if the cooldown has elapsed. Returns true if accepted.
pub fn attack(state: &mut GameState, pointer: Vec2, now_ms: f64) -> bool {
    if !state.is_running() {
        return false;
    }
    let remaining = state.cooldown_remaining_ms(now_ms);
    if remaining > 0.0 {
        log::debug!("Attack ignored ({:.0} ms cooldown left)", remaining);
        return false;
    }
    state.last_attack_ms = Some(now_ms);

    let origin = state.player.pos;
    let aim = pointer - origin;
    let angle = aim.y.atan2(aim.x);

    state.projectiles.push(Projectile {
        pos: origin,
        vel: unit_from_angle(angle) * PROJECTILE_SPEED,
        radius: PROJECTILE_RADIUS,
        damage: PROJECTILE_DAMAGE,
        lifetime: PROJECTILE_LIFETIME,
    });

    for _ in 0..MUZZLE_PARTICLES {
        let spark_angle = angle + state.rng.random_range(-MUZZLE_JITTER..=MUZZLE_JITTER);
        let speed = state.rng.random_range(MUZZLE_SPEED_MIN..=MUZZLE_SPEED_MAX);
        let size = state.rng.random_range(3.0..=6.0);
        state.particles.push(Particle {
            pos: origin,
            vel: unit_from_angle(spark_angle) * speed,
            size,
            kind: ParticleKind::Muzzle,
            lifetime: MUZZLE_LIFETIME,
            max_lifetime: MUZZLE_LIFETIME,
        });
    }

    state.events.push(GameEvent::AttackFired { angle });
    log::debug!("Attack fired at {:.2} rad", angle);
    true
}

/// Countdown timer callback: one second elapsed. Returns true if this ended
/// the match.
pub fn countdown(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    state.time_left = state.time_left.saturating_sub(1);
    if state.time_left == 0 {
        log::info!("Time's up with score {}", state.score);
        state.end(EndReason::TimeUp);
        return true;
    }
    false
}

/// Chase the player and apply contact damage
fn update_enemies(state: &mut GameState, elapsed_ms: f64) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    let mut contacts = 0u32;
    for enemy in state.enemies.iter_mut().filter(|e| e.is_alive()) {
        enemy.step_toward(player_pos);
        if circles_overlap(player_pos, player_radius, enemy.pos, enemy.radius) {
            contacts += 1;
        }
    }
    if contacts == 0 || !state.player.is_alive() {
        return;
    }

    // Every overlapping enemy deals its share
    let damage = state.settings.contact_damage.for_step(elapsed_ms);
    let mut killed = false;
    for _ in 0..contacts {
        killed |= state.player.take_damage(damage);
    }
    state.events.push(GameEvent::PlayerHurt {
        health: state.player.health,
    });

    if killed {
        log::info!("Player defeated with score {}", state.score);
        state.end(EndReason::Defeated);
    }
}

/// Move projectiles, resolve hits, drop expired or off-screen ones
fn update_projectiles(state: &mut GameState) {
    let arena = state.arena;
    let enemies = &mut state.enemies;

    state.projectiles.retain_mut(|p| {
        p.pos += p.vel;
        p.lifetime = p.lifetime.saturating_sub(1);

        // Newest live enemy under the projectile absorbs it
        if let Some(enemy) = enemies
            .iter_mut()
            .rev()
            .find(|e| e.is_alive() && point_in_circle(p.pos, e.pos, e.radius))
        {
            enemy.take_damage(p.damage);
            return false;
        }

        p.lifetime > 0 && in_arena(p.pos, arena)
    });
}

/// Remove defeated enemies, scoring each and leaving an explosion behind
fn sweep_dead_enemies(state: &mut GameState) {
    let mut dead = Vec::new();
    state.enemies.retain(|e| {
        if e.is_alive() {
            true
        } else {
            dead.push((e.id, e.pos));
            false
        }
    });

    for (id, pos) in dead {
        state.score += ENEMY_KILL_SCORE;
        spawn_explosion(state, pos);
        state.events.push(GameEvent::EnemyKilled { id, pos });
        log::debug!("Enemy #{} defeated, score {}", id, state.score);
    }
}

/// Evenly spaced ring of particles
fn spawn_explosion(state: &mut GameState, pos: Vec2) {
    for i in 0..EXPLOSION_PARTICLES {
        let angle = std::f32::consts::TAU * i as f32 / EXPLOSION_PARTICLES as f32;
        let speed = state
            .rng
            .random_range(EXPLOSION_SPEED_MIN..=EXPLOSION_SPEED_MAX);
        let size = state.rng.random_range(4.0..=8.0);
        state.particles.push(Particle {
            pos,
            vel: unit_from_angle(angle) * speed,
            size,
            kind: ParticleKind::Explosion,
            lifetime: EXPLOSION_LIFETIME,
            max_lifetime: EXPLOSION_LIFETIME,
        });
    }
}

fn update_particles(state: &mut GameState) {
    state.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.lifetime = p.lifetime.saturating_sub(1);
        p.lifetime > 0
    });
}
