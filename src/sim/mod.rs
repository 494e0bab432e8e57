//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed per-frame increments for movement and physics
//! - Seeded RNG only
//! - Time only through explicit millisecond timestamps
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{Scheduler, TimerId, TimerKind};
pub use collision::{circles_overlap, in_arena, point_in_circle};
pub use input::{InputEvent, InputState, Joystick, Key, KeyState};
pub use spawn::{periodic_spawn, seed_enemies, spawn_enemy};
pub use state::{
    EndReason, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Particle, ParticleKind, Player,
    Projectile,
};
pub use tick::{TickInput, attack, countdown, tick};
