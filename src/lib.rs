//! Showdown Shores - a top-down beach arena brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, input, collisions, spawning)
//! - `session`: Match lifecycle and the virtual-clock driven frame loop
//! - `renderer`: Draw-command generation and the canvas painter
//! - `platform`: Browser glue (DOM-backed HUD)
//! - `settings`: Data-driven match tuning
//! - `ui`: Contract for the HUD that displays match state

pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use session::{FrameStatus, Session};
pub use settings::{ContactDamage, Settings, SettingsError};
pub use ui::{CooldownStatus, GameOverReport, Hud, LogHud};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal display refresh used by the native demo driver
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    pub const PLAYER_RADIUS: f32 = 40.0;
    /// Units per frame
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 35.0;
    pub const ENEMY_MAX_HEALTH: f32 = 50.0;
    pub const ENEMY_SPEED_MIN: f32 = 1.0;
    pub const ENEMY_SPEED_MAX: f32 = 2.5;
    /// Spawn distance outside the visible arena edge
    pub const ENEMY_SPAWN_OFFSET: f32 = 30.0;
    pub const ENEMY_KILL_SCORE: u32 = 10;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_RADIUS: f32 = 15.0;
    pub const PROJECTILE_DAMAGE: f32 = 25.0;
    /// Frames
    pub const PROJECTILE_LIFETIME: u32 = 100;

    /// Muzzle burst emitted on every accepted attack
    pub const MUZZLE_PARTICLES: usize = 8;
    /// Half-width of the aim jitter (radians)
    pub const MUZZLE_JITTER: f32 = 0.25;
    pub const MUZZLE_SPEED_MIN: f32 = 2.0;
    pub const MUZZLE_SPEED_MAX: f32 = 4.0;
    pub const MUZZLE_LIFETIME: u32 = 20;

    /// Radial explosion emitted when an enemy dies
    pub const EXPLOSION_PARTICLES: usize = 15;
    pub const EXPLOSION_SPEED_MIN: f32 = 2.0;
    pub const EXPLOSION_SPEED_MAX: f32 = 5.0;
    pub const EXPLOSION_LIFETIME: u32 = 30;

    /// Downward acceleration applied to particles (units/frame²)
    pub const PARTICLE_GRAVITY: f32 = 0.2;

    /// Touch joystick drag radius that maps to full speed
    pub const JOYSTICK_MAX_DRAG: f32 = 80.0;

    /// Countdown timer period
    pub const COUNTDOWN_PERIOD_MS: f64 = 1000.0;
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Clamp a circle center so the whole circle stays inside a `size` rectangle
/// anchored at the origin.
///
/// If the arena is smaller than the circle, the center is pinned to the middle
/// of that axis instead of producing an inverted range.
#[inline]
pub fn clamp_to_arena(pos: Vec2, radius: f32, size: Vec2) -> Vec2 {
    let clamp_axis = |v: f32, extent: f32| {
        if extent < radius * 2.0 {
            extent / 2.0
        } else {
            v.clamp(radius, extent - radius)
        }
    };
    Vec2::new(clamp_axis(pos.x, size.x), clamp_axis(pos.y, size.y))
}
