//! Draw-command generation
//!
//! [`build_frame`] turns the current state into an ordered list of draw
//! commands, back to front. It never mutates the state; the painter replays
//! the list onto the canvas.

use glam::Vec2;

use super::colors::{self, Color};
use crate::sim::{GameState, Joystick, ParticleKind};

pub const PLAYER_GLYPH: &str = "🏄‍♂️";

/// Radii of the sand patch in the middle of the arena
const GROUND_RADII: Vec2 = Vec2::new(300.0, 200.0);
const HEALTH_BAR_HEIGHT: f32 = 5.0;
/// Gap between a body's top edge and its health bar
const HEALTH_BAR_GAP: f32 = 10.0;
const PROJECTILE_OUTLINE: f32 = 2.0;
const JOYSTICK_RING_RADIUS: f32 = 60.0;
const JOYSTICK_RING_WIDTH: f32 = 3.0;
const JOYSTICK_KNOB_RADIUS: f32 = 30.0;
const JOYSTICK_CENTER_RADIUS: f32 = 10.0;

const BACKGROUND_STOPS: &[(f32, Color)] = &[
    (0.0, colors::SKY),
    (0.5, colors::LAGOON),
    (1.0, colors::SAND),
];

/// Outline style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// A single painting operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Top-to-bottom gradient covering the whole surface
    Gradient {
        size: Vec2,
        stops: &'static [(f32, Color)],
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        fill: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Rect {
        origin: Vec2,
        size: Vec2,
        fill: Color,
    },
    /// Text glyph centered on `center`, rotated by `rotation` radians
    Glyph {
        text: &'static str,
        center: Vec2,
        /// Font size in pixels
        size: f32,
        rotation: f32,
    },
}

/// One frame's worth of draw commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub size: Vec2,
    pub commands: Vec<DrawCommand>,
}

/// Build the draw list for the current state
pub fn build_frame(state: &GameState, joystick: &Joystick) -> Frame {
    let size = state.arena;
    let mut commands = Vec::with_capacity(
        4 + state.particles.len() + state.projectiles.len() + state.enemies.len() * 3,
    );

    commands.push(DrawCommand::Gradient {
        size,
        stops: BACKGROUND_STOPS,
    });
    commands.push(DrawCommand::Ellipse {
        center: size / 2.0,
        radii: GROUND_RADII,
        fill: colors::GROUND,
    });

    for p in &state.particles {
        let base = match p.kind {
            ParticleKind::Muzzle => colors::GOLD,
            ParticleKind::Explosion => colors::CORAL,
        };
        commands.push(DrawCommand::Circle {
            center: p.pos,
            radius: p.size,
            fill: Some(base.faded(p.life_fraction())),
            stroke: None,
        });
    }

    for proj in &state.projectiles {
        commands.push(DrawCommand::Circle {
            center: proj.pos,
            radius: proj.radius,
            fill: Some(colors::GOLD),
            stroke: Some(Stroke {
                color: colors::CORAL,
                width: PROJECTILE_OUTLINE,
            }),
        });
    }

    for enemy in &state.enemies {
        commands.push(DrawCommand::Glyph {
            text: enemy.kind.glyph(),
            center: enemy.pos,
            size: enemy.radius * 2.0,
            rotation: 0.0,
        });
        commands.extend(health_bar(
            enemy.pos,
            enemy.radius,
            enemy.health,
            enemy.max_health,
        ));
    }

    let player = &state.player;
    commands.push(DrawCommand::Glyph {
        text: PLAYER_GLYPH,
        center: player.pos,
        size: player.radius * 2.0,
        rotation: player.facing,
    });
    commands.extend(health_bar(
        player.pos,
        player.radius,
        player.health,
        player.max_health,
    ));

    if joystick.active {
        commands.push(DrawCommand::Circle {
            center: joystick.anchor,
            radius: JOYSTICK_RING_RADIUS,
            fill: None,
            stroke: Some(Stroke {
                color: colors::JOYSTICK_RING,
                width: JOYSTICK_RING_WIDTH,
            }),
        });
        commands.push(DrawCommand::Circle {
            center: joystick.current,
            radius: JOYSTICK_KNOB_RADIUS,
            fill: Some(colors::JOYSTICK_KNOB),
            stroke: None,
        });
        commands.push(DrawCommand::Circle {
            center: joystick.anchor,
            radius: JOYSTICK_CENTER_RADIUS,
            fill: Some(colors::JOYSTICK_CENTER),
            stroke: None,
        });
    }

    Frame { size, commands }
}

/// Red background bar with a green overlay scaled to health/max
pub fn health_bar(center: Vec2, radius: f32, health: f32, max_health: f32) -> [DrawCommand; 2] {
    let width = radius * 2.0;
    let origin = Vec2::new(center.x - width / 2.0, center.y - radius - HEALTH_BAR_GAP);
    let ratio = if max_health > 0.0 {
        (health / max_health).clamp(0.0, 1.0)
    } else {
        0.0
    };
    [
        DrawCommand::Rect {
            origin,
            size: Vec2::new(width, HEALTH_BAR_HEIGHT),
            fill: colors::HEALTH_BACK,
        },
        DrawCommand::Rect {
            origin,
            size: Vec2::new(width * ratio, HEALTH_BAR_HEIGHT),
            fill: colors::HEALTH_FRONT,
        },
    ]
}
