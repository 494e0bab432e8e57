//! Colors for game elements

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled by `factor` (clamped to [0, 1])
    pub fn faded(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string for canvas styles
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

pub const SKY: Color = Color::rgb(0x87, 0xce, 0xeb);
pub const LAGOON: Color = Color::rgb(0x4e, 0xcd, 0xc4);
pub const SAND: Color = Color::rgb(0xf9, 0xf7, 0xf3);
pub const GROUND: Color = Color::rgba(249, 247, 243, 0.5);
pub const GOLD: Color = Color::rgb(0xff, 0xd7, 0x00);
pub const CORAL: Color = Color::rgb(0xff, 0x6b, 0x35);
pub const HEALTH_BACK: Color = Color::rgb(0xe7, 0x4c, 0x3c);
pub const HEALTH_FRONT: Color = Color::rgb(0x2e, 0xcc, 0x71);
pub const JOYSTICK_RING: Color = Color::rgba(255, 255, 255, 0.5);
pub const JOYSTICK_KNOB: Color = Color::rgba(255, 255, 255, 0.7);
pub const JOYSTICK_CENTER: Color = Color::rgba(78, 205, 196, 0.8);
