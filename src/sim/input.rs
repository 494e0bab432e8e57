//! Input aggregation
//!
//! Browser handlers push [`InputEvent`]s as they arrive; the simulation reads a
//! single [`TickInput`] snapshot per step. Keyboard, pointer and the touch
//! joystick are folded into one movement vector and one attack edge.

use glam::Vec2;

use super::tick::TickInput;
use crate::consts::JOYSTICK_MAX_DRAG;

/// Keys the arena reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Attack,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value (WASD, arrows, space)
    pub fn from_dom(key: &str) -> Option<Key> {
        match key.to_lowercase().as_str() {
            "arrowup" | "w" => Some(Key::Up),
            "arrowdown" | "s" => Some(Key::Down),
            "arrowleft" | "a" => Some(Key::Left),
            "arrowright" | "d" => Some(Key::Right),
            " " => Some(Key::Attack),
            _ => None,
        }
    }
}

/// Raw input as delivered by the platform, in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerMove(Vec2),
    /// Canvas click
    Click,
    TouchStart(Vec2),
    TouchMove(Vec2),
    TouchEnd,
}

/// Held direction keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    pub fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Attack => {}
        }
    }

    /// Movement from held keys; diagonals are scaled to unit length
    pub fn axis(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        if v.x != 0.0 && v.y != 0.0 {
            v *= std::f32::consts::FRAC_1_SQRT_2;
        }
        v
    }
}

/// Virtual joystick driven by a touch drag on the left half of the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Joystick {
    pub active: bool,
    /// Where the touch landed
    pub anchor: Vec2,
    /// Where the finger is now
    pub current: Vec2,
    /// Derived movement, magnitude ≤ 1
    pub vector: Vec2,
}

impl Joystick {
    pub fn begin(&mut self, point: Vec2) {
        self.active = true;
        self.anchor = point;
        self.current = point;
        self.vector = Vec2::ZERO;
    }

    pub fn drag(&mut self, point: Vec2) {
        if !self.active {
            return;
        }
        self.current = point;
        let delta = self.current - self.anchor;
        let dist = delta.length();
        self.vector = if dist > 0.0 {
            delta / dist * (dist.min(JOYSTICK_MAX_DRAG) / JOYSTICK_MAX_DRAG)
        } else {
            Vec2::ZERO
        };
    }

    pub fn end(&mut self) {
        *self = Self::default();
    }
}

/// Accumulated input between simulation steps
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keys: KeyState,
    pub joystick: Joystick,
    /// Last mouse or touch position
    pub pointer: Vec2,
    /// Attack requested since the last snapshot
    attack_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one platform event. `arena_width` splits touches into
    /// joystick (left half) and attack (right half).
    pub fn handle(&mut self, event: InputEvent, arena_width: f32) {
        match event {
            InputEvent::KeyDown(Key::Attack) => self.attack_requested = true,
            InputEvent::KeyDown(key) => self.keys.set(key, true),
            InputEvent::KeyUp(key) => self.keys.set(key, false),
            InputEvent::PointerMove(p) => self.pointer = p,
            InputEvent::Click => self.attack_requested = true,
            InputEvent::TouchStart(p) => {
                self.pointer = p;
                if p.x < arena_width / 2.0 {
                    self.joystick.begin(p);
                } else {
                    self.attack_requested = true;
                }
            }
            InputEvent::TouchMove(p) => self.joystick.drag(p),
            InputEvent::TouchEnd => self.joystick.end(),
        }
    }

    /// Current movement vector; an active joystick overrides the keyboard
    pub fn movement(&self) -> Vec2 {
        if self.joystick.active {
            self.joystick.vector
        } else {
            self.keys.axis()
        }
    }

    /// Snapshot for one step, consuming the attack edge
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            movement: self.movement(),
            pointer: self.pointer,
            attack: std::mem::take(&mut self.attack_requested),
        }
    }

    /// Drop held keys, joystick and any pending attack
    pub fn reset(&mut self) {
        let pointer = self.pointer;
        *self = Self {
            pointer,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_dom("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom("W"), Some(Key::Up));
        assert_eq!(Key::from_dom("s"), Some(Key::Down));
        assert_eq!(Key::from_dom("a"), Some(Key::Left));
        assert_eq!(Key::from_dom("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_dom(" "), Some(Key::Attack));
        assert_eq!(Key::from_dom("Escape"), None);
    }

    #[test]
    fn test_diagonal_matches_axis_speed() {
        let mut keys = KeyState::default();
        keys.set(Key::Right, true);
        let axis_len = keys.axis().length();
        keys.set(Key::Up, true);
        let diag = keys.axis();
        assert!((diag.length() - axis_len).abs() < 1e-6);
        assert!(diag.x > 0.0 && diag.y < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut keys = KeyState::default();
        keys.set(Key::Left, true);
        keys.set(Key::Right, true);
        keys.set(Key::Up, true);
        assert_eq!(keys.axis(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_joystick_clamps_to_drag_radius() {
        let mut j = Joystick::default();
        j.begin(Vec2::new(100.0, 100.0));
        j.drag(Vec2::new(300.0, 100.0));
        assert!((j.vector - Vec2::X).length() < 1e-6);
        j.drag(Vec2::new(100.0, 140.0));
        assert!((j.vector - Vec2::new(0.0, 0.5)).length() < 1e-6);
        j.drag(Vec2::new(100.0, 100.0));
        assert_eq!(j.vector, Vec2::ZERO);
    }

    #[test]
    fn test_joystick_overrides_keyboard() {
        let mut input = InputState::new();
        input.handle(InputEvent::KeyDown(Key::Right), 800.0);
        input.handle(InputEvent::TouchStart(Vec2::new(100.0, 300.0)), 800.0);
        // Active but not dragged yet: zero, not the keyboard vector
        assert_eq!(input.movement(), Vec2::ZERO);
        input.handle(InputEvent::TouchMove(Vec2::new(100.0, 220.0)), 800.0);
        assert!((input.movement() - Vec2::new(0.0, -1.0)).length() < 1e-6);
        input.handle(InputEvent::TouchEnd, 800.0);
        assert_eq!(input.movement(), Vec2::X);
        assert!(!input.joystick.active);
    }

    #[test]
    fn test_touch_right_half_attacks() {
        let mut input = InputState::new();
        input.handle(InputEvent::TouchStart(Vec2::new(600.0, 200.0)), 800.0);
        assert!(!input.joystick.active);
        let tick = input.snapshot();
        assert!(tick.attack);
        assert_eq!(tick.pointer, Vec2::new(600.0, 200.0));
    }

    #[test]
    fn test_attack_edge_consumed_once() {
        let mut input = InputState::new();
        input.handle(InputEvent::Click, 800.0);
        input.handle(InputEvent::KeyDown(Key::Attack), 800.0);
        assert!(input.snapshot().attack);
        assert!(!input.snapshot().attack);
    }

    #[test]
    fn test_reset_keeps_pointer() {
        let mut input = InputState::new();
        input.handle(InputEvent::PointerMove(Vec2::new(5.0, 6.0)), 800.0);
        input.handle(InputEvent::KeyDown(Key::Up), 800.0);
        input.handle(InputEvent::Click, 800.0);
        input.reset();
        let tick = input.snapshot();
        assert_eq!(tick.movement, Vec2::ZERO);
        assert!(!tick.attack);
        assert_eq!(tick.pointer, Vec2::new(5.0, 6.0));
    }

    proptest! {
        #[test]
        fn prop_joystick_magnitude_at_most_one(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            cx in -500.0f32..500.0, cy in -500.0f32..500.0,
        ) {
            let mut j = Joystick::default();
            j.begin(Vec2::new(ax, ay));
            j.drag(Vec2::new(cx, cy));
            prop_assert!(j.vector.length() <= 1.0 + 1e-5);
            prop_assert!(j.vector.x.abs() <= 1.0 + 1e-5 && j.vector.y.abs() <= 1.0 + 1e-5);
        }

        #[test]
        fn prop_keyboard_vector_is_zero_or_unit(
            up: bool, down: bool, left: bool, right: bool,
        ) {
            let keys = KeyState { up, down, left, right };
            let len = keys.axis().length();
            prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-6);
        }
    }
}
