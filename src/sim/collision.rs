//! Collision tests
//!
//! Everything in the arena is a circle, so overlap is a center-distance check.
//! Comparisons are strict: touching circles do not collide.

use glam::Vec2;

/// Two circles overlap when their centers are closer than the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// A point is inside a circle when it is closer than the radius to the center
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// Whether a point lies within the arena rectangle `[0, size]` (edges inclusive)
#[inline]
pub fn in_arena(point: Vec2, size: Vec2) -> bool {
    point.x >= 0.0 && point.x <= size.x && point.y >= 0.0 && point.y <= size.y
}
