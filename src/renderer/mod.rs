//! Rendering module
//!
//! Rendering is split in two: [`build_frame`] turns state into a list of
//! draw commands, and on the web the [`CanvasPainter`] replays that list
//! onto a 2D canvas.

pub mod colors;
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use colors::Color;
pub use frame::{DrawCommand, Frame, Stroke, build_frame};
