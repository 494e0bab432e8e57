//! 2D canvas painter

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::colors::Color;
use super::frame::{DrawCommand, Frame, Stroke};

/// Paints [`Frame`]s onto a canvas element
pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    /// Wrap a canvas, or `None` if it has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Resize the backing store to the given CSS pixel size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Replay a frame, back to front
    pub fn paint(&self, frame: &Frame) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, frame.size.x as f64, frame.size.y as f64);
        for cmd in &frame.commands {
            match cmd {
                DrawCommand::Gradient { size, stops } => {
                    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, size.y as f64);
                    for (offset, color) in stops.iter() {
                        let _ = gradient.add_color_stop(*offset, &color.css());
                    }
                    ctx.set_fill_style_canvas_gradient(&gradient);
                    ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
                }
                DrawCommand::Ellipse {
                    center,
                    radii,
                    fill,
                } => {
                    ctx.begin_path();
                    let _ = ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        radii.x as f64,
                        radii.y as f64,
                        0.0,
                        0.0,
                        TAU,
                    );
                    self.fill(*fill);
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                } => {
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    if let Some(fill) = fill {
                        self.fill(*fill);
                    }
                    if let Some(stroke) = stroke {
                        self.stroke(*stroke);
                    }
                }
                DrawCommand::Rect { origin, size, fill } => {
                    ctx.set_fill_style_str(&fill.css());
                    ctx.fill_rect(
                        origin.x as f64,
                        origin.y as f64,
                        size.x as f64,
                        size.y as f64,
                    );
                }
                DrawCommand::Glyph {
                    text,
                    center,
                    size,
                    rotation,
                } => {
                    ctx.save();
                    let _ = ctx.translate(center.x as f64, center.y as f64);
                    if *rotation != 0.0 {
                        let _ = ctx.rotate(*rotation as f64);
                    }
                    ctx.set_font(&format!("{}px Arial", size));
                    ctx.set_text_align("center");
                    ctx.set_text_baseline("middle");
                    let _ = ctx.fill_text(text, 0.0, 0.0);
                    ctx.restore();
                }
            }
        }
    }

    fn fill(&self, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke(&self, stroke: Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.css());
        self.ctx.set_line_width(stroke.width as f64);
        self.ctx.stroke();
    }
}
