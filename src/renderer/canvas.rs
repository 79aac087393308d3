//! Canvas 2D surface for the browser

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Surface};
use crate::sim::Rect;

const DEBUG_FONT: &str = "12px system-ui";

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas; `None` if a 2D context is unavailable
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, f64::from(w), f64::from(h));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            f64::from(rect.pos.x),
            f64::from(rect.pos.y),
            f64::from(rect.size.x),
            f64::from(rect.size.y),
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius),
            0.0,
            TAU,
        );
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_triangle(&mut self, points: [Vec2; 3], color: Color) {
        let [a, b, c] = points;
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(a.x), f64::from(a.y));
        self.ctx.line_to(f64::from(b.x), f64::from(b.y));
        self.ctx.line_to(f64::from(c.x), f64::from(c.y));
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(DEBUG_FONT);
        let _ = self.ctx.fill_text(text, f64::from(pos.x), f64::from(pos.y));
    }
}
