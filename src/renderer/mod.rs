//! 2D rendering module
//!
//! The game draws through the [`Surface`] trait: a canvas in the browser, an
//! in-memory command list everywhere else. Surface size is read every frame.

pub mod recording;
pub mod shapes;
pub mod theme;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use shapes::draw_frame;
pub use theme::{THEMES, Theme};

use glam::Vec2;

use crate::sim::{Rect, Viewport};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string for canvas fill styles
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

/// A 2D drawing target
pub trait Surface {
    /// Current pixel dimensions (width, height)
    fn size(&self) -> (f32, f32);

    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_triangle(&mut self, points: [Vec2; 3], color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, color: Color);

    /// Simulation view of the current size
    fn viewport(&self) -> Viewport {
        let (width, height) = self.size();
        Viewport::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_colors() {
        assert_eq!(Color::rgb(0x8e, 0xd0, 0xff).to_css(), "#8ed0ff");
        assert_eq!(Color::rgba(0, 0, 0, 0).to_css(), "rgba(0, 0, 0, 0.000)");
    }
}
