//! In-memory surface that records draw calls
//!
//! Used by the headless native runner and by tests.

use glam::Vec2;

use super::{Color, Surface};
use crate::sim::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect { rect: Rect, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Triangle { points: [Vec2; 3], color: Color },
    Text { text: String, pos: Vec2, color: Color },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Change the reported size, like a browser window resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Remove and return everything recorded so far
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Text drawn so far, in order
    pub fn texts(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.commands.push(DrawCommand::Triangle { points, color });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            color,
        });
    }
}
