//! Drawing abstraction
//!
//! The game loop only needs three primitives, so any 2D target (a browser
//! canvas, a terminal, a test recorder) can host it.

use glam::Vec2;

pub trait RenderSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str);
}

/// Discards every draw call
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn clear_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: &str) {}
    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _color: &str) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
}

/// Keeps every draw call for later inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued since the last clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }
}

impl RenderSurface for RecordingSurface {
    fn clear_rect(&mut self, _x: f32, _y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
    }
}
