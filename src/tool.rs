// What the pointer does right now. Passed into strokes and fills explicitly.

use crate::color;
use crate::types::Rgba;

pub const MIN_BRUSH_WIDTH: f32 = 1.0;
pub const MAX_BRUSH_WIDTH: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Fill,
}

impl Tool {
    pub fn label(self) -> &'static str {
        match self {
            Tool::Brush => "BRUSH",
            Tool::Eraser => "ERASER",
            Tool::Fill => "FILL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    pub color: Rgba,
    pub tool: Tool,
    pub brush_width: f32,
}

impl ToolState {
    pub fn new(color: Rgba, brush_width: f32) -> Self {
        Self { color, tool: Tool::Brush, brush_width: clamp_width(brush_width) }
    }

    /// Picking a colour while erasing goes back to the brush.
    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
        if self.tool == Tool::Eraser {
            self.tool = Tool::Brush;
        }
    }

    pub fn set_brush_width(&mut self, width: f32) {
        self.brush_width = clamp_width(width);
    }
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(color::BLACK, 5.0)
    }
}

fn clamp_width(width: f32) -> f32 {
    if width.is_finite() { width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH) } else { MIN_BRUSH_WIDTH }
}
