//! colorbook.toml handling

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color;
use crate::error::Result;
use crate::session::SessionSettings;
use crate::tool::ToolState;

/// Top-level configuration. Every section and key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub fill: FillConfig,
    #[serde(default)]
    pub undo: UndoConfig,
    #[serde(default)]
    pub brush: BrushConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

/// Flood fill tuning
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FillConfig {
    /// Max per-channel difference from the seed colour
    #[serde(default = "default_tolerance")]
    pub tolerance: u8,
    /// Pixels with R, G and B all below this are outline ink
    #[serde(default = "default_ink_threshold")]
    pub ink_threshold: u8,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self { tolerance: default_tolerance(), ink_threshold: default_ink_threshold() }
    }
}

fn default_tolerance() -> u8 {
    crate::fill::DEFAULT_TOLERANCE
}

fn default_ink_threshold() -> u8 {
    crate::fill::DEFAULT_INK_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UndoConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self { capacity: default_capacity() }
    }
}

fn default_capacity() -> usize {
    crate::undo::DEFAULT_UNDO_CAPACITY
}

/// Starting brush
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BrushConfig {
    #[serde(default = "default_brush_width")]
    pub width: f32,
    /// "#RRGGBB"
    #[serde(default = "default_brush_color")]
    pub color: String,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self { width: default_brush_width(), color: default_brush_color() }
    }
}

fn default_brush_width() -> f32 {
    5.0
}

fn default_brush_color() -> String {
    "#000000".to_string()
}

/// Blank canvas size and the largest picture side kept on load
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_max_size")]
    pub max_size: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: default_width(), height: default_height(), max_size: default_max_size() }
    }
}

fn default_width() -> u32 {
    crate::coloring::PAGE_WIDTH
}

fn default_height() -> u32 {
    crate::coloring::PAGE_HEIGHT
}

fn default_max_size() -> u32 {
    crate::session::DEFAULT_MAX_CANVAS
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::parse(&text)?;
        tracing::info!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            tolerance: self.fill.tolerance,
            ink_threshold: self.fill.ink_threshold,
            undo_capacity: self.undo.capacity,
            max_canvas: self.canvas.max_size,
        }
    }

    /// Starting tool state; fails on a malformed brush colour.
    pub fn tool_state(&self) -> Result<ToolState> {
        let color = color::parse_hex(&self.brush.color)?;
        Ok(ToolState::new(color, self.brush.width))
    }
}
