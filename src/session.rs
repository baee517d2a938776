//! The trace/paint-and-fill canvas.
//!
//! A session owns the canvas, the picture it was loaded from, the undo
//! history and the current tool. Every mutation (a whole brush stroke, a
//! fill, a clear) leaves exactly one snapshot behind to undo it.

use std::path::Path;

use image::imageops::FilterType;

use crate::brush;
use crate::color;
use crate::error::{Error, Result};
use crate::fill::{self, FillOutcome, FillRequest};
use crate::tool::{Tool, ToolState};
use crate::types::{PixelBuffer, Point, Rgba};
use crate::undo::UndoStack;

pub const DEFAULT_MAX_CANVAS: u32 = 800;

/// Fill and history knobs, usually from colorbook.toml.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub tolerance: u8,
    pub ink_threshold: u8,
    pub undo_capacity: usize,
    pub max_canvas: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tolerance: fill::DEFAULT_TOLERANCE,
            ink_threshold: fill::DEFAULT_INK_THRESHOLD,
            undo_capacity: crate::undo::DEFAULT_UNDO_CAPACITY,
            max_canvas: DEFAULT_MAX_CANVAS,
        }
    }
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickEffect {
    Fill(FillOutcome),
    /// Brush/eraser clicks start a stroke instead.
    StrokeStarted,
}

pub struct PaintSession {
    canvas: PixelBuffer,
    original: PixelBuffer,
    undo: UndoStack,
    tool: ToolState,
    settings: SessionSettings,
    // Stroke in progress: last pointer position and whether it has been snapshotted yet.
    stroke: Option<(Point, bool)>,
    showing_original: bool,
}

impl PaintSession {
    pub fn new(picture: PixelBuffer, tool: ToolState, settings: SessionSettings) -> Self {
        let picture = fit_to(picture, settings.max_canvas);
        Self {
            canvas: picture.clone(),
            original: picture,
            undo: UndoStack::new(settings.undo_capacity),
            tool,
            settings,
            stroke: None,
            showing_original: false,
        }
    }

    /// White canvas of the given size, for painting without a picture.
    pub fn blank(width: u32, height: u32, tool: ToolState, settings: SessionSettings) -> Self {
        Self::new(PixelBuffer::from_pixel(width, height, color::WHITE), tool, settings)
    }

    pub fn open(path: impl AsRef<Path>, tool: ToolState, settings: SessionSettings) -> Result<Self> {
        let path = path.as_ref();
        let picture = image::open(path)
            .map_err(|source| Error::ImageLoad { path: path.to_path_buf(), source })?
            .to_rgba8();
        tracing::info!(path = %path.display(), width = picture.width(), height = picture.height(), "picture loaded");
        Ok(Self::new(picture, tool, settings))
    }

    /// Pointer went down. The fill tool fills right away; brush and eraser start a stroke.
    pub fn click(&mut self, p: Point) -> Result<ClickEffect> {
        match self.tool.tool {
            Tool::Fill => self.fill_at(p).map(ClickEffect::Fill),
            Tool::Brush | Tool::Eraser => {
                self.begin_stroke(p);
                Ok(ClickEffect::StrokeStarted)
            }
        }
    }

    /// Snapshot first, fill second; the snapshot only lands in history if pixels changed.
    pub fn fill_at(&mut self, p: Point) -> Result<FillOutcome> {
        let request = FillRequest::new((pixel_coord(p.x), pixel_coord(p.y)), self.tool.color)
            .with_tolerance(self.settings.tolerance)
            .with_ink_threshold(self.settings.ink_threshold);

        let snapshot = self.canvas.clone();
        let outcome = fill::flood_fill(&mut self.canvas, &request)?;
        if outcome.changed() {
            self.undo.push(snapshot);
        }
        Ok(outcome)
    }

    pub fn begin_stroke(&mut self, p: Point) {
        self.stroke = Some((p, false));
        // A click without movement still leaves a dot.
        self.drag_to(p);
    }

    pub fn drag_to(&mut self, p: Point) {
        let Some((last, snapshotted)) = self.stroke else { return };
        if self.tool.tool == Tool::Fill {
            return;
        }
        if !snapshotted {
            self.undo.push_snapshot(&self.canvas);
        }
        brush::stroke_segment(&mut self.canvas, last, p, &self.tool);
        self.stroke = Some((p, true));
    }

    pub fn end_stroke(&mut self) {
        self.stroke = None;
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        self.undo.undo(&mut self.canvas)
    }

    /// Back to the loaded picture. Undoable.
    pub fn clear_canvas(&mut self) {
        self.end_stroke();
        if self.canvas == self.original {
            return;
        }
        self.undo.push_snapshot(&self.canvas);
        self.canvas = self.original.clone();
        tracing::info!("canvas cleared");
    }

    /// Start over on a new picture; history is dropped.
    pub fn new_image(&mut self, picture: PixelBuffer) {
        self.end_stroke();
        let picture = fit_to(picture, self.settings.max_canvas);
        self.canvas = picture.clone();
        self.original = picture;
        self.undo.clear();
        self.showing_original = false;
        tracing::info!(width = self.canvas.width(), height = self.canvas.height(), "new picture");
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.canvas
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| Error::ImageSave { path: path.to_path_buf(), source })?;
        tracing::info!(path = %path.display(), "painting saved");
        Ok(())
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.tool.set_color(color);
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.end_stroke();
        self.tool.tool = tool;
    }

    pub fn set_brush_width(&mut self, width: f32) {
        self.tool.set_brush_width(width);
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    pub fn history_len(&self) -> usize {
        self.undo.len()
    }

    /// Flip between the painting and the untouched picture. Returns the new state.
    pub fn toggle_original(&mut self) -> bool {
        self.end_stroke();
        self.showing_original = !self.showing_original;
        tracing::debug!(showing = self.showing_original, "original picture toggled");
        self.showing_original
    }

    pub fn showing_original(&self) -> bool {
        self.showing_original
    }

    /// What the window should show: the painting, or the picture while it is toggled on.
    pub fn view(&self) -> &PixelBuffer {
        if self.showing_original { &self.original } else { &self.canvas }
    }
}

/// Pointer coordinate to pixel index. Non-finite values land far outside any buffer.
fn pixel_coord(v: f32) -> i64 {
    if v.is_finite() { v.floor() as i64 } else { i64::MIN }
}

/// Shrink (never grow) so neither side exceeds `max_side`, keeping the aspect ratio.
pub fn fit_to(picture: PixelBuffer, max_side: u32) -> PixelBuffer {
    let (w, h) = picture.dimensions();
    if max_side == 0 || (w <= max_side && h <= max_side) {
        return picture;
    }
    let ratio = (max_side as f32 / w as f32).min(max_side as f32 / h as f32);
    let nw = ((w as f32 * ratio).round() as u32).max(1);
    let nh = ((h as f32 * ratio).round() as u32).max(1);
    tracing::debug!(from_w = w, from_h = h, to_w = nw, to_h = nh, "scaling picture down");
    image::imageops::resize(&picture, nw, nh, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::SkipReason;

    const RED: Rgba = image::Rgba([255, 0, 0, 255]);

    /// 10x10 white page with a black frame.
    fn page() -> PixelBuffer {
        PixelBuffer::from_fn(10, 10, |x, y| {
            if x == 0 || y == 0 || x == 9 || y == 9 { color::BLACK } else { color::WHITE }
        })
    }

    fn session() -> PaintSession {
        let mut tool = ToolState::new(RED, 2.0);
        tool.tool = Tool::Fill;
        PaintSession::new(page(), tool, SessionSettings::default())
    }

    #[test]
    fn fill_click_records_one_undo_step() {
        let mut s = session();
        let effect = s.click(Point::new(5.5, 5.5)).unwrap();
        assert_eq!(effect, ClickEffect::Fill(FillOutcome::Filled(64)));
        assert_eq!(s.history_len(), 1);

        assert!(s.undo());
        assert_eq!(s.canvas(), &page());
        assert!(!s.undo());
    }

    #[test]
    fn skipped_fill_leaves_no_history() {
        let mut s = session();
        let effect = s.click(Point::new(0.0, 0.0)).unwrap();
        assert_eq!(effect, ClickEffect::Fill(FillOutcome::Skipped(SkipReason::Ink)));
        assert_eq!(s.history_len(), 0);
    }

    #[test]
    fn fill_outside_canvas_errors_without_history() {
        let mut s = session();
        assert!(s.click(Point::new(-3.0, 4.0)).is_err());
        assert_eq!(s.history_len(), 0);
        assert_eq!(s.canvas(), &page());
    }

    #[test]
    fn non_finite_pointer_is_out_of_bounds() {
        let mut s = session();
        for p in [Point::new(f32::NAN, f32::NAN), Point::new(f32::INFINITY, 2.0), Point::new(3.0, f32::NEG_INFINITY)] {
            let err = s.click(p).unwrap_err();
            assert!(matches!(err, Error::OutOfBoundsSeed { .. }), "{p:?}");
        }
        assert_eq!(s.history_len(), 0);
        assert_eq!(s.canvas(), &page());
    }

    #[test]
    fn original_can_be_shown_beside_the_painting() {
        let mut s = session();
        s.fill_at(Point::new(5.0, 5.0)).unwrap();
        assert_eq!(s.view(), s.canvas());

        assert!(s.toggle_original());
        assert_eq!(s.view(), &page());
        assert_eq!(*s.canvas().get_pixel(5, 5), RED);

        assert!(!s.toggle_original());
        assert_eq!(*s.view().get_pixel(5, 5), RED);

        s.toggle_original();
        s.new_image(PixelBuffer::from_pixel(4, 4, color::WHITE));
        assert!(!s.showing_original());
    }

    #[test]
    fn save_to_missing_directory_reports_the_path() {
        let s = session();
        let err = s.save_png("/definitely/not/here/out.png").unwrap_err();
        assert!(matches!(err, Error::ImageSave { ref path, .. } if path.ends_with("out.png")));
    }

    #[test]
    fn open_missing_picture_is_a_load_error() {
        let err = PaintSession::open("/definitely/not/here/in.png", ToolState::default(), SessionSettings::default())
            .err()
            .unwrap();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }

    #[test]
    fn a_whole_stroke_is_one_undo_step() {
        let mut s = session();
        s.set_tool(Tool::Brush);
        assert_eq!(s.click(Point::new(2.0, 2.0)).unwrap(), ClickEffect::StrokeStarted);
        s.drag_to(Point::new(5.0, 5.0));
        s.drag_to(Point::new(7.0, 3.0));
        s.end_stroke();

        assert_eq!(s.history_len(), 1);
        assert_ne!(s.canvas(), &page());
        assert!(s.undo());
        assert_eq!(s.canvas(), &page());
    }

    #[test]
    fn drag_without_press_does_nothing() {
        let mut s = session();
        s.set_tool(Tool::Brush);
        s.drag_to(Point::new(5.0, 5.0));
        assert_eq!(s.history_len(), 0);
        assert_eq!(s.canvas(), &page());
    }

    #[test]
    fn clear_restores_original_and_is_undoable() {
        let mut s = session();
        s.fill_at(Point::new(5.0, 5.0)).unwrap();
        s.clear_canvas();
        assert_eq!(s.canvas(), &page());
        assert_eq!(s.history_len(), 2);

        assert!(s.undo());
        assert_eq!(*s.canvas().get_pixel(5, 5), RED);
    }

    #[test]
    fn new_image_drops_history() {
        let mut s = session();
        s.fill_at(Point::new(5.0, 5.0)).unwrap();
        s.new_image(PixelBuffer::from_pixel(4, 4, color::WHITE));
        assert_eq!(s.history_len(), 0);
        assert_eq!(s.canvas().dimensions(), (4, 4));
        assert_eq!(s.original(), s.canvas());
    }

    #[test]
    fn history_is_capped() {
        let settings = SessionSettings { undo_capacity: 3, ..SessionSettings::default() };
        let mut tool = ToolState::new(RED, 1.0);
        tool.tool = Tool::Fill;
        let mut s = PaintSession::new(page(), tool, settings);
        for (i, c) in color::PALETTE.iter().take(5).enumerate() {
            s.set_color(*c);
            assert!(s.fill_at(Point::new(5.0, 5.0)).unwrap().changed(), "fill {i}");
        }
        assert_eq!(s.history_len(), 3);
    }

    #[test]
    fn large_pictures_are_scaled_down() {
        let big = PixelBuffer::from_pixel(1600, 400, color::WHITE);
        let fitted = fit_to(big, 800);
        assert_eq!(fitted.dimensions(), (800, 200));

        let small = PixelBuffer::from_pixel(100, 50, color::WHITE);
        assert_eq!(fit_to(small, 800).dimensions(), (100, 50));
    }
}
