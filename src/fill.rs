//! Raster flood fill for the paint-and-fill canvas.
//!
//! The fill spreads from a seed pixel to its 4-connected neighbours whose
//! RGBA channels each stay within `tolerance` of the seed's original colour.
//! Dark outline pixels ("ink") are never filled, whatever the tolerance says,
//! so thin line art keeps the fill inside its shape.

use crate::error::{Error, Result};
use crate::types::{PixelBuffer, Rgba};

pub const DEFAULT_TOLERANCE: u8 = 10;
pub const DEFAULT_INK_THRESHOLD: u8 = 40;

/// What to fill and how picky to be about it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillRequest {
    pub seed: (i64, i64),
    /// Alpha is ignored; filled pixels are always fully opaque.
    pub color: Rgba,
    /// Max per-channel |a - b| for a pixel to join the seed's region.
    pub tolerance: u8,
    /// R, G and B all below this = ink.
    pub ink_threshold: u8,
}

impl FillRequest {
    pub fn new(seed: (i64, i64), color: Rgba) -> Self {
        Self { seed, color, tolerance: DEFAULT_TOLERANCE, ink_threshold: DEFAULT_INK_THRESHOLD }
    }

    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_ink_threshold(mut self, ink_threshold: u8) -> Self {
        self.ink_threshold = ink_threshold;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Seed landed on an outline pixel.
    Ink,
    /// Seed already has the target colour.
    NoChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    Filled(usize),
    Skipped(SkipReason),
}

impl FillOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, FillOutcome::Filled(n) if *n > 0)
    }
}

#[inline]
pub fn is_ink(px: &Rgba, ink_threshold: u8) -> bool {
    let [r, g, b, _] = px.0;
    r < ink_threshold && g < ink_threshold && b < ink_threshold
}

#[inline]
fn within_tolerance(a: &Rgba, b: &Rgba, tolerance: u8) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(&x, &y)| x.abs_diff(y) <= tolerance)
}

/// Fill the region under `request.seed` in place.
pub fn flood_fill(buffer: &mut PixelBuffer, request: &FillRequest) -> Result<FillOutcome> {
    let (width, height) = buffer.dimensions();
    let (sx, sy) = request.seed;
    if sx < 0 || sy < 0 || sx >= width as i64 || sy >= height as i64 {
        return Err(Error::OutOfBoundsSeed { x: sx, y: sy, width, height });
    }
    let (sx, sy) = (sx as u32, sy as u32);

    let seed_color = *buffer.get_pixel(sx, sy);
    if is_ink(&seed_color, request.ink_threshold) {
        tracing::debug!(x = sx, y = sy, "fill skipped: seed is ink");
        return Ok(FillOutcome::Skipped(SkipReason::Ink));
    }

    let [r, g, b, _] = request.color.0;
    let target = image::Rgba([r, g, b, 255]);
    if seed_color == target {
        tracing::debug!(x = sx, y = sy, "fill skipped: seed already has the target colour");
        return Ok(FillOutcome::Skipped(SkipReason::NoChange));
    }

    // Visited flags, one per pixel, indexed y * width + x.
    let w = width as usize;
    let mut visited = vec![false; w * height as usize];
    let mut work: Vec<(u32, u32)> = vec![(sx, sy)];
    let mut filled = 0usize;

    while let Some((x, y)) = work.pop() {
        let idx = y as usize * w + x as usize;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;

        let px = buffer.get_pixel(x, y);
        if is_ink(px, request.ink_threshold) || !within_tolerance(px, &seed_color, request.tolerance) {
            continue;
        }

        buffer.put_pixel(x, y, target);
        filled += 1;

        // Neighbours off the edge are simply not pushed.
        if x > 0 {
            work.push((x - 1, y));
        }
        if x + 1 < width {
            work.push((x + 1, y));
        }
        if y > 0 {
            work.push((x, y - 1));
        }
        if y + 1 < height {
            work.push((x, y + 1));
        }
    }

    tracing::debug!(x = sx, y = sy, filled, "flood fill done");
    Ok(FillOutcome::Filled(filled))
}
