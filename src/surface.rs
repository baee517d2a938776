//! Drawing surfaces the region registry renders onto.

use crate::brush::{self, Blend};
use crate::path::{FillRule, FlatPath, PathCommand};
use crate::types::{PixelBuffer, Point, Rgba};

/// Anything that can fill and stroke a path.
pub trait Surface {
    fn fill_path(&mut self, commands: &[PathCommand], color: Rgba);
    fn stroke_path(&mut self, commands: &[PathCommand], color: Rgba, width: f32);
}

/// Software rasterizer over an RGBA canvas.
/// Fills sample pixel centres with the nonzero rule, like `RegionRegistry::hit_test`.
pub struct RasterSurface<'a> {
    buffer: &'a mut PixelBuffer,
    fill_rule: FillRule,
}

impl<'a> RasterSurface<'a> {
    pub fn new(buffer: &'a mut PixelBuffer) -> Self {
        Self { buffer, fill_rule: FillRule::NonZero }
    }

    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }
}

impl Surface for RasterSurface<'_> {
    fn fill_path(&mut self, commands: &[PathCommand], color: Rgba) {
        let flat = FlatPath::from_commands(commands);
        let Some(bounds) = flat.bounds() else { return };
        let (w, h) = self.buffer.dimensions();
        if w == 0 || h == 0 {
            return;
        }

        let x0 = bounds.min.x.floor().max(0.0) as u32;
        let y0 = bounds.min.y.floor().max(0.0) as u32;
        let x1 = (bounds.max.x.ceil().max(0.0) as u32).min(w - 1);
        let y1 = (bounds.max.y.ceil().max(0.0) as u32).min(h - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        for y in y0..=y1 {
            for x in x0..=x1 {
                if flat.contains(Point::new(x as f32 + 0.5, y as f32 + 0.5), self.fill_rule) {
                    let px = self.buffer.get_pixel_mut(x, y);
                    *px = brush::blend_pixel(*px, 1.0, Blend::SourceOver(color));
                }
            }
        }
    }

    fn stroke_path(&mut self, commands: &[PathCommand], color: Rgba, width: f32) {
        let flat = FlatPath::from_commands(commands);
        for polyline in &flat.subpaths {
            for (a, b) in polyline.stroke_edges() {
                brush::draw_capsule(self.buffer, a, b, width, Blend::SourceOver(color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathBuilder;

    const WHITE: Rgba = image::Rgba([255, 255, 255, 255]);
    const GREEN: Rgba = image::Rgba([0, 200, 0, 255]);
    const BLACK: Rgba = image::Rgba([0, 0, 0, 255]);

    #[test]
    fn fill_covers_inside_pixels() {
        let mut buf = PixelBuffer::from_pixel(20, 20, WHITE);
        let square = PathBuilder::new().rect(5.0, 5.0, 10.0, 10.0).build();
        RasterSurface::new(&mut buf).fill_path(&square, GREEN);

        assert_eq!(*buf.get_pixel(5, 5), GREEN);
        assert_eq!(*buf.get_pixel(14, 14), GREEN);
        assert_eq!(*buf.get_pixel(4, 10), WHITE);
        assert_eq!(*buf.get_pixel(15, 10), WHITE);
        assert_eq!(buf.pixels().filter(|p| **p == GREEN).count(), 100);
    }

    #[test]
    fn stroke_draws_outline_not_interior() {
        let mut buf = PixelBuffer::from_pixel(40, 40, WHITE);
        let square = PathBuilder::new().rect(10.0, 10.0, 20.0, 20.0).build();
        RasterSurface::new(&mut buf).stroke_path(&square, BLACK, 3.0);

        assert_eq!(*buf.get_pixel(20, 10), BLACK);
        assert_eq!(*buf.get_pixel(29, 20), BLACK);
        assert_eq!(*buf.get_pixel(20, 20), WHITE);
    }

    #[test]
    fn open_path_stroke_skips_closing_edge() {
        let mut buf = PixelBuffer::from_pixel(40, 40, WHITE);
        let open = PathBuilder::new().move_to(5.0, 5.0).line_to(35.0, 5.0).line_to(35.0, 35.0).build();
        RasterSurface::new(&mut buf).stroke_path(&open, BLACK, 2.0);

        assert_eq!(*buf.get_pixel(20, 4), BLACK);
        // Diagonal from (35,35) back to (5,5) is not drawn.
        assert_eq!(*buf.get_pixel(20, 20), WHITE);
    }

    #[test]
    fn fill_off_canvas_is_ignored() {
        let mut buf = PixelBuffer::from_pixel(10, 10, WHITE);
        let far = PathBuilder::new().rect(100.0, 100.0, 5.0, 5.0).build();
        RasterSurface::new(&mut buf).fill_path(&far, GREEN);
        assert!(buf.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn even_odd_leaves_nested_square_empty() {
        let frame = PathBuilder::new().rect(2.0, 2.0, 16.0, 16.0).rect(7.0, 7.0, 6.0, 6.0).build();

        let mut nonzero = PixelBuffer::from_pixel(20, 20, WHITE);
        RasterSurface::new(&mut nonzero).fill_path(&frame, GREEN);
        assert_eq!(*nonzero.get_pixel(10, 10), GREEN);

        let mut even_odd = PixelBuffer::from_pixel(20, 20, WHITE);
        RasterSurface::new(&mut even_odd).with_fill_rule(FillRule::EvenOdd).fill_path(&frame, GREEN);
        assert_eq!(*even_odd.get_pixel(10, 10), WHITE);
        assert_eq!(*even_odd.get_pixel(4, 10), GREEN);
    }
}
