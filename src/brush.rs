// Round-capped strokes on the RGBA canvas.
// Used by the brush/eraser tools and by the outline strokes of the coloring book.

use crate::color;
use crate::tool::{Tool, ToolState};
use crate::types::{PixelBuffer, Point, Rgba};

/// How a stroke's coverage is mixed into the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Blend {
    /// Paint `color` on top.
    SourceOver(Rgba),
    /// Punch through to transparent.
    DestinationOut,
}

/// Apply one drag segment of the active tool. The fill tool doesn't stroke.
pub fn stroke_segment(buffer: &mut PixelBuffer, from: Point, to: Point, tool: &ToolState) {
    let blend = match tool.tool {
        Tool::Brush => Blend::SourceOver(tool.color),
        Tool::Eraser => Blend::DestinationOut,
        Tool::Fill => return,
    };
    draw_capsule(buffer, from, to, tool.brush_width, blend);
}

/// A thick line from `a` to `b` with round ends, `width` pixels across.
/// Edge pixels get partial coverage (1 pixel feather).
pub fn draw_capsule(buffer: &mut PixelBuffer, a: Point, b: Point, width: f32, blend: Blend) {
    if !(a.is_finite() && b.is_finite() && width.is_finite()) || width <= 0.0 {
        return;
    }
    let (w, h) = buffer.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let r = width * 0.5;

    // Scan just the bounding box, clamped to the canvas
    let reach = r + 1.0;
    let x0 = (a.x.min(b.x) - reach).floor().max(0.0) as u32;
    let y0 = (a.y.min(b.y) - reach).floor().max(0.0) as u32;
    let x1 = ((a.x.max(b.x) + reach).ceil().max(0.0) as u32).min(w - 1);
    let y1 = ((a.y.max(b.y) + reach).ceil().max(0.0) as u32).min(h - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }

    for y in y0..=y1 {
        for x in x0..=x1 {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let d = distance_to_segment(center, a, b);
            let coverage = (r + 0.5 - d).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let px = buffer.get_pixel_mut(x, y);
            *px = blend_pixel(*px, coverage, blend);
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Mix `coverage` (0..1) of the blend into one straight-alpha pixel.
pub fn blend_pixel(dst: Rgba, coverage: f32, blend: Blend) -> Rgba {
    let da = dst.0[3] as f32 / 255.0;
    match blend {
        Blend::DestinationOut => {
            let out_a = da * (1.0 - coverage);
            image::Rgba([dst.0[0], dst.0[1], dst.0[2], to_u8(out_a * 255.0)])
        }
        Blend::SourceOver(src) => {
            let sa = src.0[3] as f32 / 255.0 * coverage;
            let out_a = sa + da * (1.0 - sa);
            if out_a <= 0.0 {
                return color::TRANSPARENT;
            }
            let mix = |s: u8, d: u8| (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            image::Rgba([
                to_u8(mix(src.0[0], dst.0[0])),
                to_u8(mix(src.0[1], dst.0[1])),
                to_u8(mix(src.0[2], dst.0[2])),
                to_u8(out_a * 255.0),
            ])
        }
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba = image::Rgba([255, 255, 255, 255]);
    const BLUE: Rgba = image::Rgba([0, 0, 255, 255]);

    #[test]
    fn brush_paints_along_the_segment_only() {
        let mut buf = PixelBuffer::from_pixel(20, 20, WHITE);
        let tool = ToolState { color: BLUE, tool: Tool::Brush, brush_width: 4.0 };
        stroke_segment(&mut buf, Point::new(2.0, 10.0), Point::new(18.0, 10.0), &tool);

        assert_eq!(*buf.get_pixel(10, 9), BLUE);
        assert_eq!(*buf.get_pixel(10, 10), BLUE);
        assert_eq!(*buf.get_pixel(10, 2), WHITE);
        assert_eq!(*buf.get_pixel(10, 17), WHITE);
    }

    #[test]
    fn eraser_makes_pixels_transparent() {
        let mut buf = PixelBuffer::from_pixel(10, 10, WHITE);
        let tool = ToolState { color: BLUE, tool: Tool::Eraser, brush_width: 4.0 };
        stroke_segment(&mut buf, Point::new(5.0, 5.0), Point::new(5.0, 5.0), &tool);

        assert_eq!(buf.get_pixel(4, 4).0[3], 0);
        assert_eq!(*buf.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn fill_tool_never_strokes() {
        let mut buf = PixelBuffer::from_pixel(10, 10, WHITE);
        let tool = ToolState { color: BLUE, tool: Tool::Fill, brush_width: 8.0 };
        stroke_segment(&mut buf, Point::new(0.0, 0.0), Point::new(9.0, 9.0), &tool);
        assert!(buf.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn strokes_off_canvas_are_clipped() {
        let mut buf = PixelBuffer::from_pixel(10, 10, WHITE);
        draw_capsule(&mut buf, Point::new(-50.0, -50.0), Point::new(-40.0, -40.0), 3.0, Blend::SourceOver(BLUE));
        assert!(buf.pixels().all(|p| *p == WHITE));

        draw_capsule(&mut buf, Point::new(-5.0, 5.0), Point::new(50.0, 5.0), 2.0, Blend::SourceOver(BLUE));
        assert_eq!(*buf.get_pixel(0, 4), BLUE);
        assert_eq!(*buf.get_pixel(9, 4), BLUE);
    }

    #[test]
    fn partial_coverage_mixes_colours() {
        let px = blend_pixel(WHITE, 0.5, Blend::SourceOver(BLUE));
        assert_eq!(px.0[3], 255);
        assert!(px.0[0] > 100 && px.0[0] < 155);
        assert_eq!(px.0[2], 255);
    }

    #[test]
    fn source_over_onto_transparent_keeps_source_colour() {
        let px = blend_pixel(color::TRANSPARENT, 1.0, Blend::SourceOver(BLUE));
        assert_eq!(px, BLUE);
    }
}
