use colorbook::path::PathBuilder;
use colorbook::surface::RasterSurface;
use colorbook::{flood_fill, Error, FillOutcome, FillRequest, PixelBuffer, Point, RegionRegistry, Rgba, SkipReason, UndoStack};

const WHITE: Rgba = image::Rgba([255, 255, 255, 255]);
const BLACK: Rgba = image::Rgba([0, 0, 0, 255]);
const RED: Rgba = image::Rgba([255, 0, 0, 255]);

fn bordered_10x10() -> PixelBuffer {
    PixelBuffer::from_fn(10, 10, |x, y| {
        if x == 0 || y == 0 || x == 9 || y == 9 { BLACK } else { WHITE }
    })
}

#[test]
fn bordered_buffer_interior_fills_red() {
    let mut buf = bordered_10x10();
    let request = FillRequest::new((5, 5), RED).with_tolerance(10).with_ink_threshold(40);
    assert_eq!(flood_fill(&mut buf, &request).unwrap(), FillOutcome::Filled(64));

    let red = buf.pixels().filter(|p| **p == RED).count();
    let black = buf.pixels().filter(|p| **p == BLACK).count();
    assert_eq!((red, black), (64, 36));
}

#[test]
fn border_seed_is_ink_and_buffer_is_untouched() {
    let mut buf = bordered_10x10();
    let before = buf.as_raw().clone();
    assert_eq!(flood_fill(&mut buf, &FillRequest::new((0, 0), RED)).unwrap(), FillOutcome::Skipped(SkipReason::Ink));
    assert_eq!(buf.as_raw(), &before);
}

#[test]
fn every_ink_seed_is_skipped() {
    let buf = bordered_10x10();
    for (x, y, px) in buf.enumerate_pixels() {
        if *px != BLACK {
            continue;
        }
        let mut copy = buf.clone();
        let outcome = flood_fill(&mut copy, &FillRequest::new((x as i64, y as i64), RED)).unwrap();
        assert_eq!(outcome, FillOutcome::Skipped(SkipReason::Ink));
        assert_eq!(copy, buf);
    }
}

#[test]
fn fill_touches_only_the_seed_component() {
    // Two white rooms split by an ink wall at x = 5.
    let mut buf = PixelBuffer::from_fn(11, 6, |x, _| if x == 5 { BLACK } else { WHITE });
    let before = buf.clone();
    assert_eq!(flood_fill(&mut buf, &FillRequest::new((1, 1), RED)).unwrap(), FillOutcome::Filled(30));

    for (x, y, px) in buf.enumerate_pixels() {
        let expected = if x < 5 { RED } else { *before.get_pixel(x, y) };
        assert_eq!(*px, expected, "pixel ({x}, {y})");
    }
}

#[test]
fn out_of_bounds_seed_leaves_buffer_alone() {
    let mut buf = bordered_10x10();
    let err = flood_fill(&mut buf, &FillRequest::new((10, 3), RED)).unwrap_err();
    assert!(matches!(err, Error::OutOfBoundsSeed { x: 10, y: 3, .. }));
    assert_eq!(buf, bordered_10x10());
}

#[test]
fn undo_after_fill_restores_bytes() {
    let mut stack = UndoStack::new(20);
    let mut buf = bordered_10x10();
    stack.push_snapshot(&buf);
    flood_fill(&mut buf, &FillRequest::new((5, 5), RED)).unwrap();
    assert!(stack.undo(&mut buf));
    assert_eq!(buf.as_raw(), bordered_10x10().as_raw());
}

#[test]
fn twenty_five_pushes_twenty_undos() {
    let mut stack = UndoStack::new(20);
    let mut buf = bordered_10x10();
    for _ in 0..25 {
        stack.push_snapshot(&buf);
        buf.put_pixel(5, 5, image::Rgba([buf.get_pixel(5, 5).0[0].wrapping_sub(1), 255, 255, 255]));
    }
    let successes = (0..21).filter(|_| stack.undo(&mut buf)).count();
    assert_eq!(successes, 20);
    // The oldest five pushes are gone: we land on the state before push #6.
    assert_eq!(buf.get_pixel(5, 5).0[0], 250);
}

#[test]
fn overlapping_regions_and_restroke() {
    let mut registry = RegionRegistry::new();
    let first = registry.add_region(PathBuilder::new().rect(10.0, 10.0, 60.0, 60.0).build()).unwrap();
    let second = registry.add_region(PathBuilder::new().circle(40.0, 40.0, 20.0).build()).unwrap();
    assert_eq!(registry.hit_test(Point::new(40.0, 40.0)), Some(first));
    assert_eq!(registry.hit_test(Point::new(90.0, 90.0)), None);

    let mut canvas = PixelBuffer::from_pixel(100, 100, WHITE);
    let mut surface = RasterSurface::new(&mut canvas);
    registry.fill_region(first, RED, &mut surface).unwrap();

    assert_eq!(*canvas.get_pixel(15, 15), RED);
    // The circle outline lies inside the square and is stroked back on top.
    assert_eq!(*canvas.get_pixel(60, 40), BLACK);
    assert_eq!(*canvas.get_pixel(10, 40), BLACK);
    assert_ne!(first, second);
}

#[test]
fn vector_fill_then_raster_fill_respects_outlines() {
    // Outline a square on a blank canvas, then flood it from inside: the stroke acts as ink.
    let mut registry = RegionRegistry::new();
    registry.add_region(PathBuilder::new().rect(10.0, 10.0, 30.0, 30.0).build()).unwrap();
    let mut canvas = PixelBuffer::from_pixel(60, 60, WHITE);
    registry.stroke_all(&mut RasterSurface::new(&mut canvas));

    let outcome = flood_fill(&mut canvas, &FillRequest::new((25, 25), RED)).unwrap();
    assert!(outcome.changed());
    assert_eq!(*canvas.get_pixel(25, 25), RED);
    assert_eq!(*canvas.get_pixel(2, 2), WHITE);
}
