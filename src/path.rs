//! Path descriptors for coloring-book regions.
//!
//! A path is plain data: an ordered list of [`PathCommand`]s, replayed the
//! same way a 2D canvas would. Nothing here holds drawing state; the
//! flattened outline is rebuilt from the commands whenever it is needed.

use std::f32::consts::TAU;

use crate::error::{Error, Result};
use crate::types::Point;

/// Curves are cut into straight pieces roughly this long (pixels).
const FLATTEN_STEP: f32 = 2.0;
const MAX_CURVE_PIECES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    /// Circular arc, angles in radians, measured clockwise on screen (y down).
    Arc { center: Point, radius: f32, start_angle: f32, end_angle: f32, anticlockwise: bool },
    /// Axis-aligned rectangle as its own closed subpath.
    Rect { origin: Point, width: f32, height: f32 },
    Close,
}

impl PathCommand {
    fn points(&self) -> Vec<Point> {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
            PathCommand::QuadTo { ctrl, to } => vec![ctrl, to],
            PathCommand::CubicTo { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
            PathCommand::Arc { center, .. } => vec![center],
            PathCommand::Rect { origin, .. } => vec![origin],
            PathCommand::Close => Vec::new(),
        }
    }

    fn is_finite(&self) -> bool {
        let scalars_ok = match *self {
            PathCommand::Arc { radius, start_angle, end_angle, .. } => {
                radius.is_finite() && start_angle.is_finite() && end_angle.is_finite()
            }
            PathCommand::Rect { width, height, .. } => width.is_finite() && height.is_finite(),
            _ => true,
        };
        scalars_ok && self.points().into_iter().all(Point::is_finite)
    }

    /// Commands that can begin a path without a prior move.
    fn opens_subpath(&self) -> bool {
        matches!(self, PathCommand::MoveTo(_) | PathCommand::Arc { .. } | PathCommand::Rect { .. })
    }
}

/// Which points count as "inside" a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    fn inside(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Fluent construction of a command list.
#[derive(Debug, Default, Clone)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(mut self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::QuadTo { ctrl: Point::new(cx, cy), to: Point::new(x, y) });
        self
    }

    pub fn cubic_to(mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::CubicTo {
            ctrl1: Point::new(c1x, c1y),
            ctrl2: Point::new(c2x, c2y),
            to: Point::new(x, y),
        });
        self
    }

    pub fn arc(mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32) -> Self {
        self.commands.push(PathCommand::Arc {
            center: Point::new(cx, cy),
            radius,
            start_angle,
            end_angle,
            anticlockwise: false,
        });
        self
    }

    pub fn circle(self, cx: f32, cy: f32, radius: f32) -> Self {
        self.arc(cx, cy, radius, 0.0, TAU)
    }

    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.commands.push(PathCommand::Rect { origin: Point::new(x, y), width, height });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn build(self) -> Vec<PathCommand> {
        self.commands
    }
}

/// Check a region definition and return it with a trailing `Close`.
pub fn closed_commands(commands: Vec<PathCommand>) -> Result<Vec<PathCommand>> {
    let Some(first) = commands.first() else {
        return Err(Error::InvalidGeometry("path has no commands".into()));
    };
    if !first.opens_subpath() {
        return Err(Error::InvalidGeometry(format!("path must start with a move, arc or rect, got {first:?}")));
    }
    if let Some(bad) = commands.iter().find(|c| !c.is_finite()) {
        return Err(Error::InvalidGeometry(format!("non-finite coordinate in {bad:?}")));
    }
    if let Some(bad) = commands.iter().find(|c| matches!(c, PathCommand::Arc { radius, .. } if *radius < 0.0)) {
        return Err(Error::InvalidGeometry(format!("negative arc radius in {bad:?}")));
    }

    let mut commands = commands;
    if commands.last() != Some(&PathCommand::Close) {
        commands.push(PathCommand::Close);
    }
    Ok(commands)
}

/// One flattened subpath.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    /// Explicitly closed (a `Close` or a `Rect`). Fills always treat the
    /// polyline as closed; strokes only draw the closing edge when set.
    pub closed: bool,
}

impl Polyline {
    /// Edges of the implicitly closed polygon.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Edges a stroke should draw.
    pub fn stroke_edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        let count = if self.closed { n } else { n.saturating_sub(1) };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// A command list turned into straight-edged subpaths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatPath {
    pub subpaths: Vec<Polyline>,
}

impl FlatPath {
    pub fn from_commands(commands: &[PathCommand]) -> Self {
        let mut flattener = Flattener::default();
        for command in commands {
            flattener.apply(command);
        }
        flattener.finish()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.subpaths.iter().flat_map(|s| s.points.iter().copied());
        let first = points.next()?;
        let mut bounds = Bounds { min: first, max: first };
        for p in points {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    /// Sum of signed crossings of all edges around `p`.
    pub fn winding_number(&self, p: Point) -> i32 {
        let mut winding = 0;
        for edge in self.subpaths.iter().flat_map(Polyline::edges) {
            let (a, b) = edge;
            if a.y <= p.y {
                if b.y > p.y && is_left(a, b, p) > 0.0 {
                    winding += 1;
                }
            } else if b.y <= p.y && is_left(a, b, p) < 0.0 {
                winding -= 1;
            }
        }
        winding
    }

    pub fn contains(&self, p: Point, rule: FillRule) -> bool {
        match self.bounds() {
            Some(bounds) if bounds.contains(p) => rule.inside(self.winding_number(p)),
            _ => false,
        }
    }
}

/// > 0 when `p` is left of the line a->b, < 0 when right, 0 when on it.
#[inline]
fn is_left(a: Point, b: Point, p: Point) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

/// Replays commands with canvas semantics and collects polylines.
#[derive(Default)]
struct Flattener {
    done: Vec<Polyline>,
    current: Vec<Point>,
}

impl Flattener {
    fn apply(&mut self, command: &PathCommand) {
        match *command {
            PathCommand::MoveTo(p) => {
                self.flush(false);
                self.current.push(p);
            }
            PathCommand::LineTo(p) => self.current.push(p),
            PathCommand::QuadTo { ctrl, to } => {
                let from = self.ensure_started(ctrl);
                let pieces = pieces_for(from.distance(ctrl) + ctrl.distance(to));
                for i in 1..=pieces {
                    let t = i as f32 / pieces as f32;
                    let mt = 1.0 - t;
                    self.current.push(Point::new(
                        mt * mt * from.x + 2.0 * mt * t * ctrl.x + t * t * to.x,
                        mt * mt * from.y + 2.0 * mt * t * ctrl.y + t * t * to.y,
                    ));
                }
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                let from = self.ensure_started(ctrl1);
                let pieces = pieces_for(from.distance(ctrl1) + ctrl1.distance(ctrl2) + ctrl2.distance(to));
                for i in 1..=pieces {
                    let t = i as f32 / pieces as f32;
                    let mt = 1.0 - t;
                    let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
                    self.current.push(Point::new(
                        a * from.x + b * ctrl1.x + c * ctrl2.x + d * to.x,
                        a * from.y + b * ctrl1.y + c * ctrl2.y + d * to.y,
                    ));
                }
            }
            PathCommand::Arc { center, radius, start_angle, end_angle, anticlockwise } => {
                let sweep = arc_sweep(start_angle, end_angle, anticlockwise);
                let pieces = pieces_for(sweep.abs() * radius);
                // The arc start joins the current subpath with a straight line,
                // or opens one when there is none.
                for i in 0..=pieces {
                    let angle = start_angle + sweep * (i as f32 / pieces as f32);
                    self.current.push(Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin()));
                }
            }
            PathCommand::Rect { origin, width, height } => {
                self.flush(false);
                self.current.extend([
                    origin,
                    Point::new(origin.x + width, origin.y),
                    Point::new(origin.x + width, origin.y + height),
                    Point::new(origin.x, origin.y + height),
                ]);
                self.flush(true);
                self.current.push(origin);
            }
            PathCommand::Close => {
                if let Some(&start) = self.current.first() {
                    self.flush(true);
                    self.current.push(start);
                }
            }
        }
    }

    fn ensure_started(&mut self, fallback: Point) -> Point {
        match self.current.last() {
            Some(&p) => p,
            None => {
                self.current.push(fallback);
                fallback
            }
        }
    }

    fn flush(&mut self, closed: bool) {
        let points = std::mem::take(&mut self.current);
        if points.len() >= 2 {
            self.done.push(Polyline { points, closed });
        }
    }

    fn finish(mut self) -> FlatPath {
        self.flush(false);
        FlatPath { subpaths: self.done }
    }
}

fn pieces_for(length: f32) -> usize {
    ((length / FLATTEN_STEP).ceil() as usize).clamp(1, MAX_CURVE_PIECES)
}

/// Signed sweep the way a canvas `arc()` resolves it.
fn arc_sweep(start: f32, end: f32, anticlockwise: bool) -> f32 {
    if anticlockwise {
        if start - end >= TAU { -TAU } else { -(start - end).rem_euclid(TAU) }
    } else if end - start >= TAU {
        TAU
    } else {
        (end - start).rem_euclid(TAU)
    }
}
