//! Fillable areas of a coloring-book page.
//!
//! Regions are kept in insertion order. Hit testing walks them in that order
//! and the first one containing the point wins, so when two regions overlap
//! the one added earlier takes the click, regardless of size or drawing order.

use std::fmt;

use crate::color;
use crate::error::{Error, Result};
use crate::path::{self, FillRule, FlatPath, PathCommand};
use crate::surface::Surface;
use crate::types::{Point, Rgba};

pub const OUTLINE_WIDTH: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

/// An id plus the commands that outline it. Geometry never changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: RegionId,
    commands: Vec<PathCommand>,
}

impl Region {
    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Flattened outline, rebuilt from the commands on each call.
    pub fn path(&self) -> FlatPath {
        FlatPath::from_commands(&self.commands)
    }

    pub fn contains(&self, p: Point, rule: FillRule) -> bool {
        self.path().contains(p, rule)
    }
}

/// Outline pen used when re-stroking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineStyle {
    pub color: Rgba,
    pub width: f32,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self { color: color::BLACK, width: OUTLINE_WIDTH }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    regions: Vec<Region>,
    next_id: u32,
    fill_rule: FillRule,
    outline: OutlineStyle,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outline(mut self, outline: OutlineStyle) -> Self {
        self.outline = outline;
        self
    }

    /// Append a region. The path is closed if it isn't already.
    pub fn add_region(&mut self, commands: Vec<PathCommand>) -> Result<RegionId> {
        let commands = path::closed_commands(commands)?;
        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.regions.push(Region { id, commands });
        tracing::debug!(%id, "region added");
        Ok(id)
    }

    /// First region (in insertion order) containing `p`.
    pub fn hit_test(&self, p: Point) -> Option<RegionId> {
        if !p.is_finite() {
            return None;
        }
        self.regions.iter().find(|r| r.contains(p, self.fill_rule)).map(Region::id)
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn outline(&self) -> OutlineStyle {
        self.outline
    }

    /// Drop every region. Ids keep counting up so old ids never match new regions.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Re-draw every outline, in insertion order.
    pub fn stroke_all(&self, surface: &mut impl Surface) {
        for region in &self.regions {
            surface.stroke_path(&region.commands, self.outline.color, self.outline.width);
        }
    }

    /// Paint a region, then put all outlines back on top of it.
    pub fn fill_region(&self, id: RegionId, color: Rgba, surface: &mut impl Surface) -> Result<()> {
        let region = self.get(id).ok_or(Error::UnknownRegion(id))?;
        surface.fill_path(&region.commands, color);
        self.stroke_all(surface);
        Ok(())
    }
}
