//! Click-to-color picture book.
//!
//! The page is a set of vector regions drawn as black outlines on white.
//! Clicking inside a region paints it with the current colour (white with the
//! eraser), then every outline is stroked again so fills never cover lines.

use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, PI};

use crate::color;
use crate::error::Result;
use crate::path::{PathBuilder, PathCommand};
use crate::region::{RegionId, RegionRegistry};
use crate::surface::{RasterSurface, Surface};
use crate::tool::{Tool, ToolState};
use crate::types::{PixelBuffer, Point, Rgba};

pub const PAGE_WIDTH: u32 = 800;
pub const PAGE_HEIGHT: u32 = 600;

/// Shapes of one page: fillable regions plus lines that are only ever stroked.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub regions: Vec<Vec<PathCommand>>,
    pub decorations: Vec<Vec<PathCommand>>,
}

/// The hot air balloon page: four envelope panels, a basket, three clouds and three stars.
pub fn balloon_scene() -> Scene {
    let (cx, cy) = (400.0, 250.0);
    let (bw, bh) = (200.0, 220.0);
    let mut scene = Scene::default();

    // Envelope, left to right
    scene.regions.push(
        PathBuilder::new()
            .move_to(cx - bw / 2.0, cy)
            .quad_to(cx - bw / 2.0, cy - bh / 2.0, cx - bw / 6.0, cy - bh / 2.0)
            .line_to(cx - bw / 6.0, cy + bh / 3.0)
            .quad_to(cx - bw / 3.0, cy + bh / 2.0, cx - bw / 2.0, cy)
            .close()
            .build(),
    );
    scene.regions.push(
        PathBuilder::new()
            .move_to(cx - bw / 6.0, cy - bh / 2.0)
            .line_to(cx, cy - bh / 2.0)
            .line_to(cx, cy + bh / 3.0)
            .line_to(cx - bw / 6.0, cy + bh / 3.0)
            .close()
            .build(),
    );
    scene.regions.push(
        PathBuilder::new()
            .move_to(cx, cy - bh / 2.0)
            .line_to(cx + bw / 6.0, cy - bh / 2.0)
            .line_to(cx + bw / 6.0, cy + bh / 3.0)
            .line_to(cx, cy + bh / 3.0)
            .close()
            .build(),
    );
    scene.regions.push(
        PathBuilder::new()
            .move_to(cx + bw / 6.0, cy - bh / 2.0)
            .quad_to(cx + bw / 2.0, cy - bh / 2.0, cx + bw / 2.0, cy)
            .quad_to(cx + bw / 3.0, cy + bh / 2.0, cx + bw / 6.0, cy + bh / 3.0)
            .close()
            .build(),
    );

    // Basket
    scene.regions.push(PathBuilder::new().rect(cx - 40.0, cy + bh / 2.0 + 20.0, 80.0, 60.0).close().build());

    // Ropes
    scene.decorations.push(
        PathBuilder::new().move_to(cx - bw / 6.0, cy + bh / 3.0).line_to(cx - 35.0, cy + bh / 2.0 + 20.0).build(),
    );
    scene.decorations.push(
        PathBuilder::new().move_to(cx + bw / 6.0, cy + bh / 3.0).line_to(cx + 35.0, cy + bh / 2.0 + 20.0).build(),
    );

    for (x, y) in [(150.0, 150.0), (650.0, 200.0), (700.0, 400.0)] {
        scene.regions.push(cloud(x, y));
    }
    for (x, y, outer, inner) in [(100.0, 400.0, 30.0, 15.0), (150.0, 480.0, 25.0, 12.0), (680.0, 100.0, 30.0, 15.0)] {
        scene.regions.push(star(x, y, 5, outer, inner));
    }

    scene
}

/// Four overlapping circles.
pub fn cloud(x: f32, y: f32) -> Vec<PathCommand> {
    PathBuilder::new()
        .circle(x, y, 25.0)
        .circle(x + 25.0, y - 10.0, 30.0)
        .circle(x + 50.0, y, 25.0)
        .circle(x + 30.0, y + 10.0, 25.0)
        .build()
}

/// Star with `spikes` points, first point straight up.
pub fn star(cx: f32, cy: f32, spikes: u32, outer_radius: f32, inner_radius: f32) -> Vec<PathCommand> {
    let step = PI / spikes as f32;
    let mut rot = 3.0 * FRAC_PI_2;
    let mut builder = PathBuilder::new().move_to(cx, cy - outer_radius);
    for _ in 0..spikes {
        builder = builder.line_to(cx + rot.cos() * outer_radius, cy + rot.sin() * outer_radius);
        rot += step;
        builder = builder.line_to(cx + rot.cos() * inner_radius, cy + rot.sin() * inner_radius);
        rot += step;
    }
    builder.line_to(cx, cy - outer_radius).close().build()
}

pub struct ColoringBook {
    scene: Scene,
    registry: RegionRegistry,
    canvas: PixelBuffer,
    fills: HashMap<RegionId, Rgba>,
    tool: ToolState,
}

impl ColoringBook {
    pub fn new(scene: Scene, width: u32, height: u32) -> Result<Self> {
        let mut book = Self {
            scene,
            registry: RegionRegistry::new(),
            canvas: PixelBuffer::new(width, height),
            fills: HashMap::new(),
            tool: ToolState::new(color::PALETTE[0], 1.0),
        };
        book.reset()?;
        Ok(book)
    }

    pub fn balloon() -> Result<Self> {
        Self::new(balloon_scene(), PAGE_WIDTH, PAGE_HEIGHT)
    }

    /// Blank page: white paper, every outline, no fills.
    pub fn reset(&mut self) -> Result<()> {
        self.registry.clear();
        for commands in &self.scene.regions {
            self.registry.add_region(commands.clone())?;
        }
        self.fills.clear();

        let (w, h) = self.canvas.dimensions();
        self.canvas = PixelBuffer::from_pixel(w, h, color::WHITE);
        self.restroke();
        tracing::info!(regions = self.registry.len(), "coloring page reset");
        Ok(())
    }

    /// Paint whatever region is under `p`. Returns the region that was painted.
    pub fn click(&mut self, p: Point) -> Option<RegionId> {
        let id = self.registry.hit_test(p)?;
        let color = match self.tool.tool {
            Tool::Eraser => color::WHITE,
            _ => self.tool.color,
        };

        let mut surface = RasterSurface::new(&mut self.canvas);
        if let Err(err) = self.registry.fill_region(id, color, &mut surface) {
            tracing::warn!(%id, %err, "fill failed");
            return None;
        }
        stroke_decorations(&self.scene, &self.registry, &mut surface);

        if self.tool.tool == Tool::Eraser {
            self.fills.remove(&id);
        } else {
            self.fills.insert(id, color);
        }
        tracing::debug!(%id, color = %color::to_hex(color), "region painted");
        Some(id)
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.tool.set_color(color);
    }

    /// Flip the eraser on/off. Returns true when it is now on.
    pub fn toggle_eraser(&mut self) -> bool {
        self.tool.tool = if self.tool.tool == Tool::Eraser { Tool::Brush } else { Tool::Eraser };
        self.tool.tool == Tool::Eraser
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    /// Colour a region was last painted with, `None` while blank.
    pub fn fill_of(&self, id: RegionId) -> Option<Rgba> {
        self.fills.get(&id).copied()
    }

    fn restroke(&mut self) {
        let mut surface = RasterSurface::new(&mut self.canvas);
        self.registry.stroke_all(&mut surface);
        stroke_decorations(&self.scene, &self.registry, &mut surface);
    }
}

fn stroke_decorations(scene: &Scene, registry: &RegionRegistry, surface: &mut impl Surface) {
    let outline = registry.outline();
    for commands in &scene.decorations {
        surface.stroke_path(commands, outline.color, outline.width);
    }
}
