//! Fill engine for two small painting games: a click-to-color picture book
//! (vector regions, first-match hit testing, outline re-stroking) and a
//! paint-and-fill canvas (raster flood fill with ink protection, brush and
//! eraser strokes, bounded undo).

pub mod brush;
pub mod color;
pub mod coloring;
pub mod config;
pub mod draw;
pub mod error;
pub mod fill;
pub mod gamma;
pub mod path;
pub mod region;
pub mod session;
pub mod surface;
pub mod tool;
pub mod types;
pub mod undo;

pub use error::{Error, Result};
pub use fill::{flood_fill, FillOutcome, FillRequest, SkipReason};
pub use region::{RegionId, RegionRegistry};
pub use types::{PixelBuffer, Point, Rgba};
pub use undo::UndoStack;
