// One error type for the whole crate.
// Every variant states *where* things went wrong. None of them are fatal:
// the caller drops the attempted operation and keeps its state.
use std::path::PathBuf;

use thiserror::Error;

use crate::region::RegionId;

#[derive(Error, Debug)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// A region's path commands can't describe a closed shape
    #[error("Invalid region geometry: {0}")]
    InvalidGeometry(String),

    /// No region with this id is registered
    #[error("Unknown region {0}")]
    UnknownRegion(RegionId),

    /// Flood fill seed is not inside the buffer
    #[error("Fill seed ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBoundsSeed { x: i64, y: i64, width: u32, height: u32 },

    /// Colour strings like "#FF0000"
    #[error("Invalid colour {0:?}")]
    InvalidColor(String),

    /// Opening or decoding a picture failed
    #[error("Could not load {}: {source}", path.display())]
    ImageLoad { path: PathBuf, source: image::ImageError },

    /// Encoding or writing a picture failed
    #[error("Could not save {}: {source}", path.display())]
    ImageSave { path: PathBuf, source: image::ImageError },

    /// colorbook.toml didn't parse
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
