// Colour parsing and the preset palette of the colour buttons.

use crate::error::{Error, Result};
use crate::types::Rgba;

pub const BLACK: Rgba = image::Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba = image::Rgba([255, 255, 255, 255]);
pub const TRANSPARENT: Rgba = image::Rgba([0, 0, 0, 0]);

/// Keys 1..9 pick these, in order.
pub const PALETTE: [Rgba; 9] = [
    image::Rgba([0xFF, 0x00, 0x00, 0xFF]), // red
    image::Rgba([0xFF, 0xA5, 0x00, 0xFF]), // orange
    image::Rgba([0xFF, 0xEB, 0x3B, 0xFF]), // yellow
    image::Rgba([0x4C, 0xAF, 0x50, 0xFF]), // green
    image::Rgba([0x21, 0x96, 0xF3, 0xFF]), // blue
    image::Rgba([0x9C, 0x27, 0xB0, 0xFF]), // purple
    image::Rgba([0xFF, 0x69, 0xB4, 0xFF]), // pink
    image::Rgba([0x79, 0x55, 0x48, 0xFF]), // brown
    image::Rgba([0x00, 0x00, 0x00, 0xFF]), // black
];

/// Parse `#RRGGBB`, `RRGGBB` or `#RGB` into an opaque colour.
pub fn parse_hex(text: &str) -> Result<Rgba> {
    let hex = text.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(text.to_string()));
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| Error::InvalidColor(text.to_string()));

    match hex.len() {
        6 => Ok(image::Rgba([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?, 255])),
        3 => {
            // "#F80" is shorthand for "#FF8800"
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Ok(image::Rgba([short(0)?, short(1)?, short(2)?, 255]))
        }
        _ => Err(Error::InvalidColor(text.to_string())),
    }
}

/// `#RRGGBB` for logs and the HUD.
pub fn to_hex(color: Rgba) -> String {
    let [r, g, b, _] = color.0;
    format!("#{r:02X}{g:02X}{b:02X}")
}
