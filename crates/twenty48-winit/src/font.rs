//! Locating and parsing the monospace font used to draw cells.

use std::fs;
use std::path::Path;

use fontdue::{Font, FontSettings};

use crate::error::WinitError;

/// Well-known monospace fonts tried when no font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/System/Library/Fonts/Monaco.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

/// Load `path`, or the first readable entry of the system font list.
pub(crate) fn load_font(path: Option<&Path>) -> Result<Font, WinitError> {
    let data = match path {
        Some(path) => fs::read(path).map_err(|source| WinitError::FontRead {
            path: path.to_path_buf(),
            source,
        })?,
        None => system_font()?,
    };
    parse_font(&data)
}

fn system_font() -> Result<Vec<u8>, WinitError> {
    for candidate in SYSTEM_FONTS {
        if let Ok(data) = fs::read(candidate) {
            log::info!("using font {candidate}");
            return Ok(data);
        }
    }
    Err(WinitError::NoFont)
}

pub(crate) fn parse_font(data: &[u8]) -> Result<Font, WinitError> {
    Font::from_bytes(data, FontSettings::default()).map_err(WinitError::FontParse)
}
