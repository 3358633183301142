//! Colour palette: the familiar warm beige board with tiles getting hotter
//! as they grow.

use twenty48_view::{AttrMask, Color, Style};

// -- Surfaces --

/// Page background around the board.
pub const PAGE_BG: Color = Color::from_rgb(250, 248, 239);
/// Board frame and gutters.
pub const BOARD_BG: Color = Color::from_rgb(187, 173, 160);
/// An empty slot.
pub const EMPTY_BG: Color = Color::from_rgb(205, 193, 180);

// -- Text --

pub const TEXT_DARK: Color = Color::from_rgb(119, 110, 101);
pub const TEXT_LIGHT: Color = Color::from_rgb(249, 246, 242);

// -- Overlays --

pub const WIN_BG: Color = Color::from_rgb(237, 194, 46);
pub const LOSE_BG: Color = Color::from_rgb(238, 228, 218);

/// Background for a tile of the given value.
pub fn tile_bg(value: u32) -> Color {
    match value {
        2 => Color::from_rgb(238, 228, 218),
        4 => Color::from_rgb(237, 224, 200),
        8 => Color::from_rgb(242, 177, 121),
        16 => Color::from_rgb(245, 149, 99),
        32 => Color::from_rgb(246, 124, 95),
        64 => Color::from_rgb(246, 94, 59),
        128 => Color::from_rgb(237, 207, 114),
        256 => Color::from_rgb(237, 204, 97),
        512 => Color::from_rgb(237, 200, 80),
        1024 => Color::from_rgb(237, 197, 63),
        2048 => Color::from_rgb(237, 194, 46),
        _ => Color::from_rgb(60, 58, 50),
    }
}

/// Style of a tile; `fresh` tiles (just spawned or merged) are bold.
pub fn tile_style(value: u32, fresh: bool) -> Style {
    let fg = if value <= 4 { TEXT_DARK } else { TEXT_LIGHT };
    let attrs = if fresh { AttrMask::BOLD } else { AttrMask::NONE };
    Style::new(fg, tile_bg(value)).with_attrs(attrs)
}
