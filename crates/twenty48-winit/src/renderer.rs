//! Renders the canvas into a pixel buffer using fontdue for glyph
//! rasterization.
//!
//! Each cell is a monospace character tile with foreground and background
//! colours. Bold cells get their glyph smeared one pixel to the right.

use std::collections::HashMap;

use fontdue::Font;
use twenty48_view::{AttrMask, Color, Frame};

/// Window colour around the canvas.
pub(crate) const CLEAR_PIXEL: u32 = 0xFF_FA_F8_EF;
const DEFAULT_BG: (u8, u8, u8) = (0xFA, 0xF8, 0xEF);
const DEFAULT_FG: (u8, u8, u8) = (0x77, 0x6E, 0x65);

/// Cached rasterized glyph.
struct Glyph {
    bitmap: Vec<u8>, // alpha values, width*height
    width: usize,
    height: usize,
    x_offset: i32,
    y_offset: i32,
}

pub(crate) struct GridRenderer {
    font: Font,
    font_size: f32,
    ascent: i32,
    cell_width: usize,
    cell_height: usize,
    cols: usize,
    rows: usize,
    /// ARGB pixel buffer (cell_width*cols) x (cell_height*rows)
    pixels: Vec<u32>,
    glyphs: HashMap<char, Glyph>,
}

impl GridRenderer {
    pub fn new(font: Font, font_size: f32, cols: usize, rows: usize) -> Self {
        let metrics = font
            .horizontal_line_metrics(font_size)
            .unwrap_or(fontdue::LineMetrics {
                ascent: font_size * 0.8,
                descent: -(font_size * 0.2),
                line_gap: 0.0,
                new_line_size: font_size,
            });

        let cell_height = ((metrics.ascent - metrics.descent).ceil() as usize).max(1);
        let cell_width = (font.metrics('M', font_size).advance_width.ceil() as usize).max(1);
        let pixels = vec![CLEAR_PIXEL; cols * cell_width * rows * cell_height];

        Self {
            font,
            font_size,
            ascent: metrics.ascent.ceil() as i32,
            cell_width,
            cell_height,
            cols,
            rows,
            pixels,
            glyphs: HashMap::new(),
        }
    }

    /// Total pixel buffer width.
    pub fn pixel_width(&self) -> usize {
        self.cols * self.cell_width
    }

    /// Total pixel buffer height.
    pub fn pixel_height(&self) -> usize {
        self.rows * self.cell_height
    }

    /// Apply a frame diff to the internal pixel buffer.
    pub fn apply_frame(&mut self, frame: &Frame) {
        for fc in &frame.cells {
            if fc.pos.x < 0 || fc.pos.y < 0 {
                continue;
            }
            let (col, row) = (fc.pos.x as usize, fc.pos.y as usize);
            if col >= self.cols || row >= self.rows {
                continue;
            }
            let style = fc.cell.style;
            self.draw_cell(col, row, fc.cell.ch, style.fg, style.bg, style.attrs);
        }
    }

    fn draw_cell(&mut self, col: usize, row: usize, ch: char, fg: Color, bg: Color, attrs: AttrMask) {
        let (fg, bg) = if attrs.contains(AttrMask::REVERSE) { (bg, fg) } else { (fg, bg) };
        let bg = bg.rgb_or(DEFAULT_BG);
        let fg = fg.rgb_or(DEFAULT_FG);
        let buf_w = self.pixel_width();
        let x0 = col * self.cell_width;
        let y0 = row * self.cell_height;

        let bg_pixel = pack(bg);
        for dy in 0..self.cell_height {
            let start = (y0 + dy) * buf_w + x0;
            self.pixels[start..start + self.cell_width].fill(bg_pixel);
        }

        if ch == ' ' || ch == '\0' {
            return;
        }
        if !self.glyphs.contains_key(&ch) {
            let (metrics, bitmap) = self.font.rasterize(ch, self.font_size);
            self.glyphs.insert(
                ch,
                Glyph {
                    bitmap,
                    width: metrics.width,
                    height: metrics.height,
                    x_offset: metrics.xmin,
                    y_offset: metrics.ymin,
                },
            );
        }
        let Some(glyph) = self.glyphs.get(&ch) else {
            return;
        };

        // Top-left of the glyph bitmap relative to the cell.
        let gx0 = x0 as i32 + glyph.x_offset;
        let gy0 = y0 as i32 + self.ascent - glyph.y_offset - glyph.height as i32;
        let bold = attrs.contains(AttrMask::BOLD);
        let extra = usize::from(bold);
        let cell_right = (x0 + self.cell_width) as i32;
        let cell_bottom = (y0 + self.cell_height) as i32;
        let alpha_at = |gx: usize, gy: usize| {
            if gx < glyph.width { glyph.bitmap[gy * glyph.width + gx] } else { 0 }
        };

        for gy in 0..glyph.height {
            for gx in 0..glyph.width + extra {
                let mut alpha = alpha_at(gx, gy);
                if bold && gx > 0 {
                    alpha = alpha.max(alpha_at(gx - 1, gy));
                }
                if alpha == 0 {
                    continue;
                }
                let px = gx0 + gx as i32;
                let py = gy0 + gy as i32;
                if px < x0 as i32 || py < y0 as i32 || px >= cell_right || py >= cell_bottom {
                    continue;
                }
                self.pixels[py as usize * buf_w + px as usize] = blend(fg, bg, alpha);
            }
        }
    }

    /// Copy the pixel buffer centred into a window buffer.
    pub fn blit_to_buffer(&self, buf: &mut [u32], buf_width: usize, buf_height: usize) {
        blit_centered(
            &self.pixels,
            (self.pixel_width(), self.pixel_height()),
            buf,
            (buf_width, buf_height),
        );
    }
}

/// Copy `src` into the middle of `dst`, clearing the border. A source larger
/// than the destination is cropped on its right and bottom edges.
fn blit_centered(src: &[u32], src_size: (usize, usize), dst: &mut [u32], dst_size: (usize, usize)) {
    let (src_w, src_h) = src_size;
    let (dst_w, dst_h) = dst_size;
    let copy_w = src_w.min(dst_w);
    let copy_h = src_h.min(dst_h);
    let x_off = (dst_w - copy_w) / 2;
    let y_off = (dst_h - copy_h) / 2;

    if copy_w < dst_w || copy_h < dst_h {
        dst.fill(CLEAR_PIXEL);
    }
    for y in 0..copy_h {
        let src_start = y * src_w;
        let dst_start = (y + y_off) * dst_w + x_off;
        if src_start + copy_w <= src.len() && dst_start + copy_w <= dst.len() {
            dst[dst_start..dst_start + copy_w]
                .copy_from_slice(&src[src_start..src_start + copy_w]);
        }
    }
}

#[inline]
fn pack((r, g, b): (u8, u8, u8)) -> u32 {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Alpha-blend `fg` over `bg`.
#[inline]
fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), alpha: u8) -> u32 {
    let a = alpha as u32;
    let mix = |f: u8, b: u8| ((f as u32 * a + b as u32 * (255 - a)) / 255) as u8;
    pack((mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2)))
}
