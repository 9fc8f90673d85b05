//! The framebuffer: a width x height grid of cells.
//!
//! Flat row-major storage; every cell is always defined (default blank).
//! Drawing goes through clipped primitives, so a cell outside the active
//! clip rect is never written. Wide glyphs occupy two columns: the glyph
//! plus a continuation marker, written together or not at all so a clip
//! edge can't produce half a character.

use crate::layout::char_width;
use crate::types::{Attr, Cell, ClipRect, Color, CONTINUATION};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a buffer of blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Full buffer bounds as a clip rect.
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width as i32, self.height as i32)
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Cell at (x, y), `None` out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell to the blank default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize and clear.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    // =========================================================================
    // Drawing primitives
    // =========================================================================

    /// Write one glyph with styling, honoring bounds and the clip rect.
    ///
    /// A wide glyph needs both of its columns inside bounds and clip; it is
    /// written together with its continuation cell or skipped entirely.
    /// Returns whether anything was written.
    pub fn set_cell(
        &mut self,
        x: i32,
        y: i32,
        ch: char,
        fg: Option<Color>,
        bg: Option<Color>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> bool {
        let in_clip = |x: i32, y: i32| clip.is_none_or(|c| c.contains(x, y));
        if !self.in_bounds(x, y) || !in_clip(x, y) {
            return false;
        }

        let wide = char_width(ch) == 2;
        if wide && (!self.in_bounds(x + 1, y) || !in_clip(x + 1, y)) {
            return false;
        }

        let idx = self.index(x, y);
        self.cells[idx] = Cell { ch, fg, bg, attrs };
        if wide {
            let idx = self.index(x + 1, y);
            self.cells[idx] = Cell {
                ch: CONTINUATION,
                fg,
                bg,
                attrs,
            };
        }
        true
    }

    /// Fill a rect with blank cells of the given background.
    pub fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        bg: Color,
        clip: Option<&ClipRect>,
    ) {
        for row in y..y + height {
            for col in x..x + width {
                self.set_cell(col, row, ' ', None, Some(bg), Attr::empty(), clip);
            }
        }
    }

    /// Write a string left-to-right from (x, y), clipped per character.
    pub fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        fg: Option<Color>,
        bg: Option<Color>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) {
        let mut col = x;
        for ch in text.chars() {
            let w = char_width(ch) as i32;
            if w > 0 {
                self.set_cell(col, y, ch, fg, bg, attrs, clip);
            }
            col += w;
        }
    }
}
