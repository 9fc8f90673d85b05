//! Output buffering and escape-sequence emission.
//!
//! The diff engine accumulates its transcript here and hands the bytes to
//! the external terminal writer; nothing in this crate touches stdout.

use std::io::{self, Write};

use crate::types::{Attr, Cell, Color};

/// Control Sequence Introducer.
pub const CSI: &str = "\x1b[";

// =============================================================================
// OutputBuffer
// =============================================================================

/// Byte accumulator for one frame's transcript.
///
/// Kept around between frames so its allocation is reused.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn write_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.data.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take the accumulated bytes, leaving the buffer empty but allocated.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.data)
    }

    /// Drain the buffer into a writer.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        self.data.clear();
        Ok(())
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Escape emission
// =============================================================================

/// Absolute cursor move. Coordinates are 0-based; the wire is 1-based.
pub fn cursor_to(out: &mut Vec<u8>, x: i32, y: i32) {
    out.extend_from_slice(format!("{CSI}{};{}H", y + 1, x + 1).as_bytes());
}

/// Foreground color in its own escape domain.
pub fn fg_color(out: &mut Vec<u8>, color: Color) {
    let seq = match color {
        Color::Named(named) => format!("{CSI}{}m", named.fg_code()),
        Color::Indexed(i) => format!("{CSI}38;5;{i}m"),
        Color::Rgb(r, g, b) => format!("{CSI}38;2;{r};{g};{b}m"),
    };
    out.extend_from_slice(seq.as_bytes());
}

/// Background color in its own escape domain.
pub fn bg_color(out: &mut Vec<u8>, color: Color) {
    let seq = match color {
        Color::Named(named) => format!("{CSI}{}m", named.bg_code()),
        Color::Indexed(i) => format!("{CSI}48;5;{i}m"),
        Color::Rgb(r, g, b) => format!("{CSI}48;2;{r};{g};{b}m"),
    };
    out.extend_from_slice(seq.as_bytes());
}

/// Reset all attributes.
pub fn reset(out: &mut Vec<u8>) {
    out.extend_from_slice(format!("{CSI}0m").as_bytes());
}

/// Full style for one cell: reset, then each attribute and color in effect.
///
/// Built as a unit so the diff engine can compare it byte-for-byte against
/// the last emitted style and skip the write when nothing changed.
pub fn cell_sgr(out: &mut Vec<u8>, cell: &Cell) {
    reset(out);
    if cell.attrs.contains(Attr::BOLD) {
        out.extend_from_slice(format!("{CSI}1m").as_bytes());
    }
    if cell.attrs.contains(Attr::DIM) {
        out.extend_from_slice(format!("{CSI}2m").as_bytes());
    }
    if cell.attrs.contains(Attr::ITALIC) {
        out.extend_from_slice(format!("{CSI}3m").as_bytes());
    }
    if cell.attrs.contains(Attr::UNDERLINE) {
        out.extend_from_slice(format!("{CSI}4m").as_bytes());
    }
    if let Some(color) = cell.fg {
        fg_color(out, color);
    }
    if let Some(color) = cell.bg {
        bg_color(out, color);
    }
}
