//! Framebuffer diffing: two grids in, a minimal escape transcript out.
//!
//! This is the per-frame hot path; the design goal is the fewest bytes that
//! leave the terminal showing `next`. Three economies, per cell written:
//!
//! - cursor repositioning only when the cursor is not already immediately
//!   after the previously written cell,
//! - the style sequence (reset + reapply) only when it differs from the
//!   last one emitted,
//! - then the literal glyph.
//!
//! Cells compare equal only when glyph, attributes, and both colors match,
//! with colors compared by representation: a named red and the equivalent
//! truecolor are different and force a rewrite.

use tracing::debug;

use super::buffer::FrameBuffer;
use super::output::{cell_sgr, cursor_to, reset, OutputBuffer};

/// Diff `next` against `prev` and return the transcript bytes.
///
/// With `full_redraw` every cell of `next` is written regardless of `prev`
/// (used after a resize or to recover a corrupted screen). Identical grids
/// produce an empty transcript.
pub fn diff(prev: &FrameBuffer, next: &FrameBuffer, full_redraw: bool) -> Vec<u8> {
    let mut out = OutputBuffer::with_capacity(4 * 1024);
    diff_into(prev, next, full_redraw, &mut out);
    out.take()
}

/// As [`diff`], accumulating into a caller-owned buffer.
pub fn diff_into(prev: &FrameBuffer, next: &FrameBuffer, full_redraw: bool, out: &mut OutputBuffer) {
    let mut last_x: i32 = -1;
    let mut last_y: i32 = -1;
    let mut last_sgr: Vec<u8> = Vec::new();
    let mut sgr: Vec<u8> = Vec::new();
    let mut scratch: Vec<u8> = Vec::new();
    let mut wrote = false;

    for y in 0..next.height() as i32 {
        for x in 0..next.width() as i32 {
            let cell = match next.get(x, y) {
                Some(cell) => cell,
                None => continue,
            };

            if !full_redraw {
                if let Some(prev_cell) = prev.get(x, y) {
                    if prev_cell == cell {
                        continue;
                    }
                }
            }

            // The wide glyph before a continuation cell already advanced
            // the terminal cursor over this column; track, emit nothing.
            if cell.is_continuation() {
                last_x = x;
                last_y = y;
                continue;
            }

            if last_y != y || last_x + 1 != x {
                scratch.clear();
                cursor_to(&mut scratch, x, y);
                out.write_bytes(&scratch);
            }

            sgr.clear();
            cell_sgr(&mut sgr, cell);
            if sgr != last_sgr {
                out.write_bytes(&sgr);
                std::mem::swap(&mut last_sgr, &mut sgr);
            }

            out.write_char(cell.ch);
            wrote = true;
            last_x = x;
            last_y = y;
        }
    }

    if wrote {
        scratch.clear();
        reset(&mut scratch);
        out.write_bytes(&scratch);
    }
    debug!(bytes = out.len(), full_redraw, "frame diff emitted");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attr, Color, NamedColor};

    fn put(fb: &mut FrameBuffer, x: i32, y: i32, ch: char) {
        fb.set_cell(x, y, ch, None, None, Attr::empty(), None);
    }

    #[test]
    fn identical_buffers_diff_to_nothing() {
        let mut fb = FrameBuffer::new(10, 4);
        put(&mut fb, 3, 1, 'x');
        let transcript = diff(&fb.clone(), &fb, false);
        assert!(transcript.is_empty());
    }

    #[test]
    fn full_redraw_touches_every_cell() {
        let fb = FrameBuffer::new(5, 2);
        let transcript = diff(&fb.clone(), &fb, true);
        let text = String::from_utf8(transcript).unwrap();
        // All ten blanks written even though nothing changed.
        let glyphs = text.chars().filter(|&c| c == ' ').count();
        assert_eq!(glyphs, 10);
    }

    #[test]
    fn sequential_cells_skip_cursor_moves() {
        let prev = FrameBuffer::new(10, 1);
        let mut next = FrameBuffer::new(10, 1);
        put(&mut next, 2, 0, 'a');
        put(&mut next, 3, 0, 'b');
        put(&mut next, 4, 0, 'c');

        let text = String::from_utf8(diff(&prev, &next, false)).unwrap();
        let moves = text.matches('H').count();
        assert_eq!(moves, 1, "one reposition for a contiguous run: {text:?}");
        assert!(text.contains("abc"));
    }

    #[test]
    fn style_reemitted_only_on_change() {
        let prev = FrameBuffer::new(10, 1);
        let mut next = FrameBuffer::new(10, 1);
        let red = Some(Color::Named(NamedColor::Red));
        next.set_cell(0, 0, 'a', red, None, Attr::empty(), None);
        next.set_cell(1, 0, 'b', red, None, Attr::empty(), None);
        next.set_cell(2, 0, 'c', None, None, Attr::BOLD, None);

        let text = String::from_utf8(diff(&prev, &next, false)).unwrap();
        // Two styles in play: red (covers a and b) and bold.
        assert_eq!(text.matches("\x1b[31m").count(), 1);
        assert_eq!(text.matches("\x1b[1m").count(), 1);
    }

    #[test]
    fn representation_change_forces_rewrite() {
        let mut prev = FrameBuffer::new(4, 1);
        prev.set_cell(0, 0, 'x', Some(Color::Named(NamedColor::Red)), None, Attr::empty(), None);
        let mut next = FrameBuffer::new(4, 1);
        next.set_cell(0, 0, 'x', Some(Color::Indexed(1)), None, Attr::empty(), None);

        let transcript = diff(&prev, &next, false);
        assert!(!transcript.is_empty());
        assert!(String::from_utf8(transcript).unwrap().contains("38;5;1"));
    }

    #[test]
    fn transcript_ends_with_reset_when_nonempty() {
        let prev = FrameBuffer::new(3, 1);
        let mut next = FrameBuffer::new(3, 1);
        put(&mut next, 0, 0, 'z');
        let transcript = diff(&prev, &next, false);
        assert!(transcript.ends_with(b"\x1b[0m"));
    }

    #[test]
    fn continuation_cells_emit_no_bytes_but_keep_position() {
        let prev = FrameBuffer::new(6, 1);
        let mut next = FrameBuffer::new(6, 1);
        next.set_cell(0, 0, '日', None, None, Attr::empty(), None);
        put(&mut next, 2, 0, 'x');

        let text = String::from_utf8(diff(&prev, &next, false)).unwrap();
        assert!(!text.contains('\0'));
        // The wide glyph left the cursor at column 2, so 'x' needs no move.
        assert_eq!(text.matches('H').count(), 1);
    }

    #[test]
    fn size_change_with_full_redraw_covers_next() {
        let prev = FrameBuffer::new(2, 2);
        let next = FrameBuffer::new(3, 3);
        let text = String::from_utf8(diff(&prev, &next, true)).unwrap();
        assert_eq!(text.chars().filter(|&c| c == ' ').count(), 9);
    }
}
