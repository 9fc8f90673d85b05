//! Per-frame driver: layout, paint, diff.
//!
//! One `Screen` owns the viewport size and the previous frame's grid. Each
//! `render_frame` call runs the synchronous pipeline -- layout over the
//! node tree, compositing into a fresh framebuffer, diffing against the
//! previous frame -- and returns the escape transcript for the external
//! terminal writer. The first frame, and the first frame after a resize or
//! explicit invalidation, is a forced full redraw.

use tracing::debug;

use crate::error::Result;
use crate::renderer::{diff, paint_tree, CursorScreenPosition, FrameBuffer, PaintOptions};
use crate::tree::{NodeId, NodeTree};

/// One frame's output for the terminal writer.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// Escape-sequence transcript; write verbatim.
    pub bytes: Vec<u8>,
    /// Where the native caret belongs, when native-caret mode is on.
    /// Falls back to the last known position when the focused node painted
    /// no caret this frame (e.g. it resized to zero mid-frame).
    pub cursor: Option<CursorScreenPosition>,
}

pub struct Screen {
    width: u16,
    height: u16,
    previous: Option<FrameBuffer>,
    last_cursor: Option<CursorScreenPosition>,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            previous: None,
            last_cursor: None,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Adopt a new viewport size. The next frame is a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) != (self.width, self.height) {
            debug!(width, height, "viewport resized");
            self.width = width;
            self.height = height;
            self.invalidate();
        }
    }

    /// Forget the previous frame; the next render redraws every cell.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Run one frame: layout, paint, diff. Returns the transcript bytes
    /// and, in native-caret mode, where the caret should sit.
    pub fn render_frame(
        &mut self,
        tree: &mut NodeTree,
        roots: &[NodeId],
        options: &PaintOptions,
    ) -> Result<FrameOutput> {
        tree.compute_layout(roots, self.width, self.height)?;

        let mut frame = FrameBuffer::new(self.width, self.height);
        let painted = paint_tree(tree, roots, &mut frame, options);

        let bytes = match &self.previous {
            Some(previous) => diff(previous, &frame, false),
            None => {
                let blank = FrameBuffer::new(self.width, self.height);
                diff(&blank, &frame, true)
            }
        };

        if let Some(cursor) = painted.cursor_position {
            self.last_cursor = Some(cursor);
        }
        let cursor = if options.use_native_cursor {
            painted.cursor_position.or(self.last_cursor)
        } else {
            None
        };

        self.previous = Some(frame);
        Ok(FrameOutput { bytes, cursor })
    }
}
