//! Rendering: framebuffer, compositor, diff engine, escape output.

pub mod buffer;
pub mod diff;
pub mod output;
pub mod painter;

pub use buffer::FrameBuffer;
pub use diff::{diff, diff_into};
pub use output::OutputBuffer;
pub use painter::{paint_tree, CursorInfo, CursorScreenPosition, PaintOptions, PaintResult};
