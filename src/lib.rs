//! # ember-tui
//!
//! The rendering core of a declarative terminal-UI toolkit: a persistent
//! node tree paired with the taffy flexbox solver, a compositor that
//! paints resolved nodes into a character grid, a diff engine that turns
//! two grids into a minimal escape-sequence transcript, and a focus layer
//! that routes keyboard input.
//!
//! ## Pipeline
//!
//! ```text
//! mutation ops → NodeTree → compute_layout (taffy + text measure)
//!              → paint_tree (FrameBuffer) → diff → terminal bytes
//! ```
//!
//! Input flows the other way: decoded key events enter the
//! [`state::InputRouter`], priority subscribers first, then whatever the
//! [`state::FocusRegistry`] says is focused.
//!
//! Everything is single-threaded and cooperative. One frame runs
//! synchronously when the embedding runtime asks for it; this crate never
//! blocks, never spawns, and owns no file descriptors. What to render is
//! upstream policy; this core decides how it reaches the screen.
//!
//! ## Deletion contract
//!
//! Nodes pair 1:1 with solver handles. Deleting a subtree is two-phased:
//! [`tree::NodeTree::detach`] it, then [`tree::NodeTree::release`] each
//! node parent-before-children. The order is the one contract this crate
//! cannot check for you at runtime (debug builds assert it).

pub mod ansi;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod screen;
pub mod state;
pub mod style;
pub mod tree;
pub mod types;

pub use ansi::{parse_ansi, strip_ansi, SegmentStyle, StyledSegment};
pub use error::{Error, Result};
pub use layout::{measure_text, string_width, wrap_lines};
pub use renderer::{
    diff, paint_tree, CursorInfo, CursorScreenPosition, FrameBuffer, OutputBuffer, PaintOptions,
    PaintResult,
};
pub use screen::{FrameOutput, Screen};
pub use state::{
    generate_hints, FocusRegistry, InputRouter, JumpNav, JumpOutcome, KeyEvent, Keybind,
    KeybindRegistry, Modifiers, TimerRegistry,
};
pub use style::{Edges, Inset, Style};
pub use tree::{LayoutRect, Node, NodeId, NodeKind, NodeTree, Op};
pub use types::{
    Attr, BorderStyle, Cell, ClipRect, Color, Dimension, NamedColor, TextAlign, TextWrap,
};
