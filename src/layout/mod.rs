//! Layout: text measurement plus the adapter over the taffy flexbox solver.
//!
//! This crate does not solve constraints itself. Styles are translated into
//! taffy's box-model primitives, taffy runs over the persistent paired tree,
//! and resolved rects are read back onto the nodes (see
//! [`crate::tree::NodeTree::compute_layout`]).

pub mod taffy_bridge;
pub mod text_measure;

pub use text_measure::{char_width, measure_text, string_width, wrap_lines, wrap_parts, WrapPart};
