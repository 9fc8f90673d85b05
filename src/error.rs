//! Error types for tree and layout operations.

use crate::tree::NodeId;

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by tree mutation and the layout pass.
///
/// Everything else in this crate is recoverable by construction (bad ANSI
/// codes are skipped, out-of-clip cells are dropped, unknown focus ids are
/// no-ops) and does not produce an error value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The node id does not refer to a live node (never created, already
    /// released, or a stale id whose slot was recycled).
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    /// The node is not a child of the given parent.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// The node's paired layout handle was already released.
    #[error("layout handle for {0:?} already released")]
    HandleReleased(NodeId),

    /// Error reported by the layout solver.
    #[error("layout solver: {0}")]
    Layout(#[from] taffy::TaffyError),
}
