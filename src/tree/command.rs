//! The mutation command protocol.
//!
//! An external runtime decides *when* and *why* the tree changes; this core
//! only consumes the resulting ordered operations. Modeling them as one
//! enum through one entry point keeps that boundary explicit and gives
//! embedders a trivially serializable surface.

use crate::error::Result;
use crate::style::Style;
use crate::tree::{NodeId, NodeKind, NodeTree};

/// One primitive tree mutation.
///
/// Operations arrive in order from the mutation runtime. Deletion uses the
/// two-phase pair: `Detach` for the subtree root, then one `Release` per
/// node, parent always before its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Create a detached node. The only operation that yields an id.
    Create { kind: NodeKind, style: Style },
    AppendChild { parent: NodeId, child: NodeId },
    InsertBefore {
        parent: NodeId,
        child: NodeId,
        before: NodeId,
    },
    RemoveChild { parent: NodeId, child: NodeId },
    /// Set a text leaf's content, or an input's value.
    SetText { node: NodeId, text: String },
    SetStyle { node: NodeId, style: Style },
    SetFocusId {
        node: NodeId,
        focus_id: Option<String>,
    },
    SetHidden { node: NodeId, hidden: bool },
    Detach { node: NodeId },
    Release { node: NodeId },
}

impl NodeTree {
    /// Apply one operation. Returns the created id for [`Op::Create`].
    pub fn apply(&mut self, op: Op) -> Result<Option<NodeId>> {
        match op {
            Op::Create { kind, style } => return self.create(kind, style).map(Some),
            Op::AppendChild { parent, child } => self.append_child(parent, child)?,
            Op::InsertBefore {
                parent,
                child,
                before,
            } => self.insert_before(parent, child, before)?,
            Op::RemoveChild { parent, child } => self.remove_child(parent, child)?,
            Op::SetText { node, text } => self.set_text(node, text)?,
            Op::SetStyle { node, style } => self.set_style(node, style)?,
            Op::SetFocusId { node, focus_id } => self.set_focus_id(node, focus_id)?,
            Op::SetHidden { node, hidden } => self.set_hidden(node, hidden)?,
            Op::Detach { node } => self.detach(node)?,
            Op::Release { node } => self.release(node)?,
        }
        Ok(None)
    }
}
