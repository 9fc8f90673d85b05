//! Focus registry: who can be focused, who is, and focus traps.
//!
//! Nodes register under a caller-chosen focus id; registration order is
//! the Tab order. At most one id holds focus. A trap confines navigation
//! to a set of ids (modal dialogs): pushing saves the current focus,
//! popping restores it. While any trap is active the focused id always
//! belongs to the innermost trap's set.
//!
//! All misuse is a silent no-op by design: focusing an unknown id, an id
//! outside the active trap, or popping an empty trap stack does nothing.

use std::collections::HashSet;

use tracing::debug;

use crate::tree::{NodeId, NodeTree};

struct FocusEntry {
    id: String,
    node: NodeId,
}

struct TrapFrame {
    ids: HashSet<String>,
    saved: Option<String>,
}

#[derive(Default)]
pub struct FocusRegistry {
    order: Vec<FocusEntry>,
    focused: Option<String>,
    traps: Vec<TrapFrame>,
}

impl FocusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a focusable node. Re-registering an id keeps its original
    /// position in the Tab order but re-points it at the new node.
    pub fn register(&mut self, id: impl Into<String>, node: NodeId) {
        let id = id.into();
        match self.order.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.node = node,
            None => self.order.push(FocusEntry { id, node }),
        }
    }

    /// Remove a focusable. Clears focus if it was focused.
    pub fn unregister(&mut self, id: &str) {
        self.order.retain(|entry| entry.id != id);
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
    }

    /// The node registered under `id`, if any.
    pub fn node_of(&self, id: &str) -> Option<NodeId> {
        self.order
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.node)
    }

    /// Registered `(id, node)` pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.order.iter().map(|entry| (entry.id.as_str(), entry.node))
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.order.iter().any(|entry| entry.id == id)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Whether `id` is reachable under the innermost active trap.
    fn allowed(&self, id: &str) -> bool {
        match self.traps.last() {
            Some(trap) => trap.ids.contains(id),
            None => true,
        }
    }

    /// Focus `id`. Silently ignored when the id is unknown or outside the
    /// innermost active trap.
    pub fn request_focus(&mut self, id: &str) {
        if !self.is_registered(id) || !self.allowed(id) {
            return;
        }
        if self.focused.as_deref() != Some(id) {
            debug!(id, "focus moved");
            self.focused = Some(id.to_string());
        }
    }

    /// Drop focus entirely.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    fn candidates(&self) -> Vec<&str> {
        self.order
            .iter()
            .map(|entry| entry.id.as_str())
            .filter(|id| self.allowed(id))
            .collect()
    }

    fn step(&mut self, direction: isize) {
        let candidates = self.candidates();
        if candidates.is_empty() {
            return;
        }
        let len = candidates.len() as isize;
        let position = self
            .focused
            .as_deref()
            .and_then(|focused| candidates.iter().position(|&id| id == focused));
        let next = match position {
            Some(current) => {
                (((current as isize + direction) % len + len) % len) as usize
            }
            // Nothing focused yet: forward starts at the front, backward
            // at the back.
            None => {
                if direction > 0 {
                    0
                } else {
                    candidates.len() - 1
                }
            }
        };
        let id = candidates[next].to_string();
        if self.focused.as_deref() != Some(id.as_str()) {
            debug!(id = %id, "focus moved");
        }
        self.focused = Some(id);
    }

    /// Cycle focus forward through registration order (trap-restricted).
    pub fn focus_next(&mut self) {
        self.step(1);
    }

    /// Cycle focus backward.
    pub fn focus_prev(&mut self) {
        self.step(-1);
    }

    // =========================================================================
    // Traps
    // =========================================================================

    /// Confine focus to `ids`. Saves the current focus for the matching
    /// [`pop_trap`]. If the current focus is outside the set, focus jumps
    /// to the set's first member in registration order.
    pub fn push_trap(&mut self, ids: HashSet<String>) {
        let saved = self.focused.clone();
        self.traps.push(TrapFrame { ids, saved });

        let inside = self
            .focused
            .as_deref()
            .is_some_and(|focused| self.allowed(focused));
        if !inside {
            self.focused = None;
            self.focus_next();
        }
    }

    /// Remove the innermost trap and restore the focus saved at push time.
    /// The saved id only comes back if it is still registered and allowed
    /// under whatever trap is now innermost; otherwise focus clears.
    pub fn pop_trap(&mut self) {
        let Some(frame) = self.traps.pop() else { return };
        self.focused = frame
            .saved
            .filter(|id| self.is_registered(id) && self.allowed(id));
    }

    pub fn trap_depth(&self) -> usize {
        self.traps.len()
    }

    // =========================================================================
    // Housekeeping
    // =========================================================================

    /// Drop registrations whose node no longer exists in the tree.
    /// Call after a batch of deletions to keep Tab order tight.
    pub fn prune(&mut self, tree: &NodeTree) {
        let focused = self.focused.clone();
        self.order.retain(|entry| tree.contains(entry.node));
        if let Some(id) = focused {
            if !self.is_registered(&id) {
                self.focused = None;
            }
        }
    }
}
