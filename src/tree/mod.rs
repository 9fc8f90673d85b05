//! The persistent node tree and its paired layout-solver tree.
//!
//! Every structural node owns exactly one taffy node, created with it and
//! freed by `release`. Structural mutations are mirrored onto the solver
//! tree immediately, and anything that can change geometry marks the paired
//! node dirty so the next layout pass never reads stale measurements.
//!
//! Deletion is two-phase by contract:
//!
//! 1. `detach` unlinks a subtree from both trees. Solver resources stay
//!    alive, so resolved rects remain inspectable.
//! 2. `release`, issued top-down (parent strictly before its children),
//!    frees each node's solver handle and arena slot.
//!
//! The ordering in step 2 is a caller contract, not a runtime check; debug
//! builds assert it, release builds trust it.

mod command;
mod node;

pub use command::Op;
pub use node::{LayoutRect, Node, NodeId, NodeKind};

use taffy::{AvailableSpace, Size, TaffyTree};
use tracing::trace;

use crate::error::{Error, Result};
use crate::layout::taffy_bridge::{measure_content, taffy_style};
use crate::style::Style;

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-backed scene graph paired 1:1 with a taffy tree.
pub struct NodeTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    taffy: TaffyTree<NodeId>,
    len: usize,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            taffy: TaffyTree::new(),
            len: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `id` refers to a live node (not released, not stale).
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a node, `None` for released or stale ids.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(Error::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .ok_or(Error::UnknownNode(id))?;
        slot.node.as_mut().ok_or(Error::UnknownNode(id))
    }

    fn taffy_handle(&self, id: NodeId) -> Result<taffy::NodeId> {
        self.node(id)?.taffy.ok_or(Error::HandleReleased(id))
    }

    // =========================================================================
    // Creation and structure
    // =========================================================================

    /// Create a detached node and its paired solver node.
    pub fn create(&mut self, kind: NodeKind, style: Style) -> Result<NodeId> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                (self.slots.len() - 1) as u32
            }
        };
        let id = NodeId {
            index,
            generation: self.slots[index as usize].generation,
        };

        let handle = self.taffy.new_leaf_with_context(taffy_style(&style, &kind, false), id)?;
        self.slots[index as usize].node = Some(Node {
            kind,
            style,
            children: Vec::new(),
            parent: None,
            layout: LayoutRect::default(),
            focus_id: None,
            hidden: false,
            taffy: Some(handle),
        });
        self.len += 1;
        Ok(id)
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that is currently attached elsewhere is detached first, so
    /// this doubles as a reparenting move.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        if self.node(child)?.parent.is_some() {
            self.detach(child)?;
        }
        let parent_handle = self.taffy_handle(parent)?;
        let child_handle = self.taffy_handle(child)?;
        self.taffy.add_child(parent_handle, child_handle)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Insert `child` immediately before `before` among `parent`'s children.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, before: NodeId) -> Result<()> {
        self.node(parent)?;
        // Detach first: if the child is already among these siblings, its
        // removal shifts the insertion index.
        if self.node(child)?.parent.is_some() {
            self.detach(child)?;
        }
        let position = self
            .node(parent)?
            .children
            .iter()
            .position(|&c| c == before)
            .ok_or(Error::NotAChild {
                parent,
                child: before,
            })?;
        let parent_handle = self.taffy_handle(parent)?;
        let child_handle = self.taffy_handle(child)?;
        self.taffy.insert_child_at_index(parent_handle, position, child_handle)?;
        self.node_mut(parent)?.children.insert(position, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Unlink `child` from `parent` in both trees. The child lives on as a
    /// detached root; its solver resources are untouched.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.node(parent)?.children.contains(&child) {
            return Err(Error::NotAChild { parent, child });
        }
        let parent_handle = self.taffy_handle(parent)?;
        let child_handle = self.taffy_handle(child)?;
        self.taffy.remove_child(parent_handle, child_handle)?;
        self.node_mut(parent)?.children.retain(|&c| c != child);
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    // =========================================================================
    // Content and style mutation
    // =========================================================================

    /// Replace a text leaf's content (or an input's value) and mark the
    /// paired solver node dirty. A no-op on boxes.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        let node = self.node_mut(id)?;
        match &mut node.kind {
            NodeKind::Text { text: current } => *current = text.into(),
            NodeKind::Input { value, .. } => *value = text.into(),
            NodeKind::Box => return Ok(()),
        }
        let handle = self.taffy_handle(id)?;
        self.taffy.mark_dirty(handle)?;
        Ok(())
    }

    /// Replace a node's style and re-translate it for the solver.
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<()> {
        let node = self.node_mut(id)?;
        node.style = style;
        let translated = taffy_style(&node.style, &node.kind, node.hidden);
        let handle = self.taffy_handle(id)?;
        self.taffy.set_style(handle, translated)?;
        Ok(())
    }

    /// Update input-specific fields on an input node. No-op on other kinds.
    pub fn set_input(
        &mut self,
        id: NodeId,
        placeholder: Option<String>,
        multiline: Option<bool>,
    ) -> Result<()> {
        let node = self.node_mut(id)?;
        if let NodeKind::Input {
            placeholder: current_placeholder,
            multiline: current_multiline,
            ..
        } = &mut node.kind
        {
            if let Some(placeholder) = placeholder {
                *current_placeholder = placeholder;
            }
            if let Some(multiline) = multiline {
                *current_multiline = multiline;
            }
            let handle = self.taffy_handle(id)?;
            self.taffy.mark_dirty(handle)?;
        }
        Ok(())
    }

    pub fn set_focus_id(&mut self, id: NodeId, focus_id: Option<String>) -> Result<()> {
        self.node_mut(id)?.focus_id = focus_id;
        Ok(())
    }

    /// Hide or reveal a node. Hidden nodes leave layout flow entirely and
    /// the compositor skips their subtree.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.hidden == hidden {
            return Ok(());
        }
        node.hidden = hidden;
        let translated = taffy_style(&node.style, &node.kind, node.hidden);
        let handle = self.taffy_handle(id)?;
        self.taffy.set_style(handle, translated)?;
        Ok(())
    }

    // =========================================================================
    // Two-phase deletion
    // =========================================================================

    /// Phase one: unlink a subtree from both trees without releasing solver
    /// resources. A no-op for nodes that are already roots.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        match self.node(id)?.parent {
            Some(parent) => self.remove_child(parent, id),
            None => Ok(()),
        }
    }

    /// Phase two: free this node's solver handle and arena slot.
    ///
    /// Must be issued top-down across a deleted subtree: parent before any
    /// of its children. Children of a released node keep their (now stale)
    /// parent id until their own release; their handles stay valid.
    pub fn release(&mut self, id: NodeId) -> Result<()> {
        let parent = self.node(id)?.parent;
        if let Some(parent_id) = parent {
            let still_linked = self
                .get(parent_id)
                .is_some_and(|parent| parent.children.contains(&id));
            if still_linked {
                debug_assert!(
                    self.get(parent_id).is_some_and(|parent| parent.taffy.is_none()),
                    "release order violated: {id:?} released before its parent {parent_id:?}"
                );
                // Keep our structures consistent even if the contract was
                // broken: a released child must not linger in a live list.
                self.remove_child(parent_id, id)?;
            }
        }

        let slot = &mut self.slots[id.index as usize];
        let node = slot.node.take().ok_or(Error::UnknownNode(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;

        if let Some(handle) = node.taffy {
            self.taffy.remove(handle)?;
        }
        Ok(())
    }

    // =========================================================================
    // Layout pass
    // =========================================================================

    /// Run the solver over each root at the viewport constraint, then read
    /// resolved rects back onto the nodes (absolute outer rect plus inner
    /// rect after border and padding).
    pub fn compute_layout(
        &mut self,
        roots: &[NodeId],
        viewport_width: u16,
        viewport_height: u16,
    ) -> Result<()> {
        let available = Size {
            width: AvailableSpace::Definite(viewport_width as f32),
            height: AvailableSpace::Definite(viewport_height as f32),
        };

        let root_handles: Vec<taffy::NodeId> = roots
            .iter()
            .map(|&root| self.taffy_handle(root))
            .collect::<Result<_>>()?;

        let Self { slots, taffy, .. } = self;
        let slots: &[Slot] = slots;
        for handle in root_handles {
            taffy.compute_layout_with_measure(
                handle,
                available,
                |known, available_space, _, context: Option<&mut NodeId>, _| {
                    let Some(&mut id) = context else {
                        return Size::ZERO;
                    };
                    let node = slots
                        .get(id.index as usize)
                        .filter(|slot| slot.generation == id.generation)
                        .and_then(|slot| slot.node.as_ref());
                    match node {
                        Some(node) => {
                            measure_content(&node.kind, node.style.wrap, known, available_space)
                        }
                        None => Size::ZERO,
                    }
                },
            )?;
        }

        for &root in roots {
            self.read_back(root, 0, 0)?;
        }
        trace!(roots = roots.len(), viewport_width, viewport_height, "layout pass complete");
        Ok(())
    }

    /// Copy one node's solver result into its layout rect and recurse.
    fn read_back(&mut self, id: NodeId, parent_x: i32, parent_y: i32) -> Result<()> {
        let handle = self.taffy_handle(id)?;
        let layout = *self.taffy.layout(handle)?;

        let node = self.node_mut(id)?;
        let x = parent_x + layout.location.x.round() as i32;
        let y = parent_y + layout.location.y.round() as i32;
        let width = layout.size.width.round() as i32;
        let height = layout.size.height.round() as i32;

        let border = node.style.border_widths();
        let padding = node.style.padding;
        let left = (border.left + padding.left) as i32;
        let right = (border.right + padding.right) as i32;
        let top = (border.top + padding.top) as i32;
        let bottom = (border.bottom + padding.bottom) as i32;

        node.layout = LayoutRect {
            x,
            y,
            width,
            height,
            inner_x: x + left,
            inner_y: y + top,
            inner_width: (width - left - right).max(0),
            inner_height: (height - top - bottom).max(0),
        };

        let children = node.children.clone();
        for child in children {
            self.read_back(child, x, y)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
