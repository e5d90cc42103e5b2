//! Transient interaction state.

use crate::dom::NodeId;

/// The element currently under the pointer, as far as the layer is concerned.
///
/// Only readable elements are ever tracked. The slot is compared by node
/// identity, so re-entering the same element does not re-trigger output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    target: Option<NodeId>,
}

impl HoverState {
    #[must_use]
    pub const fn new() -> Self {
        Self { target: None }
    }

    #[must_use]
    pub const fn target(&self) -> Option<NodeId> {
        self.target
    }

    #[must_use]
    pub fn is_tracking(&self, node: NodeId) -> bool {
        self.target == Some(node)
    }

    pub fn track(&mut self, node: NodeId) {
        self.target = Some(node);
    }

    /// Clears the slot, returning what was tracked.
    pub fn clear(&mut self) -> Option<NodeId> {
        self.target.take()
    }
}
