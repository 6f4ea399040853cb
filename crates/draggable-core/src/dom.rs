//! The DOM as seen by the reconciliation layer.

use crate::ElementId;

/// Attribute flagging a rendered node as a drag candidate.
pub const DRAGGABLE_MARKER: &str = "data-draggable";

/// Read/write access to the materialized node tree.
///
/// Only element children are visible through [`Dom::children`]; text nodes
/// never take part in drag positions.
pub trait Dom {
    /// Element children of `parent`, in document order.
    fn children(&self, parent: ElementId) -> Vec<ElementId>;

    fn parent(&self, node: ElementId) -> Option<ElementId>;

    fn has_attribute(&self, node: ElementId, name: &str) -> bool;

    /// Returns true for element nodes, false for text or comment nodes.
    fn is_element(&self, node: ElementId) -> bool;

    /// Returns false for nodes hidden with `display: none`.
    fn is_displayed(&self, node: ElementId) -> bool {
        let _ = node;
        true
    }

    /// Inserts `node` before `reference`, or appends when `reference` is `None`.
    ///
    /// A node that already has a parent is detached from it first.
    fn insert_before(&mut self, parent: ElementId, node: ElementId, reference: Option<ElementId>);

    fn remove_child(&mut self, parent: ElementId, node: ElementId);

    /// Element child of `parent` at `index`, if any.
    fn child_at(&self, parent: ElementId, index: usize) -> Option<ElementId> {
        self.children(parent).get(index).copied()
    }
}
