//! DOM splice helpers used to undo the drag engine's own node moves.

use draggable_core::{Dom, ElementId};

/// Detaches `node` from its parent. Orphans are left alone.
pub fn remove_node(dom: &mut dyn Dom, node: ElementId) {
    if let Some(parent) = dom.parent(node) {
        dom.remove_child(parent, node);
    }
}

/// Inserts `node` so that it becomes the element child of `parent` at
/// `position`, appending when `position` is past the end.
pub fn insert_node_at(dom: &mut dyn Dom, parent: ElementId, node: ElementId, position: usize) {
    let reference = dom
        .children(parent)
        .into_iter()
        .filter(|child| *child != node)
        .nth(position);
    dom.insert_before(parent, node, reference);
}
