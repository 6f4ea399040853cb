//! A minimal in-memory node tree.

use draggable_core::{Dom, ElementId};
use indexmap::IndexMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeKind {
    Element,
    Text,
    Comment,
}

#[derive(Clone, Debug)]
struct MemoryNode {
    kind: NodeKind,
    tag: String,
    text: Option<String>,
    attributes: IndexMap<String, String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    displayed: bool,
}

impl MemoryNode {
    fn new(kind: NodeKind, tag: &str) -> Self {
        Self {
            kind,
            tag: tag.to_owned(),
            text: None,
            attributes: IndexMap::new(),
            parent: None,
            children: Vec::new(),
            displayed: true,
        }
    }
}

/// Node tree backing tests. Ids are never reused, detached nodes stay
/// addressable.
#[derive(Clone, Debug, Default)]
pub struct MemoryDom {
    nodes: Vec<MemoryNode>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: MemoryNode) -> ElementId {
        self.nodes.push(node);
        ElementId(self.nodes.len() - 1)
    }

    fn node(&self, id: ElementId) -> Option<&MemoryNode> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.push(MemoryNode::new(NodeKind::Element, tag))
    }

    pub fn create_text(&mut self, text: &str) -> ElementId {
        let mut node = MemoryNode::new(NodeKind::Text, "#text");
        node.text = Some(text.to_owned());
        self.push(node)
    }

    pub fn create_comment(&mut self) -> ElementId {
        self.push(MemoryNode::new(NodeKind::Comment, "#comment"))
    }

    /// Shallow copy of `node`: tag, attributes and own text, detached.
    pub fn clone_node(&mut self, node: ElementId) -> Option<ElementId> {
        let mut copy = self.node(node)?.clone();
        copy.parent = None;
        copy.children.clear();
        Some(self.push(copy))
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.insert_before(parent, child, None);
    }

    pub fn tag(&self, node: ElementId) -> Option<&str> {
        self.node(node).map(|node| node.tag.as_str())
    }

    pub fn set_text(&mut self, node: ElementId, text: Option<String>) {
        if let Some(node) = self.node_mut(node) {
            node.text = text;
        }
    }

    /// Own text of `node` followed by the text of its descendants.
    pub fn text_content(&self, node: ElementId) -> String {
        let Some(current) = self.node(node) else {
            return String::new();
        };
        let mut text = current.text.clone().unwrap_or_default();
        for child in &current.children {
            text.push_str(&self.text_content(*child));
        }
        text
    }

    pub fn attribute(&self, node: ElementId, name: &str) -> Option<&str> {
        self.node(node)?.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self, node: ElementId) -> Vec<(&str, &str)> {
        self.node(node)
            .map(|node| {
                node.attributes
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_attribute(&mut self, node: ElementId, name: &str, value: impl Into<String>) {
        if let Some(node) = self.node_mut(node) {
            node.attributes.insert(name.to_owned(), value.into());
        }
    }

    pub fn remove_attribute(&mut self, node: ElementId, name: &str) {
        if let Some(node) = self.node_mut(node) {
            node.attributes.shift_remove(name);
        }
    }

    pub fn clear_attributes(&mut self, node: ElementId) {
        if let Some(node) = self.node_mut(node) {
            node.attributes.clear();
        }
    }

    /// Hides or shows `node`, like toggling `display: none`.
    pub fn set_displayed(&mut self, node: ElementId, displayed: bool) {
        if let Some(node) = self.node_mut(node) {
            node.displayed = displayed;
        }
    }

    /// Every child of `parent`, text and comment nodes included.
    pub fn child_nodes(&self, parent: ElementId) -> Vec<ElementId> {
        self.node(parent)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn detach(&mut self, node: ElementId) {
        let Some(parent) = self.node(node).and_then(|node| node.parent) else {
            return;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|child| *child != node);
        }
        if let Some(node) = self.node_mut(node) {
            node.parent = None;
        }
    }
}

impl Dom for MemoryDom {
    fn children(&self, parent: ElementId) -> Vec<ElementId> {
        self.node(parent)
            .map(|node| {
                node.children
                    .iter()
                    .copied()
                    .filter(|child| self.is_element(*child))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn parent(&self, node: ElementId) -> Option<ElementId> {
        self.node(node)?.parent
    }

    fn has_attribute(&self, node: ElementId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn is_element(&self, node: ElementId) -> bool {
        self.node(node)
            .is_some_and(|node| node.kind == NodeKind::Element)
    }

    fn is_displayed(&self, node: ElementId) -> bool {
        self.node(node).is_some_and(|node| node.displayed)
    }

    fn insert_before(&mut self, parent: ElementId, node: ElementId, reference: Option<ElementId>) {
        if self.node(parent).is_none() || self.node(node).is_none() || parent == node {
            return;
        }
        self.detach(node);
        if let Some(parent_node) = self.node_mut(parent) {
            let position = reference
                .and_then(|reference| parent_node.children.iter().position(|c| *c == reference))
                .unwrap_or(parent_node.children.len());
            parent_node.children.insert(position, node);
        }
        if let Some(node) = self.node_mut(node) {
            node.parent = Some(parent);
        }
    }

    fn remove_child(&mut self, parent: ElementId, node: ElementId) {
        if self.parent(node) == Some(parent) {
            self.detach(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_children_skip_text() {
        let mut dom = MemoryDom::new();
        let root = dom.create_element("ul");
        let text = dom.create_text("hello");
        let first = dom.create_element("li");
        let second = dom.create_element("li");
        for child in [text, first, second] {
            dom.append_child(root, child);
        }
        assert_eq!(dom.children(root), [first, second]);
        assert_eq!(dom.child_nodes(root).len(), 3);
        assert!(!dom.is_element(text));
        assert_eq!(dom.text_content(root), "hello");
    }

    #[test]
    fn test_insert_before_moves_node() {
        let mut dom = MemoryDom::new();
        let a = dom.create_element("ul");
        let b = dom.create_element("ul");
        let item = dom.create_element("li");
        let other = dom.create_element("li");
        dom.append_child(a, item);
        dom.append_child(b, other);

        dom.insert_before(b, item, Some(other));
        assert!(dom.children(a).is_empty());
        assert_eq!(dom.children(b), [item, other]);
        assert_eq!(dom.parent(item), Some(b));

        dom.remove_child(a, item);
        assert_eq!(dom.parent(item), Some(b));
        dom.remove_child(b, item);
        assert_eq!(dom.parent(item), None);
    }

    #[test]
    fn test_clone_node_is_detached_copy() {
        let mut dom = MemoryDom::new();
        let root = dom.create_element("ul");
        let item = dom.create_element("li");
        dom.set_attribute(item, "data-draggable", "true");
        dom.append_child(root, item);

        let copy = dom.clone_node(item).unwrap();
        assert_ne!(copy, item);
        assert_eq!(dom.parent(copy), None);
        assert_eq!(dom.attribute(copy, "data-draggable"), Some("true"));
    }

    #[test]
    fn test_displayed_flag() {
        let mut dom = MemoryDom::new();
        let node = dom.create_element("li");
        assert!(dom.is_displayed(node));
        dom.set_displayed(node, false);
        assert!(!dom.is_displayed(node));
    }
}
