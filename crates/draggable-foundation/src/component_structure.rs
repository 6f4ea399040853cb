//! The reconciled structure of one render cycle.
//!
//! [`ComponentStructure`] owns the merged child list, the resolved root and a
//! snapshot of the data list. After the renderer materializes the nodes it
//! records a [`ListContext`] per body element, which is what lets a DOM
//! position reported by the drag engine be mapped back to a list index.

use draggable_core::collections::map::{new_map, HashMap};
use draggable_core::{Attrs, Dom, ElementId, NodeId, VNode, DRAGGABLE_MARKER};

use crate::root::{RootInfo, RootTag};
use crate::structure::NodesInfo;

/// Membership of a rendered node in the data list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListContext<T> {
    pub element: T,
    pub index: usize,
}

/// Children handed to the render primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum Children {
    /// Positional children of a native element.
    Flat(Vec<VNode>),
    /// Default content region of a component root.
    Default(Vec<VNode>),
}

impl Children {
    pub fn nodes(&self) -> &[VNode] {
        match self {
            Self::Flat(nodes) | Self::Default(nodes) => nodes,
        }
    }
}

/// Render primitive of the host framework.
pub trait RenderHost {
    type Output;

    fn h(&mut self, tag: &RootTag, attrs: &Attrs, children: Children) -> Self::Output;
}

/// Post-render view of which DOM element each virtual node became.
pub trait ElementLookup {
    fn element_of(&self, node: NodeId) -> Option<ElementId>;
}

/// Merged structure for a single render cycle.
///
/// Built fresh on every render; the previous instance is discarded along
/// with its contexts.
#[derive(Debug)]
pub struct ComponentStructure<T> {
    children: Vec<VNode>,
    header_len: usize,
    body_len: usize,
    root: RootInfo,
    real_list: Option<Vec<T>>,
    /// Element of each body node, by position. Filled by [`Self::updated`].
    body_elements: Vec<Option<ElementId>>,
    contexts: HashMap<ElementId, ListContext<T>>,
}

impl<T> ComponentStructure<T> {
    pub fn new(nodes: NodesInfo, root: RootInfo, real_list: Option<Vec<T>>) -> Self {
        let NodesInfo {
            header,
            default,
            footer,
        } = nodes;
        let header_len = header.len();
        let body_len = default.len();
        let mut children = header;
        children.extend(default);
        children.extend(footer);
        Self {
            children,
            header_len,
            body_len,
            root,
            real_list,
            body_elements: Vec::new(),
            contexts: new_map(),
        }
    }

    /// Header, body and footer nodes in render order.
    pub fn children(&self) -> &[VNode] {
        &self.children
    }

    /// Body nodes, one per data element.
    pub fn default_nodes(&self) -> &[VNode] {
        &self.children[self.header_len..self.header_len + self.body_len]
    }

    pub fn root(&self) -> &RootInfo {
        &self.root
    }

    pub fn real_list(&self) -> Option<&[T]> {
        self.real_list.as_deref()
    }

    pub fn is_root_component(&self) -> bool {
        self.root.is_root_component()
    }

    /// Renders the root with all children, wrapping them as default content
    /// when the root is a component.
    pub fn render<H: RenderHost>(&self, host: &mut H, attributes: &Attrs) -> H::Output {
        let children = self.children.clone();
        let children = if self.is_root_component() {
            Children::Default(children)
        } else {
            Children::Flat(children)
        };
        host.h(self.root.tag(), attributes, children)
    }

    /// Context attached to `element` by the last [`Self::updated`] call.
    pub fn underlying_vm(&self, element: ElementId) -> Option<&ListContext<T>> {
        self.contexts.get(&element)
    }

    /// Maps a child position inside `container` to a data-list index.
    ///
    /// Never fails. Positions past the end append; positions on untracked
    /// nodes fall back to "before all" (0) or "after all" (len).
    pub fn vm_index_from_dom_index(
        &self,
        dom: &dyn Dom,
        container: ElementId,
        dom_index: usize,
    ) -> usize {
        let length = self.body_len;
        let dom_children = dom.children(container);
        let Some(&dom_element) = dom_children.get(dom_index) else {
            return length;
        };
        if let Some(context) = self.contexts.get(&dom_element) {
            return context.index;
        }

        if length == 0 {
            return 0;
        }
        let first_position = self
            .body_elements
            .first()
            .copied()
            .flatten()
            .and_then(|first| dom_children.iter().position(|child| *child == first));

        match first_position {
            Some(first) if dom_index < first => 0,
            Some(_) => length,
            None => {
                log::warn!(
                    "first list node not found in container {container}, \
                     falling back to draggable marker count"
                );
                let marker_position = dom_children
                    .iter()
                    .filter(|child| dom.has_attribute(**child, DRAGGABLE_MARKER))
                    .position(|child| *child == dom_element);
                match marker_position {
                    Some(position) if position < length => position,
                    _ if dom_index * 2 < dom_children.len() => 0,
                    _ => length,
                }
            }
        }
    }
}

impl<T: Clone> ComponentStructure<T> {
    /// Post-render hook: records the list context of every body node.
    ///
    /// Contexts from an earlier call are replaced. Does nothing when the
    /// structure has no data list.
    pub fn updated(&mut self, lookup: &dyn ElementLookup) {
        let Some(list) = self.real_list.as_ref() else {
            return;
        };
        let body = &self.children[self.header_len..self.header_len + self.body_len];
        self.contexts.clear();
        self.body_elements = body
            .iter()
            .map(|node| lookup.element_of(node.id()))
            .collect();
        for (index, element) in self.body_elements.iter().enumerate() {
            let (Some(element), Some(value)) = (element, list.get(index)) else {
                continue;
            };
            self.contexts.insert(
                *element,
                ListContext {
                    element: value.clone(),
                    index,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draggable_core::ComponentRef;

    fn nodes(header: usize, body: usize, footer: usize) -> NodesInfo {
        let make = |tag: &str, count: usize| -> Vec<VNode> {
            (0..count).map(|_| VNode::element(tag)).collect()
        };
        NodesInfo {
            header: make("header", header),
            default: make("li", body),
            footer: make("footer", footer),
        }
    }

    fn native() -> RootInfo {
        RootInfo::new(RootTag::Native("div".into()))
    }

    struct Capture;

    impl RenderHost for Capture {
        type Output = (RootTag, Children);

        fn h(&mut self, tag: &RootTag, _: &Attrs, children: Children) -> Self::Output {
            (tag.clone(), children)
        }
    }

    #[test]
    fn test_children_order() {
        let info = nodes(1, 2, 1);
        let expected: Vec<_> = info
            .header
            .iter()
            .chain(&info.default)
            .chain(&info.footer)
            .map(VNode::id)
            .collect();
        let structure: ComponentStructure<u8> = ComponentStructure::new(info, native(), None);
        let ids: Vec<_> = structure.children().iter().map(VNode::id).collect();
        assert_eq!(ids, expected);
        assert_eq!(structure.default_nodes().len(), 2);
        assert_eq!(structure.default_nodes()[0].tag(), "li");
    }

    #[test]
    fn test_render_flat_for_native_root() {
        let structure: ComponentStructure<u8> =
            ComponentStructure::new(nodes(0, 2, 0), native(), Some(vec![1, 2]));
        let (_, children) = structure.render(&mut Capture, &Attrs::new());
        assert!(matches!(children, Children::Flat(ref n) if n.len() == 2));
    }

    #[test]
    fn test_render_wrapped_for_component_roots() {
        for tag in [
            RootTag::External(ComponentRef::new("MyList")),
            RootTag::AnimatedGroup(ComponentRef::new("TransitionGroup")),
        ] {
            let structure: ComponentStructure<u8> =
                ComponentStructure::new(nodes(1, 1, 0), RootInfo::new(tag), None);
            assert!(structure.is_root_component());
            let (_, children) = structure.render(&mut Capture, &Attrs::new());
            assert!(matches!(children, Children::Default(ref n) if n.len() == 2));
        }
    }

    struct NoElements;

    impl ElementLookup for NoElements {
        fn element_of(&self, _: NodeId) -> Option<ElementId> {
            None
        }
    }

    #[test]
    fn test_updated_without_list_is_noop() {
        let mut structure: ComponentStructure<u8> =
            ComponentStructure::new(nodes(0, 2, 0), native(), None);
        structure.updated(&NoElements);
        assert!(structure.underlying_vm(ElementId(0)).is_none());
    }
}
