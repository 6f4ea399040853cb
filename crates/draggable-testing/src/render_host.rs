//! Render host materializing virtual nodes into a [`MemoryDom`].

use std::cell::RefCell;
use std::rc::Rc;

use draggable_core::collections::map::{new_map, HashMap};
use draggable_core::{attribute_string, Attrs, ComponentRef, Dom, ElementId, NodeId, NodeKey, VNode};
use draggable_foundation::dom_helper::remove_node;
use draggable_foundation::{Children, ComponentResolver, ElementLookup, RenderHost, RootTag};
use serde_json::Value;

use crate::memory_dom::MemoryDom;

/// DOM shared by every list rendered in one test.
pub type SharedDom = Rc<RefCell<MemoryDom>>;

/// Materializes one component into a container element.
///
/// Keyed nodes keep their element across renders, the way a keyed patch
/// reorders instead of recreating. Unkeyed nodes are recreated each time.
/// Animated-group roots render as a fragment: a text anchor plus the
/// children directly inside the container.
pub struct TestRenderHost {
    dom: SharedDom,
    container: ElementId,
    root: Option<ElementId>,
    elements: HashMap<NodeId, ElementId>,
    keyed: HashMap<NodeKey, ElementId>,
    render_count: usize,
}

impl TestRenderHost {
    pub fn new(dom: SharedDom, container: ElementId) -> Self {
        Self {
            dom,
            container,
            root: None,
            elements: new_map(),
            keyed: new_map(),
            render_count: 0,
        }
    }

    pub fn dom(&self) -> &SharedDom {
        &self.dom
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    fn element_root(&mut self, tag: &str, attrs: &Attrs) -> ElementId {
        let mut dom = self.dom.borrow_mut();
        let reusable = self
            .root
            .filter(|root| dom.is_element(*root) && dom.tag(*root) == Some(tag));
        let root = match reusable {
            Some(root) => root,
            None => {
                if let Some(stale) = self.root {
                    remove_node(&mut *dom, stale);
                }
                let root = dom.create_element(tag);
                dom.append_child(self.container, root);
                root
            }
        };
        dom.clear_attributes(root);
        apply_attributes(&mut dom, root, attrs);
        root
    }

    fn fragment_anchor(&mut self) -> ElementId {
        let mut dom = self.dom.borrow_mut();
        if let Some(root) = self.root.filter(|root| !dom.is_element(*root)) {
            return root;
        }
        if let Some(stale) = self.root {
            remove_node(&mut *dom, stale);
        }
        let anchor = dom.create_text("");
        dom.append_child(self.container, anchor);
        anchor
    }

    fn materialize(&mut self, node: &VNode) -> ElementId {
        let element = self.dom.borrow_mut().create_element(node.tag());
        self.sync(element, node);
        element
    }

    fn sync(&mut self, element: ElementId, node: &VNode) {
        {
            let mut dom = self.dom.borrow_mut();
            dom.clear_attributes(element);
            apply_attributes(&mut dom, element, node.props());
            dom.set_text(element, node.text().map(str::to_owned));
            for child in dom.children(element) {
                remove_node(&mut *dom, child);
            }
        }
        for child in node.children() {
            let materialized = self.materialize(child);
            self.elements.insert(child.id(), materialized);
            self.dom.borrow_mut().append_child(element, materialized);
        }
    }

    fn reconcile(&mut self, parent: ElementId, nodes: &[VNode]) {
        let mut previous = std::mem::take(&mut self.keyed);
        let mut order = Vec::with_capacity(nodes.len());
        for node in nodes {
            let reused = node.key().and_then(|key| previous.remove(key));
            let element = match reused {
                Some(element) => {
                    self.sync(element, node);
                    element
                }
                None => self.materialize(node),
            };
            if let Some(key) = node.key() {
                self.keyed.insert(key.clone(), element);
            }
            self.elements.insert(node.id(), element);
            order.push(element);
        }

        let mut dom = self.dom.borrow_mut();
        for stale in previous.into_values() {
            remove_node(&mut *dom, stale);
        }
        for child in dom.children(parent) {
            if !order.contains(&child) {
                remove_node(&mut *dom, child);
            }
        }
        for element in order {
            dom.insert_before(parent, element, None);
        }
    }
}

fn apply_attributes(dom: &mut MemoryDom, element: ElementId, attrs: &Attrs) {
    for (name, value) in attrs {
        if matches!(value, Value::Null | Value::Bool(false)) {
            continue;
        }
        dom.set_attribute(element, name, attribute_string(value));
    }
}

impl RenderHost for TestRenderHost {
    type Output = ElementId;

    fn h(&mut self, tag: &RootTag, attrs: &Attrs, children: Children) -> ElementId {
        self.render_count += 1;
        self.elements.clear();
        let (root, parent) = match tag {
            RootTag::Native(name) => {
                let root = self.element_root(name, attrs);
                (root, root)
            }
            RootTag::External(component) => {
                let root = self.element_root("div", attrs);
                if let Some(name) = component.name() {
                    self.dom
                        .borrow_mut()
                        .set_attribute(root, "data-component", name);
                }
                (root, root)
            }
            RootTag::AnimatedGroup(_) => (self.fragment_anchor(), self.container),
        };
        self.root = Some(root);
        self.reconcile(parent, children.nodes());
        root
    }
}

impl ElementLookup for TestRenderHost {
    fn element_of(&self, node: NodeId) -> Option<ElementId> {
        self.elements.get(&node).copied()
    }
}

/// Resolves component names to stable references.
pub struct TestComponentResolver {
    transition: ComponentRef,
    components: RefCell<HashMap<String, ComponentRef>>,
}

impl Default for TestComponentResolver {
    fn default() -> Self {
        Self {
            transition: ComponentRef::new("TransitionGroup"),
            components: RefCell::new(new_map()),
        }
    }
}

impl TestComponentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names looked up so far.
    pub fn resolved(&self) -> Vec<String> {
        let mut names: Vec<_> = self.components.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl ComponentResolver for TestComponentResolver {
    fn resolve_component(&self, name: &str) -> ComponentRef {
        self.components
            .borrow_mut()
            .entry(name.to_owned())
            .or_insert_with(|| ComponentRef::new(name))
            .clone()
    }

    fn transition_group(&self) -> ComponentRef {
        self.transition.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> TestRenderHost {
        let mut dom = MemoryDom::new();
        let body = dom.create_element("body");
        TestRenderHost::new(Rc::new(RefCell::new(dom)), body)
    }

    fn keyed(key: i64) -> VNode {
        VNode::element("li").with_key(key).with_text(key.to_string())
    }

    #[test]
    fn test_native_root_with_attributes() {
        let mut host = host();
        let mut attrs = Attrs::new();
        attrs.insert("id".into(), "list".into());
        attrs.insert("hidden".into(), false.into());
        let root = host.h(
            &RootTag::Native("ul".into()),
            &attrs,
            Children::Flat(vec![keyed(1), keyed(2)]),
        );
        let dom = host.dom().borrow();
        assert_eq!(dom.tag(root), Some("ul"));
        assert_eq!(dom.attribute(root, "id"), Some("list"));
        assert!(!dom.has_attribute(root, "hidden"));
        assert_eq!(dom.children(root).len(), 2);
        assert_eq!(dom.text_content(root), "12");
    }

    #[test]
    fn test_keyed_elements_survive_rerender() {
        let mut host = host();
        let tag = RootTag::Native("ul".into());
        let first = keyed(1);
        let first_id = first.id();
        let root = host.h(&tag, &Attrs::new(), Children::Flat(vec![first, keyed(2)]));
        let element = host.element_of(first_id).unwrap();

        let again = keyed(1);
        let again_id = again.id();
        let same_root = host.h(&tag, &Attrs::new(), Children::Flat(vec![keyed(2), again]));
        assert_eq!(root, same_root);
        assert_eq!(host.element_of(again_id), Some(element));
        assert!(host.element_of(first_id).is_none());
        assert_eq!(host.dom().borrow().children(root)[1], element);
        assert_eq!(host.render_count(), 2);
    }

    #[test]
    fn test_animated_group_renders_fragment() {
        let mut host = host();
        let anchor = host.h(
            &RootTag::AnimatedGroup(ComponentRef::new("TransitionGroup")),
            &Attrs::new(),
            Children::Default(vec![keyed(1)]),
        );
        let dom = host.dom().borrow();
        assert!(!dom.is_element(anchor));
        assert_eq!(dom.parent(anchor), Some(host.container()));
        assert_eq!(dom.children(host.container()).len(), 1);
    }

    #[test]
    fn test_resolver_returns_stable_refs() {
        let resolver = TestComponentResolver::new();
        let first = resolver.resolve_component("el-collapse");
        assert_eq!(first, resolver.resolve_component("el-collapse"));
        assert_eq!(resolver.resolved(), ["el-collapse"]);
        assert_eq!(resolver.transition_group().name(), Some("TransitionGroup"));
    }
}
