use std::cell::RefCell;
use std::rc::Rc;

use draggable_core::{Attrs, Dom, ElementId, NodeId, NodeKey, VNode, DRAGGABLE_MARKER};
use draggable_foundation::dom_helper::{insert_node_at, remove_node};
use draggable_foundation::{
    compute_component_structure, ComponentStructure, ElementLookup, ItemScope, Slots, TagRequest,
};
use draggable_testing::{MemoryDom, TestComponentResolver, TestRenderHost};
use smallvec::smallvec;

fn key(n: &u32) -> NodeKey {
    NodeKey::Int(i64::from(*n))
}

fn slots(header: bool, footer: bool) -> Slots<u32> {
    let mut slots = Slots::new().item(|scope: ItemScope<'_, u32>| {
        smallvec![VNode::element("li").with_text(scope.element.to_string())]
    });
    if header {
        slots = slots.header(|| smallvec![VNode::element("h3")]);
    }
    if footer {
        slots = slots.footer(|| smallvec![VNode::element("footer")]);
    }
    slots
}

struct Rendered {
    host: TestRenderHost,
    root: ElementId,
    structure: ComponentStructure<u32>,
}

fn render(list: Vec<u32>, header: bool, footer: bool) -> Rendered {
    let mut dom = MemoryDom::new();
    let body = dom.create_element("body");
    let mut host = TestRenderHost::new(Rc::new(RefCell::new(dom)), body);
    let resolver = TestComponentResolver::new();
    let mut structure = compute_component_structure(
        &slots(header, footer),
        &TagRequest::from("ul"),
        Some(list),
        &key,
        &resolver,
    )
    .unwrap();
    let root = structure.render(&mut host, &Attrs::new());
    structure.updated(&host);
    Rendered {
        host,
        root,
        structure,
    }
}

#[test]
fn test_each_body_position_resolves_to_its_index() {
    let rendered = render(vec![10, 20, 30], true, true);
    let dom = rendered.host.dom().borrow();
    let children = dom.children(rendered.root);
    assert_eq!(children.len(), 5);
    for index in 0..3 {
        let dom_index = index + 1;
        assert_eq!(
            rendered
                .structure
                .vm_index_from_dom_index(&*dom, rendered.root, dom_index),
            index
        );
        let context = rendered.structure.underlying_vm(children[dom_index]).unwrap();
        assert_eq!(context.index, index);
        assert_eq!(context.element, [10, 20, 30][index]);
    }
}

#[test]
fn test_header_and_footer_positions() {
    let rendered = render(vec![10, 20, 30], true, true);
    let dom = rendered.host.dom().borrow();
    let resolve = |dom_index| {
        rendered
            .structure
            .vm_index_from_dom_index(&*dom, rendered.root, dom_index)
    };
    assert_eq!(resolve(0), 0);
    assert_eq!(resolve(4), 3);
}

#[test]
fn test_past_the_end_appends() {
    let rendered = render(vec![10, 20, 30], false, false);
    let dom = rendered.host.dom().borrow();
    for dom_index in [3, 4, 100] {
        assert_eq!(
            rendered
                .structure
                .vm_index_from_dom_index(&*dom, rendered.root, dom_index),
            3
        );
    }
}

#[test]
fn test_empty_list_resolves_to_zero() {
    let rendered = render(Vec::new(), true, false);
    let dom = rendered.host.dom().borrow();
    assert_eq!(
        rendered
            .structure
            .vm_index_from_dom_index(&*dom, rendered.root, 0),
        0
    );
}

#[test]
fn test_contexts_follow_rerender() {
    let mut rendered = render(vec![10, 20], false, false);
    let resolver = TestComponentResolver::new();
    let mut structure = compute_component_structure(
        &slots(false, false),
        &TagRequest::from("ul"),
        Some(vec![20, 10]),
        &key,
        &resolver,
    )
    .unwrap();
    let root = structure.render(&mut rendered.host, &Attrs::new());
    structure.updated(&rendered.host);
    assert_eq!(root, rendered.root);

    let dom = rendered.host.dom().borrow();
    let children = dom.children(root);
    assert_eq!(structure.underlying_vm(children[0]).unwrap().element, 20);
    assert_eq!(structure.underlying_vm(children[1]).unwrap().element, 10);
}

struct Untracked;

impl ElementLookup for Untracked {
    fn element_of(&self, _: NodeId) -> Option<ElementId> {
        None
    }
}

/// A container whose body nodes were never reported by the renderer:
/// a header, `marked` marker-tagged nodes and a footer.
fn untracked_with(
    marked: usize,
    list: Vec<u32>,
) -> (MemoryDom, ElementId, ComponentStructure<u32>) {
    let mut dom = MemoryDom::new();
    let container = dom.create_element("ul");
    let header = dom.create_element("h3");
    dom.append_child(container, header);
    for _ in 0..marked {
        let child = dom.create_element("li");
        dom.set_attribute(child, DRAGGABLE_MARKER, "true");
        dom.append_child(container, child);
    }
    let footer = dom.create_element("footer");
    dom.append_child(container, footer);
    let resolver = TestComponentResolver::new();
    let mut structure = compute_component_structure(
        &slots(false, false),
        &TagRequest::from("ul"),
        Some(list),
        &key,
        &resolver,
    )
    .unwrap();
    structure.updated(&Untracked);
    (dom, container, structure)
}

fn untracked() -> (MemoryDom, ElementId, ComponentStructure<u32>) {
    untracked_with(2, vec![1, 2, 3])
}

#[test]
fn test_marker_count_fallback() {
    let (dom, container, structure) = untracked();
    assert_eq!(structure.vm_index_from_dom_index(&dom, container, 1), 0);
    assert_eq!(structure.vm_index_from_dom_index(&dom, container, 2), 1);
}

#[test]
fn test_midpoint_fallback() {
    let (dom, container, structure) = untracked();
    assert_eq!(structure.vm_index_from_dom_index(&dom, container, 0), 0);
    assert_eq!(structure.vm_index_from_dom_index(&dom, container, 3), 3);
}

#[test]
fn test_marker_past_list_end_splits_at_midpoint() {
    // [h3, li x5, footer] against a two-element list
    let (dom, container, structure) = untracked_with(5, vec![1, 2]);
    assert_eq!(structure.vm_index_from_dom_index(&dom, container, 1), 0);
    assert_eq!(structure.vm_index_from_dom_index(&dom, container, 2), 1);
    // third marker sits in the first half of seven children
    assert_eq!(structure.vm_index_from_dom_index(&dom, container, 3), 0);
    // fifth marker sits in the second half
    assert_eq!(structure.vm_index_from_dom_index(&dom, container, 5), 2);
}

#[test]
fn test_remove_node() {
    let mut dom = MemoryDom::new();
    let parent = dom.create_element("ul");
    let child = dom.create_element("li");
    dom.append_child(parent, child);

    remove_node(&mut dom, child);
    assert!(dom.children(parent).is_empty());
    assert_eq!(dom.parent(child), None);

    // orphans are left alone
    remove_node(&mut dom, child);
    assert_eq!(dom.parent(child), None);
}

#[test]
fn test_insert_node_at() {
    let mut dom = MemoryDom::new();
    let parent = dom.create_element("ul");
    let existing: Vec<_> = (0..3)
        .map(|_| {
            let child = dom.create_element("li");
            dom.append_child(parent, child);
            child
        })
        .collect();
    let node = dom.create_element("li");

    insert_node_at(&mut dom, parent, node, 1);
    assert_eq!(dom.children(parent), [existing[0], node, existing[1], existing[2]]);

    insert_node_at(&mut dom, parent, node, 0);
    assert_eq!(dom.children(parent)[0], node);

    insert_node_at(&mut dom, parent, node, 10);
    assert_eq!(dom.children(parent)[3], node);
    assert_eq!(dom.children(parent).len(), 4);
}
