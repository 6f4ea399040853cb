//! Index resolution and option normalization benchmarks.

use std::cell::RefCell;
use std::hint::black_box;
use std::rc::Rc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use draggable_core::string::CamelizeCache;
use draggable_core::{Attrs, NodeKey, VNode};
use draggable_foundation::{
    compute_component_structure, valid_sortable_entries, ItemScope, Slots, TagRequest,
};
use draggable_testing::{MemoryDom, TestComponentResolver, TestRenderHost};
use serde_json::Value;
use smallvec::smallvec;

fn key(n: &u32) -> NodeKey {
    NodeKey::Int(i64::from(*n))
}

fn bench_vm_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("vm_index_from_dom_index");
    for len in [10_u32, 100, 1_000] {
        let slots = Slots::new()
            .header(|| smallvec![VNode::element("h3")])
            .item(|scope: ItemScope<'_, u32>| {
                smallvec![VNode::element("li").with_text(scope.element.to_string())]
            });
        let mut dom = MemoryDom::new();
        let body = dom.create_element("body");
        let mut host = TestRenderHost::new(Rc::new(RefCell::new(dom)), body);
        let resolver = TestComponentResolver::new();
        let mut structure = compute_component_structure(
            &slots,
            &TagRequest::from("ul"),
            Some((0..len).collect()),
            &key,
            &resolver,
        )
        .expect("bench list renders");
        let root = structure.render(&mut host, &Attrs::new());
        structure.updated(&host);
        let dom = host.dom().borrow();
        let middle = len as usize / 2;

        group.bench_with_input(BenchmarkId::new("tracked", len), &middle, |b, &middle| {
            b.iter(|| structure.vm_index_from_dom_index(&*dom, root, black_box(middle)))
        });
        group.bench_with_input(BenchmarkId::new("header", len), &0, |b, &index| {
            b.iter(|| structure.vm_index_from_dom_index(&*dom, root, black_box(index)))
        });
    }
    group.finish();
}

fn bench_sortable_entries(c: &mut Criterion) {
    let mut attrs = Attrs::new();
    for name in ["ghost-class", "chosen-class", "drag-class", "force-fallback", "id", "class"] {
        attrs.insert(name.to_owned(), Value::Bool(true));
    }
    let cache = CamelizeCache::new();
    c.bench_function("valid_sortable_entries_cached", |b| {
        b.iter(|| valid_sortable_entries(black_box(&attrs), &cache))
    });
}

criterion_group!(benches, bench_vm_index, bench_sortable_entries);
criterion_main!(benches);
