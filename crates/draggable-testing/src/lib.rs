//! Test doubles for draggable lists: an in-memory DOM, a render host that
//! materializes into it, a recording drag engine and a harness tying them
//! together.

pub mod memory_dom;
pub mod render_host;
pub mod sortable;
pub mod test_rule;

pub use memory_dom::MemoryDom;
pub use render_host::{SharedDom, TestComponentResolver, TestRenderHost};
pub use sortable::{MockSortable, MockSortableFactory, MockSortableState};
pub use test_rule::*;
