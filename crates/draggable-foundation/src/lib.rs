//! Reconciliation layer between a data list and its draggable DOM nodes.
//!
//! # Architecture
//!
//! - [`options`] - splits configuration into root attributes and drag-engine
//!   options, and wires the lifecycle handlers
//! - [`structure`] - builds header/body/footer nodes from template slots
//! - [`root`] - resolves the requested root tag
//! - [`ComponentStructure`] - merged structure of a render cycle, with the
//!   DOM index to list index resolution
//! - [`dom_helper`] - splice helpers for undoing engine-side DOM moves

mod component_structure;
pub mod dom_helper;
pub mod options;
mod render_helper;
pub mod root;
pub mod structure;

pub use component_structure::*;
pub use options::{
    component_attributes, create_sortable_option, draggable_selector, valid_sortable_entries,
    CallbackBuilder, Handler, SortableOptions,
};
pub use render_helper::compute_component_structure;
pub use root::{root_information, ComponentResolver, RootInfo, RootTag, TagRequest};
pub use structure::{compute_nodes, ItemScope, NodesInfo, Slots};
