//! Core data model for keeping draggable DOM nodes in sync with a data list.
//!
//! This crate holds the pieces every other layer shares:
//! - [`VNode`] and the identities ([`NodeId`], [`ElementId`], [`NodeKey`]) that
//!   tie virtual nodes to materialized DOM nodes
//! - the [`Dom`] collaborator trait
//! - [`tags`]: classification of root tags and configuration keys
//! - [`string`]: memoized key normalization
//! - [`events`]: the drag lifecycle catalogue
//! - [`DraggableError`]: configuration errors

pub mod collections;
mod dom;
mod error;
pub mod events;
mod node;
pub mod string;
pub mod tags;

pub use dom::*;
pub use error::*;
pub use events::{DragEvent, EventCategory, MoveResult, PullMode, SortableEvent};
pub use node::*;

/// Free-form attribute bag attached to a component, in declaration order.
pub type Attrs = collections::OrderedMap<String, serde_json::Value>;
