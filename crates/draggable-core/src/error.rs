use thiserror::Error;

pub type Result<T> = std::result::Result<T, DraggableError>;

/// Configuration errors raised while building or mounting a draggable list.
///
/// These are fatal: a template that trips one of them cannot establish the
/// one-to-one mapping between data elements and rendered nodes. Index
/// resolution never produces an error, it degrades instead.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum DraggableError {
    #[error("draggable element must have an item slot")]
    MissingItemSlot,

    /// The item slot yielded zero or several nodes for one element.
    #[error("item slot must have only one child (element {index} produced {count})")]
    SlotCardinality { index: usize, count: usize },

    #[error("item slot must have only one child ({actual} nodes for {expected} elements)")]
    CardinalityMismatch { expected: usize, actual: usize },

    #[error("root node is not attached to an element")]
    RootNotElement,

    #[error("component is not mounted")]
    NotMounted,
}
