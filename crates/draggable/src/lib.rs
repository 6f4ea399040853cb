//! Draggable list component.
//!
//! [`Draggable`] renders a data list through template [`Slots`], binds a drag
//! engine to the rendered container and turns engine events into list
//! mutations and [`ChangeEvent`] notifications.
//!
//! # Example
//!
//! ```rust,ignore
//! let scope = DragScope::new();
//! let list = Rc::new(RefCell::new(vec![task(1), task(2), task(3)]));
//! let draggable = Draggable::new(
//!     DraggableProps::new(ItemKey::field("id")).list(Rc::clone(&list)).tag("ul"),
//!     attrs,
//!     &scope,
//! );
//! let root = draggable.render(&slots, &mut host, &resolver)?;
//! draggable.mounted(root, &dom, &host, &mut engine)?;
//! ```

mod change;
mod draggable;
mod props;
mod scope;
mod sortable;

pub use change::{ChangeEvent, DraggableEvent};
pub use draggable::Draggable;
pub use props::{
    DraggableProps, DraggedContext, ItemKey, MoveCallback, MoveContext, RelatedContext,
    SharedList,
};
pub use scope::DragScope;
pub use sortable::{SortableFactory, SortableInstance};

pub use draggable_core::{
    Attrs, ComponentRef, DragEvent, DraggableError, ElementId, MoveResult, NodeKey, PullMode,
    Result, SortableEvent, VNode,
};
pub use draggable_foundation::{ItemScope, ListContext, Slots, TagRequest};
