//! State shared by every draggable list of one element type.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use draggable_core::collections::map::{new_map, HashMap};
use draggable_core::string::CamelizeCache;
use draggable_core::ElementId;

use crate::draggable::DraggableState;

struct ScopeInner<T> {
    components: HashMap<ElementId, Weak<RefCell<DraggableState<T>>>>,
    dragging: Option<ElementId>,
    /// Element copies stashed on drag start, by dragged DOM node.
    payloads: HashMap<ElementId, T>,
}

/// Lists that can exchange elements must share one scope.
///
/// The scope maps mounted containers to their components, tracks the node
/// currently being dragged and owns the option key normalization cache.
pub struct DragScope<T> {
    inner: Rc<RefCell<ScopeInner<T>>>,
    cache: Rc<CamelizeCache>,
}

impl<T> Clone for DragScope<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            cache: Rc::clone(&self.cache),
        }
    }
}

impl<T> Default for DragScope<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ScopeInner {
                components: new_map(),
                dragging: None,
                payloads: new_map(),
            })),
            cache: Rc::new(CamelizeCache::new()),
        }
    }
}

impl<T> DragScope<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &CamelizeCache {
        &self.cache
    }

    /// DOM node currently being dragged by a list of this scope.
    pub fn dragging(&self) -> Option<ElementId> {
        self.inner.borrow().dragging
    }

    pub fn is_registered(&self, container: ElementId) -> bool {
        self.component(container).is_some()
    }

    pub(crate) fn register(&self, container: ElementId, state: &Rc<RefCell<DraggableState<T>>>) {
        log::debug!("registering draggable list at {container}");
        self.inner
            .borrow_mut()
            .components
            .insert(container, Rc::downgrade(state));
    }

    pub(crate) fn unregister(&self, container: ElementId) {
        self.inner.borrow_mut().components.remove(&container);
    }

    pub(crate) fn component(&self, container: ElementId) -> Option<Rc<RefCell<DraggableState<T>>>> {
        self.inner
            .borrow()
            .components
            .get(&container)
            .and_then(Weak::upgrade)
    }

    pub(crate) fn start_drag(&self, item: ElementId, payload: Option<T>) {
        let mut inner = self.inner.borrow_mut();
        inner.dragging = Some(item);
        match payload {
            Some(payload) => {
                inner.payloads.insert(item, payload);
            }
            None => {
                inner.payloads.remove(&item);
            }
        }
    }

    pub(crate) fn end_drag(&self, item: ElementId) {
        let mut inner = self.inner.borrow_mut();
        inner.dragging = None;
        inner.payloads.remove(&item);
    }
}

impl<T: Clone> DragScope<T> {
    /// Copy stashed for `item` when its drag started, if a list of this
    /// scope started it.
    pub(crate) fn payload(&self, item: ElementId) -> Option<T> {
        self.inner.borrow().payloads.get(&item).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_session() {
        let scope: DragScope<&str> = DragScope::new();
        assert!(scope.dragging().is_none());

        scope.start_drag(ElementId(4), Some("copy"));
        assert_eq!(scope.dragging(), Some(ElementId(4)));
        assert_eq!(scope.payload(ElementId(4)), Some("copy"));
        assert_eq!(scope.payload(ElementId(5)), None);

        scope.end_drag(ElementId(4));
        assert!(scope.dragging().is_none());
        assert_eq!(scope.payload(ElementId(4)), None);
    }

    #[test]
    fn test_clones_share_state() {
        let scope: DragScope<u8> = DragScope::new();
        let other = scope.clone();
        scope.start_drag(ElementId(1), None);
        assert_eq!(other.dragging(), Some(ElementId(1)));
        assert!(std::ptr::eq(scope.cache(), other.cache()));
        assert!(!other.is_registered(ElementId(0)));
    }
}
