//! Recording stand-in for the drag engine.

use std::cell::RefCell;
use std::rc::Rc;

use draggable::{SortableFactory, SortableInstance};
use draggable_core::{Dom, DragEvent, ElementId, MoveResult, SortableEvent};
use draggable_foundation::SortableOptions;
use serde_json::Value;

/// What the engine was told by one component.
#[derive(Debug)]
pub struct MockSortableState {
    pub container: ElementId,
    pub options: SortableOptions,
    /// Option updates pushed after creation, in order.
    pub updates: Vec<(String, Value)>,
    pub destroyed: bool,
}

/// Handle to one created engine instance.
#[derive(Clone, Debug)]
pub struct MockSortable {
    state: Rc<RefCell<MockSortableState>>,
}

impl MockSortable {
    pub fn container(&self) -> ElementId {
        self.state.borrow().container
    }

    pub fn options(&self) -> SortableOptions {
        self.state.borrow().options.clone()
    }

    pub fn updates(&self) -> Vec<(String, Value)> {
        self.state.borrow().updates.clone()
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    /// Invokes the handler the component attached for `event`.
    pub fn fire(
        &self,
        dom: &mut dyn Dom,
        event: DragEvent,
        payload: &SortableEvent,
    ) -> Option<MoveResult> {
        let handler = self.state.borrow().options.handler(event).cloned();
        match handler {
            Some(handler) => handler(dom, payload),
            None => {
                log::warn!("no {} handler on {}", event.handler_name(), self.container());
                None
            }
        }
    }
}

impl SortableInstance for MockSortable {
    fn option(&mut self, key: &str, value: Value) {
        self.state
            .borrow_mut()
            .updates
            .push((key.to_owned(), value));
    }

    fn destroy(&mut self) {
        self.state.borrow_mut().destroyed = true;
    }
}

/// Factory keeping a handle to every instance it created.
#[derive(Clone, Debug, Default)]
pub struct MockSortableFactory {
    created: Rc<RefCell<Vec<MockSortable>>>,
}

impl MockSortableFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> Vec<MockSortable> {
        self.created.borrow().clone()
    }

    /// Live instance bound to `container`.
    pub fn instance(&self, container: ElementId) -> Option<MockSortable> {
        self.created
            .borrow()
            .iter()
            .rev()
            .find(|sortable| sortable.container() == container && !sortable.is_destroyed())
            .cloned()
    }
}

impl SortableFactory for MockSortableFactory {
    fn create(&mut self, container: ElementId, options: SortableOptions) -> Box<dyn SortableInstance> {
        let sortable = MockSortable {
            state: Rc::new(RefCell::new(MockSortableState {
                container,
                options,
                updates: Vec::new(),
                destroyed: false,
            })),
        };
        self.created.borrow_mut().push(sortable.clone());
        Box::new(sortable)
    }
}
