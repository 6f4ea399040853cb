//! Seam to the drag engine.

use draggable_core::ElementId;
use draggable_foundation::SortableOptions;
use serde_json::Value;

/// Creates drag-engine instances bound to a container element.
pub trait SortableFactory {
    fn create(&mut self, container: ElementId, options: SortableOptions) -> Box<dyn SortableInstance>;
}

/// A live drag-engine instance.
pub trait SortableInstance {
    /// Updates a single option after creation.
    fn option(&mut self, key: &str, value: Value);

    fn destroy(&mut self);
}
