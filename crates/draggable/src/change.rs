//! Notifications the component hands back to its consumer.

use draggable_core::{DragEvent, SortableEvent};
use serde::Serialize;

/// Structural change applied to the data list by a completed drop.
///
/// Serializes to the `{ "added": { "element": .., "newIndex": .. } }` shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ChangeEvent<T> {
    Added { element: T, new_index: usize },
    Removed { element: T, old_index: usize },
    Moved { element: T, old_index: usize, new_index: usize },
}

impl<T> ChangeEvent<T> {
    pub fn element(&self) -> &T {
        match self {
            Self::Added { element, .. }
            | Self::Removed { element, .. }
            | Self::Moved { element, .. } => element,
        }
    }
}

/// Everything a draggable list emits, in emission order.
#[derive(Clone, Debug, PartialEq)]
pub enum DraggableEvent<T> {
    /// A drag-engine event forwarded under its emitted name.
    Sortable {
        event: DragEvent,
        payload: SortableEvent,
    },
    /// Delivered on the tick after the mutation that caused it.
    Change(ChangeEvent<T>),
    /// New value of a `model_value` bound list.
    UpdateModelValue(Vec<T>),
}

impl<T> DraggableEvent<T> {
    /// Consumer-facing event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sortable { event, .. } => event.emitted_name(),
            Self::Change(_) => "change",
            Self::UpdateModelValue(_) => "update:modelValue",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draggable_core::ElementId;
    use serde_json::json;

    #[test]
    fn test_change_shape() {
        let added = ChangeEvent::Added {
            element: "a",
            new_index: 2,
        };
        assert_eq!(
            serde_json::to_value(&added).unwrap(),
            json!({ "added": { "element": "a", "newIndex": 2 } })
        );

        let moved = ChangeEvent::Moved {
            element: 1,
            old_index: 0,
            new_index: 2,
        };
        assert_eq!(
            serde_json::to_value(&moved).unwrap(),
            json!({ "moved": { "element": 1, "oldIndex": 0, "newIndex": 2 } })
        );
        assert_eq!(*moved.element(), 1);
    }

    #[test]
    fn test_event_names() {
        let sortable: DraggableEvent<u8> = DraggableEvent::Sortable {
            event: DragEvent::Start,
            payload: SortableEvent::new(ElementId(1), ElementId(0)),
        };
        assert_eq!(sortable.name(), "start");
        assert_eq!(DraggableEvent::<u8>::UpdateModelValue(vec![]).name(), "update:modelValue");
        let change = DraggableEvent::Change(ChangeEvent::Removed {
            element: 1u8,
            old_index: 0,
        });
        assert_eq!(change.name(), "change");
    }
}
