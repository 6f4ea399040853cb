//! Consumer-facing configuration of a draggable list.

use std::cell::RefCell;
use std::rc::Rc;

use draggable_core::{Attrs, ElementId, MoveResult, NodeKey, SortableEvent};
use draggable_foundation::TagRequest;
use serde::Serialize;

/// A list owned by the consumer and mutated in place by the component.
pub type SharedList<T> = Rc<RefCell<Vec<T>>>;

/// Consumer callback deciding whether a hovered move may proceed.
pub type MoveCallback<T> = Rc<dyn Fn(&MoveContext<T>) -> MoveResult>;

/// Extracts the identity key of a data element.
pub struct ItemKey<T>(Rc<dyn Fn(&T) -> NodeKey>);

impl<T> Clone for ItemKey<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: 'static> ItemKey<T> {
    pub fn from_fn(key: impl Fn(&T) -> NodeKey + 'static) -> Self {
        Self(Rc::new(key))
    }

    pub fn key(&self, element: &T) -> NodeKey {
        (self.0)(element)
    }
}

impl<T: Serialize + 'static> ItemKey<T> {
    /// Keys elements by one of their serialized fields, e.g. `"id"`.
    ///
    /// Elements without the field, or that fail to serialize, all share the
    /// empty key.
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::from_fn(move |element: &T| {
            let key = serde_json::to_value(element)
                .ok()
                .and_then(|value| value.get(&name).and_then(NodeKey::from_value));
            key.unwrap_or_else(|| {
                log::warn!("item key field `{name}` missing on list element");
                NodeKey::Str(String::new())
            })
        })
    }
}

/// Props of a [`crate::Draggable`].
///
/// # Example
///
/// ```rust,ignore
/// let list = Rc::new(RefCell::new(vec![task(1), task(2)]));
/// let props = DraggableProps::new(ItemKey::field("id"))
///     .list(Rc::clone(&list))
///     .tag("ul");
/// ```
pub struct DraggableProps<T> {
    pub(crate) list: Option<SharedList<T>>,
    pub(crate) model_value: Option<Vec<T>>,
    pub(crate) item_key: ItemKey<T>,
    pub(crate) tag: TagRequest,
    pub(crate) clone: Rc<dyn Fn(&T) -> T>,
    pub(crate) on_move: Option<MoveCallback<T>>,
    pub(crate) component_data: Option<Attrs>,
}

impl<T: Clone + 'static> DraggableProps<T> {
    pub fn new(item_key: ItemKey<T>) -> Self {
        Self {
            list: None,
            model_value: None,
            item_key,
            tag: TagRequest::default(),
            clone: Rc::new(T::clone),
            on_move: None,
            component_data: None,
        }
    }

    /// Binds a consumer-owned list that the component mutates in place.
    pub fn list(mut self, list: SharedList<T>) -> Self {
        self.list = Some(list);
        self
    }

    /// Binds a value list; mutations are reported as
    /// [`crate::DraggableEvent::UpdateModelValue`] instead.
    pub fn model_value(mut self, list: Vec<T>) -> Self {
        self.model_value = Some(list);
        self
    }

    pub fn tag(mut self, tag: impl Into<TagRequest>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Function applied to an element when a drag starts; the copy is what
    /// lands in the target list.
    pub fn clone_with(mut self, clone: impl Fn(&T) -> T + 'static) -> Self {
        self.clone = Rc::new(clone);
        self
    }

    pub fn on_move(mut self, on_move: impl Fn(&MoveContext<T>) -> MoveResult + 'static) -> Self {
        self.on_move = Some(Rc::new(on_move));
        self
    }

    /// Attributes merged over the visual attributes of the rendered root.
    pub fn component_data(mut self, data: Attrs) -> Self {
        self.component_data = Some(data);
        self
    }

    /// Current data list, `None` in render-only usage. `list` wins over
    /// `model_value` when both are bound.
    pub(crate) fn real_list(&self) -> Option<Vec<T>> {
        match (&self.list, &self.model_value) {
            (Some(list), _) => Some(list.borrow().clone()),
            (None, Some(model)) => Some(model.clone()),
            (None, None) => None,
        }
    }

    pub(crate) fn has_list(&self) -> bool {
        self.list.is_some() || self.model_value.is_some()
    }

    pub(crate) fn check_exclusive(&self) {
        if self.list.is_some() && self.model_value.is_some() {
            log::error!("modelValue and list props are mutually exclusive! Please set one or another.");
        }
    }
}

/// Where the dragged node would land, as seen from the hovered list.
pub struct RelatedContext<T> {
    pub index: Option<usize>,
    pub element: Option<T>,
    /// Data list of the hovered component.
    pub list: Option<Vec<T>>,
    /// Root element of the hovered component, if it is a draggable list.
    pub component: Option<ElementId>,
}

impl<T> Default for RelatedContext<T> {
    fn default() -> Self {
        Self {
            index: None,
            element: None,
            list: None,
            component: None,
        }
    }
}

/// The element being dragged and its prospective index.
pub struct DraggedContext<T> {
    pub index: Option<usize>,
    pub element: Option<T>,
    pub future_index: usize,
}

/// Argument of the consumer's move callback.
pub struct MoveContext<T> {
    pub event: SortableEvent,
    pub related_context: RelatedContext<T>,
    pub dragged_context: DraggedContext<T>,
}
