//! Splitting the attribute bag between the rendered root and the drag engine.
//!
//! Visual attributes pass through to the root element. Everything else is a
//! drag-behavior option: its key is camelized and handed to the engine, with
//! the component's own lifecycle handlers layered on top.

use std::fmt;
use std::rc::Rc;

use draggable_core::collections::OrderedMap;
use draggable_core::events::{is_read_only, EVENT_TABLE};
use draggable_core::string::CamelizeCache;
use draggable_core::tags::is_html_attribute;
use draggable_core::{Attrs, Dom, DragEvent, EventCategory, MoveResult, SortableEvent};
use serde_json::Value;

/// Selector every draggable child must match.
pub const DRAGGABLE_SELECTOR: &str = "[data-draggable]";

/// Option key carrying the consumer's extra draggable selector.
pub const DRAGGABLE_OPTION: &str = "draggable";

/// Callback invoked by the drag engine.
///
/// Only move handlers produce a verdict; the others return `None`.
pub type Handler = Rc<dyn Fn(&mut dyn Dom, &SortableEvent) -> Option<MoveResult>>;

/// Factories for the three event categories.
pub trait CallbackBuilder {
    /// Handler that applies the structural effect and then forwards the event.
    fn manage_and_emit(&self, event: DragEvent) -> Handler;

    /// Handler that only forwards the event.
    fn emit(&self, event: DragEvent) -> Handler;

    /// Handler that only manages and returns its verdict.
    fn manage(&self, event: DragEvent) -> Handler;

    fn build(&self, event: DragEvent) -> Handler {
        match event.category() {
            EventCategory::ManageAndEmit => self.manage_and_emit(event),
            EventCategory::Emit => self.emit(event),
            EventCategory::Manage => self.manage(event),
        }
    }
}

/// Configuration handed to the drag engine.
#[derive(Clone)]
pub struct SortableOptions {
    entries: OrderedMap<Rc<str>, Value>,
    handlers: OrderedMap<&'static str, Handler>,
}

impl SortableOptions {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Normalized option entries, including the combined `draggable` selector.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (&**key, value))
    }

    pub fn handler(&self, event: DragEvent) -> Option<&Handler> {
        self.handlers.get(event.handler_name())
    }

    pub fn handler_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Combined selector for the children the engine may pick up.
    pub fn draggable(&self) -> &str {
        self.entries
            .get(DRAGGABLE_OPTION)
            .and_then(Value::as_str)
            .unwrap_or(DRAGGABLE_SELECTOR)
    }

    /// Every key present: option keys followed by handler keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .map(|key| &**key)
            .chain(self.handlers.keys().copied())
    }
}

impl fmt::Debug for SortableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableOptions")
            .field("entries", &self.entries)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Attributes for the rendered root: visual attributes, overridden by
/// `component_data` where keys collide.
pub fn component_attributes(attrs: &Attrs, component_data: Option<&Attrs>) -> Attrs {
    let mut attributes: Attrs = attrs
        .iter()
        .filter(|(key, _)| is_html_attribute(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    if let Some(data) = component_data {
        for (key, value) in data {
            attributes.insert(key.clone(), value.clone());
        }
    }
    attributes
}

/// Drag-behavior entries of `attrs` with normalized keys.
///
/// Keys are camelized before the reserved-name check, so `on-start` is
/// rejected just like `onStart`.
pub fn valid_sortable_entries(attrs: &Attrs, cache: &CamelizeCache) -> Vec<(Rc<str>, Value)> {
    attrs
        .iter()
        .filter(|(key, _)| !is_html_attribute(key))
        .map(|(key, value)| (cache.camelize(key), value.clone()))
        .filter(|(key, _)| !is_read_only(key))
        .collect()
}

/// Builds the drag-engine configuration for `attrs`.
pub fn create_sortable_option(
    attrs: &Attrs,
    callbacks: &dyn CallbackBuilder,
    cache: &CamelizeCache,
) -> SortableOptions {
    let mut entries: OrderedMap<Rc<str>, Value> =
        valid_sortable_entries(attrs, cache).into_iter().collect();

    let handlers = EVENT_TABLE
        .iter()
        .map(|(event, _)| (event.handler_name(), callbacks.build(*event)))
        .collect();

    let selector = draggable_selector(entries.get(DRAGGABLE_OPTION));
    entries.insert(Rc::from(DRAGGABLE_OPTION), Value::String(selector));

    SortableOptions { entries, handlers }
}

/// Engine `draggable` selector: the marker attribute, narrowed by the
/// consumer's own fragment when one is set.
pub fn draggable_selector(fragment: Option<&Value>) -> String {
    let extra = fragment.map(selector_fragment).unwrap_or_default();
    format!("{DRAGGABLE_SELECTOR}{extra}")
}

fn selector_fragment(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
