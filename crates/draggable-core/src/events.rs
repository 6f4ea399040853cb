//! Drag lifecycle events and their handling categories.

use crate::ElementId;

/// Lifecycle events reported by the drag engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragEvent {
    Start,
    Add,
    Remove,
    Update,
    End,
    Choose,
    Unchoose,
    Sort,
    Filter,
    Clone,
    Move,
}

/// How the component reacts to an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// List-mutation signals: apply the structural effect, then forward.
    ManageAndEmit,
    /// Informational: forwarded without touching the list.
    Emit,
    /// Intercepted to compute insertion context; not re-emitted.
    Manage,
}

/// Every event with its category, in handler-attachment order.
pub const EVENT_TABLE: [(DragEvent, EventCategory); 11] = [
    (DragEvent::Start, EventCategory::ManageAndEmit),
    (DragEvent::Add, EventCategory::ManageAndEmit),
    (DragEvent::Remove, EventCategory::ManageAndEmit),
    (DragEvent::Update, EventCategory::ManageAndEmit),
    (DragEvent::End, EventCategory::ManageAndEmit),
    (DragEvent::Choose, EventCategory::Emit),
    (DragEvent::Unchoose, EventCategory::Emit),
    (DragEvent::Sort, EventCategory::Emit),
    (DragEvent::Filter, EventCategory::Emit),
    (DragEvent::Clone, EventCategory::Emit),
    (DragEvent::Move, EventCategory::Manage),
];

impl DragEvent {
    pub fn category(self) -> EventCategory {
        match self {
            Self::Start | Self::Add | Self::Remove | Self::Update | Self::End => {
                EventCategory::ManageAndEmit
            }
            Self::Choose | Self::Unchoose | Self::Sort | Self::Filter | Self::Clone => {
                EventCategory::Emit
            }
            Self::Move => EventCategory::Manage,
        }
    }

    /// Canonical handler key, e.g. `onStart`.
    pub fn handler_name(self) -> &'static str {
        match self {
            Self::Start => "onStart",
            Self::Add => "onAdd",
            Self::Remove => "onRemove",
            Self::Update => "onUpdate",
            Self::End => "onEnd",
            Self::Choose => "onChoose",
            Self::Unchoose => "onUnchoose",
            Self::Sort => "onSort",
            Self::Filter => "onFilter",
            Self::Clone => "onClone",
            Self::Move => "onMove",
        }
    }

    /// Lowercase name under which the event is forwarded to the consumer.
    pub fn emitted_name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Update => "update",
            Self::End => "end",
            Self::Choose => "choose",
            Self::Unchoose => "unchoose",
            Self::Sort => "sort",
            Self::Filter => "filter",
            Self::Clone => "clone",
            Self::Move => "move",
        }
    }

    pub fn from_handler_name(name: &str) -> Option<Self> {
        EVENT_TABLE
            .iter()
            .map(|(event, _)| *event)
            .find(|event| event.handler_name() == name)
    }
}

/// Returns true for keys the component manages itself and therefore never
/// forwards as drag-behavior options. Only exact canonical forms match.
pub fn is_read_only(key: &str) -> bool {
    DragEvent::from_handler_name(key).is_some()
}

/// How an element left its source list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullMode {
    Move,
    Clone,
}

/// Payload the drag engine passes to every handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortableEvent {
    /// The dragged DOM node.
    pub item: ElementId,
    /// Container the drag started in.
    pub from: ElementId,
    /// Container the node is over or was dropped into.
    pub to: ElementId,
    pub old_index: Option<usize>,
    pub new_index: Option<usize>,
    /// Clone left behind in `from` when pulling in clone mode.
    pub clone: Option<ElementId>,
    pub pull_mode: Option<PullMode>,
    /// Node the dragged item is hovering (move events only).
    pub related: Option<ElementId>,
    pub will_insert_after: bool,
}

impl SortableEvent {
    /// An event for `item` moving inside `container`.
    pub fn new(item: ElementId, container: ElementId) -> Self {
        Self {
            item,
            from: container,
            to: container,
            old_index: None,
            new_index: None,
            clone: None,
            pull_mode: None,
            related: None,
            will_insert_after: false,
        }
    }

    pub fn with_to(mut self, to: ElementId) -> Self {
        self.to = to;
        self
    }

    pub fn with_indices(mut self, old_index: Option<usize>, new_index: Option<usize>) -> Self {
        self.old_index = old_index;
        self.new_index = new_index;
        self
    }

    pub fn with_clone(mut self, clone: ElementId) -> Self {
        self.clone = Some(clone);
        self.pull_mode = Some(PullMode::Clone);
        self
    }

    pub fn with_pull_mode(mut self, mode: PullMode) -> Self {
        self.pull_mode = Some(mode);
        self
    }

    pub fn with_related(mut self, related: ElementId, will_insert_after: bool) -> Self {
        self.related = Some(related);
        self.will_insert_after = will_insert_after;
        self
    }
}

/// Verdict returned from a move handler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MoveResult {
    #[default]
    Allow,
    Cancel,
    InsertBefore,
    InsertAfter,
}
