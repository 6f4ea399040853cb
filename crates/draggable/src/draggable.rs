//! The draggable list component.
//!
//! A [`Draggable`] renders one node per data element and hands its container
//! to the drag engine. Engine events come back through the handlers built in
//! [`Callbacks`]: the engine's own DOM moves are undone and the data list is
//! mutated instead, so the next render moves the nodes for real.

use std::cell::RefCell;
use std::mem;
use std::rc::{Rc, Weak};

use draggable_core::{
    Attrs, Dom, DragEvent, DraggableError, ElementId, MoveResult, PullMode, Result,
    SortableEvent,
};
use draggable_foundation::dom_helper::{insert_node_at, remove_node};
use draggable_foundation::options::DRAGGABLE_OPTION;
use draggable_foundation::{
    component_attributes, compute_component_structure, create_sortable_option,
    draggable_selector, valid_sortable_entries, CallbackBuilder, ComponentResolver,
    ComponentStructure, ElementLookup, Handler, ListContext, RenderHost, Slots,
};
use serde_json::Value;

use crate::change::{ChangeEvent, DraggableEvent};
use crate::props::{DraggableProps, DraggedContext, MoveContext, RelatedContext};
use crate::scope::DragScope;
use crate::sortable::{SortableFactory, SortableInstance};

pub(crate) struct DraggableState<T> {
    props: DraggableProps<T>,
    attrs: Attrs,
    structure: Option<ComponentStructure<T>>,
    render_failed: bool,
    /// Context of the element this list started dragging.
    context: Option<ListContext<T>>,
    /// Container the engine instance is bound to.
    target: Option<ElementId>,
    sortable: Option<Box<dyn SortableInstance>>,
    /// Emissions waiting for the next tick.
    pending: Vec<DraggableEvent<T>>,
    events: Vec<DraggableEvent<T>>,
}

impl<T> DraggableState<T> {
    fn list_len(&self) -> usize {
        self.structure
            .as_ref()
            .and_then(ComponentStructure::real_list)
            .map_or(0, <[T]>::len)
    }
}

/// Handle to a draggable list. Clones share the same component.
pub struct Draggable<T> {
    state: Rc<RefCell<DraggableState<T>>>,
    scope: DragScope<T>,
}

impl<T> Clone for Draggable<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            scope: self.scope.clone(),
        }
    }
}

impl<T: Clone + 'static> Draggable<T> {
    /// Creates an unmounted list. Lists that exchange elements must be
    /// created in the same `scope`.
    pub fn new(props: DraggableProps<T>, attrs: Attrs, scope: &DragScope<T>) -> Self {
        props.check_exclusive();
        Self {
            state: Rc::new(RefCell::new(DraggableState {
                props,
                attrs,
                structure: None,
                render_failed: false,
                context: None,
                target: None,
                sortable: None,
                pending: Vec::new(),
                events: Vec::new(),
            })),
            scope: scope.clone(),
        }
    }

    pub fn scope(&self) -> &DragScope<T> {
        &self.scope
    }

    pub fn set_props(&self, props: DraggableProps<T>) {
        props.check_exclusive();
        self.state.borrow_mut().props = props;
    }

    /// Feeds back a new `model_value`, typically the payload of the last
    /// [`DraggableEvent::UpdateModelValue`].
    pub fn set_model_value(&self, list: Vec<T>) {
        self.state.borrow_mut().props.model_value = Some(list);
    }

    pub fn attrs(&self) -> Attrs {
        self.state.borrow().attrs.clone()
    }

    /// Replaces the attribute bag and pushes every drag-behavior entry to the
    /// live engine instance.
    pub fn set_attrs(&self, attrs: Attrs) {
        let entries = valid_sortable_entries(&attrs, self.scope.cache());
        let mut state = self.state.borrow_mut();
        state.attrs = attrs;
        if let Some(sortable) = state.sortable.as_mut() {
            for (key, value) in entries {
                log::trace!("updating drag option {key}");
                let value = if &*key == DRAGGABLE_OPTION {
                    Value::String(draggable_selector(Some(&value)))
                } else {
                    value
                };
                sortable.option(&key, value);
            }
        }
    }

    /// Current data list, `None` for render-only lists.
    pub fn real_list(&self) -> Option<Vec<T>> {
        self.state.borrow().props.real_list()
    }

    /// Container the drag engine is bound to, once mounted.
    pub fn target(&self) -> Option<ElementId> {
        self.state.borrow().target
    }

    pub fn is_mounted(&self) -> bool {
        self.state.borrow().sortable.is_some()
    }

    /// Builds a fresh structure for the current list and renders it.
    ///
    /// On error the previous structure is dropped and a later
    /// [`Self::mounted`] does nothing.
    pub fn render<H: RenderHost>(
        &self,
        slots: &Slots<T>,
        host: &mut H,
        resolver: &dyn ComponentResolver,
    ) -> Result<H::Output> {
        let (tag, real_list, item_key) = {
            let state = self.state.borrow();
            (
                state.props.tag.clone(),
                state.props.real_list(),
                state.props.item_key.clone(),
            )
        };
        let computed = compute_component_structure(
            slots,
            &tag,
            real_list,
            &|element: &T| item_key.key(element),
            resolver,
        );

        let mut state = self.state.borrow_mut();
        let structure = match computed {
            Ok(structure) => structure,
            Err(err) => {
                log::error!("draggable list failed to render: {err}");
                state.render_failed = true;
                state.structure = None;
                return Err(err);
            }
        };
        state.render_failed = false;
        let attributes = component_attributes(&state.attrs, state.props.component_data.as_ref());
        let output = structure.render(host, &attributes);
        state.structure = Some(structure);
        Ok(output)
    }

    /// Post-render hook: records the list context of every rendered element.
    pub fn updated(&self, lookup: &dyn ElementLookup) {
        if let Some(structure) = self.state.borrow_mut().structure.as_mut() {
            structure.updated(lookup);
        }
    }

    /// Binds the drag engine to the rendered root.
    ///
    /// A root that is not an element (a fragment anchor) hands its parent to
    /// the engine instead.
    pub fn mounted(
        &self,
        root: ElementId,
        dom: &dyn Dom,
        lookup: &dyn ElementLookup,
        factory: &mut dyn SortableFactory,
    ) -> Result<()> {
        if self.state.borrow().render_failed {
            log::warn!("not mounting draggable list at {root}: last render failed");
            return Ok(());
        }
        let target = if dom.is_element(root) {
            root
        } else {
            dom.parent(root).ok_or(DraggableError::RootNotElement)?
        };
        self.updated(lookup);

        let options = {
            let state = self.state.borrow();
            create_sortable_option(&state.attrs, &self.callbacks(), self.scope.cache())
        };
        log::debug!("mounting draggable list at {target} with {options:?}");
        let previous = self.state.borrow_mut().sortable.take();
        if let Some(mut previous) = previous {
            previous.destroy();
        }
        let instance = factory.create(target, options);
        {
            let mut state = self.state.borrow_mut();
            state.target = Some(target);
            state.sortable = Some(instance);
        }
        self.scope.register(target, &self.state);
        Ok(())
    }

    pub fn unmount(&self) {
        let (sortable, target) = {
            let mut state = self.state.borrow_mut();
            (state.sortable.take(), state.target.take())
        };
        if let Some(mut sortable) = sortable {
            sortable.destroy();
        }
        if let Some(target) = target {
            log::debug!("unmounting draggable list at {target}");
            self.scope.unregister(target);
        }
    }

    /// List context recorded for a rendered element by the last update.
    pub fn underlying_context(&self, element: ElementId) -> Option<ListContext<T>> {
        let state = self.state.borrow();
        state
            .structure
            .as_ref()
            .and_then(|structure| structure.underlying_vm(element))
            .cloned()
    }

    /// Resolves a child position of the container to a list index; `None`
    /// resolves like a position past the end.
    pub fn vm_index(&self, dom: &dyn Dom, dom_index: Option<usize>) -> Result<usize> {
        let state = self.state.borrow();
        let (Some(structure), Some(target)) = (state.structure.as_ref(), state.target) else {
            return Err(DraggableError::NotMounted);
        };
        Ok(match dom_index {
            Some(dom_index) => structure.vm_index_from_dom_index(dom, target, dom_index),
            None => state.list_len(),
        })
    }

    /// Applies `on_list` to the bound list: in place for `list`, on a copy
    /// reported through [`DraggableEvent::UpdateModelValue`] for `model_value`.
    pub fn alter_list(&self, on_list: impl FnOnce(&mut Vec<T>)) {
        let (list, model) = {
            let state = self.state.borrow();
            (state.props.list.clone(), state.props.model_value.clone())
        };
        if let Some(list) = list {
            on_list(&mut list.borrow_mut());
            return;
        }
        let mut new_list = model.unwrap_or_default();
        on_list(&mut new_list);
        self.state
            .borrow_mut()
            .events
            .push(DraggableEvent::UpdateModelValue(new_list));
    }

    /// Removes `delete_count` elements at `start` and inserts `items` there.
    /// Out-of-range bounds are clamped.
    pub fn splice_list(&self, start: usize, delete_count: usize, items: Vec<T>) {
        self.alter_list(|list| {
            let start = start.min(list.len());
            let end = start.saturating_add(delete_count).min(list.len());
            let _removed: Vec<T> = list.splice(start..end, items).collect();
        });
    }

    /// Moves the element at `old_index` to `new_index`.
    pub fn update_position(&self, old_index: usize, new_index: usize) {
        self.alter_list(|list| {
            if old_index >= list.len() {
                return;
            }
            let element = list.remove(old_index);
            let new_index = new_index.min(list.len());
            list.insert(new_index, element);
        });
    }

    /// Queues a change notification for the next tick.
    pub fn emit_changes(&self, change: ChangeEvent<T>) {
        self.state
            .borrow_mut()
            .pending
            .push(DraggableEvent::Change(change));
    }

    /// Delivers the emissions queued since the previous tick.
    pub fn next_tick(&self) {
        let mut state = self.state.borrow_mut();
        let pending = mem::take(&mut state.pending);
        state.events.extend(pending);
    }

    /// Drains the delivered events.
    pub fn take_events(&self) -> Vec<DraggableEvent<T>> {
        mem::take(&mut self.state.borrow_mut().events)
    }

    /// Dispatches an engine event the way the attached handler would.
    pub fn handle(
        &self,
        dom: &mut dyn Dom,
        event: DragEvent,
        payload: &SortableEvent,
    ) -> Option<MoveResult> {
        let handler = self.callbacks().build(event);
        handler(dom, payload)
    }

    fn callbacks(&self) -> Callbacks<T> {
        Callbacks {
            state: Rc::downgrade(&self.state),
            scope: self.scope.clone(),
        }
    }

    fn emit(&self, event: DragEvent, payload: &SortableEvent) {
        self.state.borrow_mut().pending.push(DraggableEvent::Sortable {
            event,
            payload: payload.clone(),
        });
    }

    fn manage(
        &self,
        dom: &mut dyn Dom,
        event: DragEvent,
        payload: &SortableEvent,
    ) -> Option<MoveResult> {
        log::trace!("{} for {}", event.handler_name(), payload.item);
        match event {
            DragEvent::Start => self.on_drag_start(payload),
            DragEvent::Add => self.on_drag_add(dom, payload),
            DragEvent::Remove => self.on_drag_remove(dom, payload),
            DragEvent::Update => self.on_drag_update(dom, payload),
            DragEvent::End => self.scope.end_drag(payload.item),
            DragEvent::Move => return Some(self.on_drag_move(&*dom, payload)),
            DragEvent::Choose
            | DragEvent::Unchoose
            | DragEvent::Sort
            | DragEvent::Filter
            | DragEvent::Clone => {}
        }
        None
    }

    fn resolve_index(&self, dom: &dyn Dom, dom_index: Option<usize>) -> usize {
        self.vm_index(dom, dom_index).unwrap_or_else(|err| {
            log::warn!("cannot resolve drop position: {err}");
            0
        })
    }

    fn on_drag_start(&self, payload: &SortableEvent) {
        let (context, clone) = {
            let state = self.state.borrow();
            let context = state
                .structure
                .as_ref()
                .and_then(|structure| structure.underlying_vm(payload.item))
                .cloned();
            (context, Rc::clone(&state.props.clone))
        };
        if context.is_none() {
            log::warn!("drag started on {} which is not a list element", payload.item);
        }
        let stash = context.as_ref().map(|context| clone(&context.element));
        self.state.borrow_mut().context = context;
        self.scope.start_drag(payload.item, stash);
    }

    fn on_drag_add(&self, dom: &mut dyn Dom, payload: &SortableEvent) {
        let Some(element) = self.scope.payload(payload.item) else {
            return;
        };
        remove_node(dom, payload.item);
        let new_index = self.resolve_index(&*dom, payload.new_index);
        self.splice_list(new_index, 0, vec![element.clone()]);
        self.emit_changes(ChangeEvent::Added { element, new_index });
    }

    fn on_drag_remove(&self, dom: &mut dyn Dom, payload: &SortableEvent) {
        let Some(root) = self.state.borrow().target else {
            return;
        };
        let old_index = payload
            .old_index
            .unwrap_or_else(|| dom.children(root).len());
        insert_node_at(dom, root, payload.item, old_index);
        if payload.pull_mode == Some(PullMode::Clone) {
            if let Some(clone) = payload.clone {
                remove_node(dom, clone);
            }
            return;
        }
        let Some(context) = self.state.borrow().context.clone() else {
            log::warn!("remove of {} without a recorded drag context", payload.item);
            return;
        };
        self.splice_list(context.index, 1, Vec::new());
        self.emit_changes(ChangeEvent::Removed {
            element: context.element,
            old_index: context.index,
        });
    }

    fn on_drag_update(&self, dom: &mut dyn Dom, payload: &SortableEvent) {
        remove_node(dom, payload.item);
        let old_dom_index = payload
            .old_index
            .unwrap_or_else(|| dom.children(payload.from).len());
        insert_node_at(dom, payload.from, payload.item, old_dom_index);
        let Some(context) = self.state.borrow().context.clone() else {
            log::warn!("update of {} without a recorded drag context", payload.item);
            return;
        };
        let new_index = self.resolve_index(&*dom, payload.new_index);
        self.update_position(context.index, new_index);
        self.emit_changes(ChangeEvent::Moved {
            element: context.element,
            old_index: context.index,
            new_index,
        });
    }

    fn on_drag_move(&self, dom: &dyn Dom, payload: &SortableEvent) -> MoveResult {
        let (on_move, dragged) = {
            let state = self.state.borrow();
            match &state.props.on_move {
                Some(on_move) if state.props.has_list() => {
                    (Rc::clone(on_move), state.context.clone())
                }
                _ => return MoveResult::Allow,
            }
        };
        let related_context = self.related_context(payload);
        let future_index = self.compute_future_index(dom, &related_context, payload);
        let (index, element) = dragged
            .map(|context| (Some(context.index), Some(context.element)))
            .unwrap_or_default();
        let context = MoveContext {
            event: payload.clone(),
            related_context,
            dragged_context: DraggedContext {
                index,
                element,
                future_index,
            },
        };
        on_move(&context)
    }

    fn related_context(&self, payload: &SortableEvent) -> RelatedContext<T> {
        let Some(component) = self.scope.component(payload.to) else {
            return RelatedContext::default();
        };
        let component = component.borrow();
        let list = component.props.real_list();
        let mut context = RelatedContext {
            component: Some(payload.to),
            ..RelatedContext::default()
        };
        let related = payload.related.filter(|related| *related != payload.to);
        if let (Some(related), Some(_)) = (related, &list) {
            if let Some(vm) = component
                .structure
                .as_ref()
                .and_then(|structure| structure.underlying_vm(related))
            {
                context.index = Some(vm.index);
                context.element = Some(vm.element.clone());
            }
        }
        context.list = list;
        context
    }

    /// Index the dragged element would take in the hovered list.
    fn compute_future_index(
        &self,
        dom: &dyn Dom,
        related: &RelatedContext<T>,
        payload: &SortableEvent,
    ) -> usize {
        if related.element.is_none() {
            return 0;
        }
        let displayed: Vec<ElementId> = dom
            .children(payload.to)
            .into_iter()
            .filter(|child| dom.is_displayed(*child))
            .collect();
        let Some(component) = self.scope.component(payload.to) else {
            return 0;
        };
        let component = component.borrow();
        let Some(structure) = component.structure.as_ref() else {
            return 0;
        };
        let current_index = match payload
            .related
            .and_then(|related| displayed.iter().position(|child| *child == related))
        {
            Some(dom_index) => structure.vm_index_from_dom_index(dom, payload.to, dom_index),
            None => component.list_len(),
        };
        let dragged_in_list = self
            .scope
            .dragging()
            .is_some_and(|dragging| displayed.contains(&dragging));
        if dragged_in_list || !payload.will_insert_after {
            current_index
        } else {
            current_index + 1
        }
    }
}

/// Handler factories bound to one component.
///
/// Handlers hold the component weakly: once every [`Draggable`] handle is
/// dropped, late engine events are ignored.
struct Callbacks<T> {
    state: Weak<RefCell<DraggableState<T>>>,
    scope: DragScope<T>,
}

impl<T: Clone + 'static> Callbacks<T> {
    fn handler(&self, event: DragEvent, manage: bool, emit: bool) -> Handler {
        let state = Weak::clone(&self.state);
        let scope = self.scope.clone();
        Rc::new(move |dom: &mut dyn Dom, payload: &SortableEvent| {
            let component = Draggable {
                state: state.upgrade()?,
                scope: scope.clone(),
            };
            let verdict = if manage {
                component.manage(dom, event, payload)
            } else {
                None
            };
            if emit {
                component.emit(event, payload);
            }
            verdict
        })
    }
}

impl<T: Clone + 'static> CallbackBuilder for Callbacks<T> {
    fn manage_and_emit(&self, event: DragEvent) -> Handler {
        self.handler(event, true, true)
    }

    fn emit(&self, event: DragEvent) -> Handler {
        self.handler(event, false, true)
    }

    fn manage(&self, event: DragEvent) -> Handler {
        self.handler(event, true, false)
    }
}
