use std::cell::RefCell;
use std::rc::Rc;

use draggable::{DragScope, Draggable, DraggableEvent, DraggableProps};
use draggable_core::{Attrs, Dom, DragEvent, ElementId, MoveResult, PullMode, Result, SortableEvent};
use draggable_foundation::dom_helper::insert_node_at;
use draggable_foundation::Slots;

use crate::memory_dom::MemoryDom;
use crate::render_host::{SharedDom, TestComponentResolver, TestRenderHost};
use crate::sortable::{MockSortable, MockSortableFactory};

/// Index of a list mounted by a [`DraggableTestRule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListId(usize);

struct MountedList<T> {
    draggable: Draggable<T>,
    slots: Slots<T>,
    host: TestRenderHost,
}

/// Mounts draggable lists into one shared DOM and replays drag gestures in
/// the order the engine reports them.
pub struct DraggableTestRule<T> {
    dom: SharedDom,
    body: ElementId,
    scope: DragScope<T>,
    engine: MockSortableFactory,
    resolver: TestComponentResolver,
    lists: Vec<MountedList<T>>,
}

impl<T: Clone + 'static> Default for DraggableTestRule<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> DraggableTestRule<T> {
    pub fn new() -> Self {
        let mut dom = MemoryDom::new();
        let body = dom.create_element("body");
        Self {
            dom: Rc::new(RefCell::new(dom)),
            body,
            scope: DragScope::new(),
            engine: MockSortableFactory::new(),
            resolver: TestComponentResolver::new(),
            lists: Vec::new(),
        }
    }

    pub fn dom(&self) -> &SharedDom {
        &self.dom
    }

    pub fn scope(&self) -> &DragScope<T> {
        &self.scope
    }

    pub fn engine(&self) -> &MockSortableFactory {
        &self.engine
    }

    pub fn resolver(&self) -> &TestComponentResolver {
        &self.resolver
    }

    /// Renders and mounts a list in its own container.
    pub fn mount(&mut self, props: DraggableProps<T>, attrs: Attrs, slots: Slots<T>) -> Result<ListId> {
        let container = {
            let mut dom = self.dom.borrow_mut();
            let container = dom.create_element("section");
            dom.append_child(self.body, container);
            container
        };
        let mut host = TestRenderHost::new(Rc::clone(&self.dom), container);
        let draggable = Draggable::new(props, attrs, &self.scope);
        let root = draggable.render(&slots, &mut host, &self.resolver)?;
        {
            let dom = self.dom.borrow();
            draggable.mounted(root, &*dom, &host, &mut self.engine)?;
        }
        self.lists.push(MountedList {
            draggable,
            slots,
            host,
        });
        Ok(ListId(self.lists.len() - 1))
    }

    fn list(&self, id: ListId) -> &MountedList<T> {
        &self.lists[id.0]
    }

    pub fn draggable(&self, id: ListId) -> &Draggable<T> {
        &self.list(id).draggable
    }

    /// Container the engine is bound to.
    pub fn target(&self, id: ListId) -> ElementId {
        self.draggable(id)
            .target()
            .unwrap_or_else(|| panic!("list {id:?} is not mounted"))
    }

    pub fn root(&self, id: ListId) -> Option<ElementId> {
        self.list(id).host.root()
    }

    pub fn sortable(&self, id: ListId) -> MockSortable {
        let target = self.target(id);
        self.engine
            .instance(target)
            .unwrap_or_else(|| panic!("no engine instance on {target}"))
    }

    /// Element children of the list's container.
    pub fn children(&self, id: ListId) -> Vec<ElementId> {
        self.dom.borrow().children(self.target(id))
    }

    pub fn text_of(&self, element: ElementId) -> String {
        self.dom.borrow().text_content(element)
    }

    pub fn texts(&self, id: ListId) -> Vec<String> {
        self.children(id)
            .into_iter()
            .map(|child| self.text_of(child))
            .collect()
    }

    /// Re-renders the list, then runs its post-render hook.
    pub fn rerender(&mut self, id: ListId) -> Result<()> {
        let MountedList {
            draggable,
            slots,
            host,
        } = &mut self.lists[id.0];
        draggable.render(slots, host, &self.resolver)?;
        draggable.updated(&*host);
        Ok(())
    }

    /// Advances one tick and re-renders every list.
    pub fn await_idle(&mut self) -> Result<()> {
        for index in 0..self.lists.len() {
            self.lists[index].draggable.next_tick();
            self.rerender(ListId(index))?;
        }
        Ok(())
    }

    pub fn take_events(&self, id: ListId) -> Vec<DraggableEvent<T>> {
        self.draggable(id).take_events()
    }

    /// Fires `event` on the engine instance of `id`.
    pub fn fire(&self, id: ListId, event: DragEvent, payload: &SortableEvent) -> Option<MoveResult> {
        let sortable = self.sortable(id);
        let mut dom = self.dom.borrow_mut();
        sortable.fire(&mut *dom, event, payload)
    }

    fn child_at(&self, id: ListId, index: usize) -> ElementId {
        self.children(id)
            .get(index)
            .copied()
            .unwrap_or_else(|| panic!("list {id:?} has no child at {index}"))
    }

    /// Drags the child at `old_index` to `new_index` inside one list.
    pub fn drag_within(&mut self, id: ListId, old_index: usize, new_index: usize) -> Result<()> {
        let target = self.target(id);
        let item = self.child_at(id, old_index);
        let payload = SortableEvent::new(item, target);
        self.fire(id, DragEvent::Start, &payload);
        {
            let mut dom = self.dom.borrow_mut();
            insert_node_at(&mut *dom, target, item, new_index);
        }
        let payload = payload.with_indices(Some(old_index), Some(new_index));
        self.fire(id, DragEvent::Update, &payload);
        self.fire(id, DragEvent::End, &payload);
        self.await_idle()
    }

    /// Drags the child at `old_index` of `from` into `to` at `new_index`.
    ///
    /// In clone mode the engine leaves a copy of the node behind in `from`.
    pub fn drag_between(
        &mut self,
        from: ListId,
        to: ListId,
        old_index: usize,
        new_index: usize,
        pull_mode: PullMode,
    ) -> Result<()> {
        let source = self.target(from);
        let destination = self.target(to);
        let item = self.child_at(from, old_index);
        let start = SortableEvent::new(item, source);
        self.fire(from, DragEvent::Start, &start);

        let mut payload = start
            .with_to(destination)
            .with_indices(Some(old_index), Some(new_index))
            .with_pull_mode(pull_mode);
        {
            let mut dom = self.dom.borrow_mut();
            if pull_mode == PullMode::Clone {
                if let Some(clone) = dom.clone_node(item) {
                    insert_node_at(&mut *dom, source, clone, old_index);
                    payload = payload.with_clone(clone);
                }
            }
            insert_node_at(&mut *dom, destination, item, new_index);
        }
        self.fire(to, DragEvent::Add, &payload);
        self.fire(from, DragEvent::Remove, &payload);
        self.fire(from, DragEvent::End, &payload);
        self.await_idle()
    }

    /// Hovers the dragged child of `from` over child `related_index` of `to`
    /// and returns the move verdict. Call between a manual `Start` and `End`.
    pub fn hover(
        &self,
        from: ListId,
        item: ElementId,
        to: ListId,
        related_index: usize,
        will_insert_after: bool,
    ) -> MoveResult {
        let related = self.child_at(to, related_index);
        let payload = SortableEvent::new(item, self.target(from))
            .with_to(self.target(to))
            .with_related(related, will_insert_after);
        self.fire(from, DragEvent::Move, &payload)
            .unwrap_or_default()
    }

    pub fn unmount(&mut self, id: ListId) {
        self.draggable(id).unmount();
    }
}
