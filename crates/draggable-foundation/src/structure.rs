//! Builds the header/body/footer node lists from template slots.

use draggable_core::{DraggableError, NodeKey, Result, SlotNodes, VNode, DRAGGABLE_MARKER};

/// Arguments passed to the item slot for each data element.
#[derive(Debug)]
pub struct ItemScope<'a, T> {
    pub element: &'a T,
    pub index: usize,
}

type StaticSlot = Box<dyn Fn() -> SlotNodes>;
type ItemSlot<T> = Box<dyn Fn(ItemScope<'_, T>) -> SlotNodes>;

/// The three declarative regions of a draggable template.
///
/// # Example
///
/// ```rust,ignore
/// let slots = Slots::new()
///     .header(|| smallvec![VNode::element("h3").with_text("Todo")])
///     .item(|scope: ItemScope<'_, Task>| {
///         smallvec![VNode::element("li").with_text(scope.element.title.clone())]
///     });
/// ```
pub struct Slots<T> {
    header: Option<StaticSlot>,
    item: Option<ItemSlot<T>>,
    footer: Option<StaticSlot>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            header: None,
            item: None,
            footer: None,
        }
    }
}

impl<T> Slots<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, slot: impl Fn() -> SlotNodes + 'static) -> Self {
        self.header = Some(Box::new(slot));
        self
    }

    pub fn item(mut self, slot: impl Fn(ItemScope<'_, T>) -> SlotNodes + 'static) -> Self {
        self.item = Some(Box::new(slot));
        self
    }

    pub fn footer(mut self, slot: impl Fn() -> SlotNodes + 'static) -> Self {
        self.footer = Some(Box::new(slot));
        self
    }

    pub fn has_item(&self) -> bool {
        self.item.is_some()
    }
}

/// Normalized node lists for one render cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodesInfo {
    pub header: Vec<VNode>,
    /// Body nodes, one per data element and in list order.
    pub default: Vec<VNode>,
    pub footer: Vec<VNode>,
}

fn static_slot(slot: Option<&StaticSlot>) -> Vec<VNode> {
    slot.map(|produce| produce().into_vec()).unwrap_or_default()
}

/// Runs the slots against `real_list`.
///
/// Every body node gets `get_key(element)` as identity key and the
/// draggable marker. Header and footer nodes are left untouched.
pub fn compute_nodes<T>(
    slots: &Slots<T>,
    real_list: Option<&[T]>,
    get_key: &dyn Fn(&T) -> NodeKey,
) -> Result<NodesInfo> {
    let list = real_list.unwrap_or_default();
    let header = static_slot(slots.header.as_ref());
    let footer = static_slot(slots.footer.as_ref());
    let item = slots.item.as_ref().ok_or(DraggableError::MissingItemSlot)?;

    let mut default = Vec::with_capacity(list.len());
    for (index, element) in list.iter().enumerate() {
        let nodes = item(ItemScope { element, index });
        if nodes.len() != 1 {
            return Err(DraggableError::SlotCardinality {
                index,
                count: nodes.len(),
            });
        }
        for mut node in nodes {
            node.set_key(get_key(element));
            node.set_prop(DRAGGABLE_MARKER, true);
            default.push(node);
        }
    }

    if default.len() != list.len() {
        return Err(DraggableError::CardinalityMismatch {
            expected: list.len(),
            actual: default.len(),
        });
    }

    Ok(NodesInfo {
        header,
        default,
        footer,
    })
}
