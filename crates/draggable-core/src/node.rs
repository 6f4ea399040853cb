//! Virtual nodes and the identities that tie them to the DOM.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;
use smallvec::SmallVec;

use crate::Attrs;

static NEXT_NODE_ID: AtomicUsize = AtomicUsize::new(1);
static NEXT_COMPONENT_ID: AtomicUsize = AtomicUsize::new(1);

/// Stable identity of a virtual node within a render cycle.
///
/// The renderer reports which DOM element it materialized for each id, so
/// per-node metadata can live in side tables instead of on the DOM itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Allocates a fresh, process-unique id.
    pub fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Handle of a materialized DOM node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity key of a body node, derived from its data element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Int(i64),
    Str(String),
}

impl NodeKey {
    /// Converts a JSON scalar into a key. Objects and arrays are keyed by
    /// their serialized form; `null` yields no key.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Number(n) => Some(
                n.as_i64()
                    .map(Self::Int)
                    .unwrap_or_else(|| Self::Str(n.to_string())),
            ),
            other => Some(Self::Str(other.to_string())),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for NodeKey {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for NodeKey {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for NodeKey {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Opaque reference to a host component (registered, inline or built-in).
///
/// Two references are equal only when they come from the same constructor
/// call or one is a clone of the other.
#[derive(Clone, Debug)]
pub struct ComponentRef {
    id: usize,
    name: Option<Rc<str>>,
}

impl ComponentRef {
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        Self {
            id: NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed),
            name: Some(name.into()),
        }
    }

    /// A component without a registered name, e.g. an inline definition.
    pub fn anonymous() -> Self {
        Self {
            id: NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed),
            name: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl PartialEq for ComponentRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentRef {}

/// Output of a template slot. Item slots are expected to yield exactly one.
pub type SlotNodes = SmallVec<[VNode; 1]>;

/// A renderable unit produced by a template slot.
#[derive(Clone, Debug, PartialEq)]
pub struct VNode {
    id: NodeId,
    tag: String,
    key: Option<NodeKey>,
    props: Attrs,
    text: Option<String>,
    children: Vec<VNode>,
}

impl VNode {
    /// Creates an element node with a fresh [`NodeId`].
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            tag: tag.into(),
            key: None,
            props: Attrs::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_key(mut self, key: impl Into<NodeKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn key(&self) -> Option<&NodeKey> {
        self.key.as_ref()
    }

    pub fn set_key(&mut self, key: NodeKey) {
        self.key = Some(key);
    }

    pub fn props(&self) -> &Attrs {
        &self.props
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    pub fn set_prop(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.props.insert(name.into(), value.into());
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[VNode] {
        &self.children
    }
}

/// Converts an attribute value to its DOM string form.
pub fn attribute_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
