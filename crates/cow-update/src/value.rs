//! The shared document tree: [`Value`] variants behind cheap [`Node`] handles.
//!
//! Every container holds its children as `Node` handles, so cloning a node is
//! an `Arc` bump and rebuilding a container along an update path shares every
//! untouched child with the original tree.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use indexmap::IndexMap;
use opt_cell::Opt;

/// A value in a document tree.
///
/// `Obj` keeps insertion order (the order of keys in a record is observable
/// and survives reconstruction). `Opt` is the external one-slot container
/// threaded transparently through deep updates. `Delete` is the delete-marker
/// sentinel: it is only meaningful as a patch value or as the result of a
/// terminal `set`/`modify`, never as document content.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Arr(Vec<Node>),
    Obj(IndexMap<String, Node>),
    Opt(Opt<Node>),
    Delete,
}

/// A shared handle to a [`Value`].
///
/// `Clone` is cheap (reference count bump). Structural equality is available
/// through `PartialEq` for assertions and consumers; the update engine itself
/// only ever uses [`Node::same`].
#[derive(Clone, PartialEq)]
pub struct Node(Arc<Value>);

impl Node {
    /// Wrap a value in a fresh handle.
    pub fn new(value: Value) -> Node {
        Node(Arc::new(value))
    }

    /// The null value.
    pub fn null() -> Node {
        Node::new(Value::Null)
    }

    /// The delete-marker sentinel.
    ///
    /// Distinguishable from every legitimate document value, including null.
    /// Use it as a patch value in [`update`](crate::update) or return it from
    /// a `modify` closure to erase the targeted key.
    pub fn delete_marker() -> Node {
        Node::new(Value::Delete)
    }

    /// True if this handle is the delete-marker sentinel.
    pub fn is_delete_marker(&self) -> bool {
        matches!(*self.0, Value::Delete)
    }

    /// Strict identity in the sense the update engine uses for no-op
    /// detection: same allocation, or value equality for primitive leaves,
    /// or both sides being the canonical empty optional.
    ///
    /// Containers compare by pointer only. This is never a deep equality.
    ///
    /// # Example
    ///
    /// ```
    /// use cow_update::{node, Node};
    ///
    /// let a = node!({"x": 1});
    /// assert!(a.same(&a.clone()));
    /// assert!(node!(1).same(&node!(1)));
    /// assert!(!node!({"x": 1}).same(&node!({"x": 1})));
    /// ```
    pub fn same(&self, other: &Node) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        match (&*self.0, &*other.0) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Opt(a), Value::Opt(b)) => a.is_empty() && b.is_empty(),
            (Value::Delete, Value::Delete) => true,
            _ => false,
        }
    }

    /// Structural copy with fresh allocations at every level.
    ///
    /// Used when a default value is injected into a path: the substituted
    /// subtree must not share identity with the caller's default instance.
    pub fn deep_clone(&self) -> Node {
        match &*self.0 {
            Value::Arr(items) => Node::new(Value::Arr(items.iter().map(Node::deep_clone).collect())),
            Value::Obj(map) => Node::new(Value::Obj(
                map.iter().map(|(k, v)| (k.clone(), v.deep_clone())).collect(),
            )),
            Value::Opt(cell) => Node::new(Value::Opt(match cell.get() {
                Some(inner) => Opt::new(inner.deep_clone()),
                None => Opt::empty(),
            })),
            other => Node::new(other.clone()),
        }
    }

    /// Borrow the record map, if this is a record.
    pub fn as_obj(&self) -> Option<&IndexMap<String, Node>> {
        match &*self.0 {
            Value::Obj(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the element vector, if this is an array.
    pub fn as_arr(&self) -> Option<&Vec<Node>> {
        match &*self.0 {
            Value::Arr(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the optional container, if this is one.
    pub fn as_opt(&self) -> Option<&Opt<Node>> {
        match &*self.0 {
            Value::Opt(cell) => Some(cell),
            _ => None,
        }
    }

    /// Child at `key`, if this is a record holding it.
    pub fn get_key(&self, key: &str) -> Option<&Node> {
        self.as_obj().and_then(|map| map.get(key))
    }

    /// Element at `index`, if this is an array holding it.
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        self.as_arr().and_then(|items| items.get(index))
    }
}

impl Deref for Node {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.0
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Node {
        Node::new(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Node {
        Node::new(Value::Bool(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Node {
        Node::new(Value::Num(value))
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Node {
        Node::new(Value::Num(value as f64))
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Node {
        Node::new(Value::Num(value as f64))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Node {
        Node::new(Value::Num(value as f64))
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Node {
        Node::new(Value::Num(value as f64))
    }
}

impl From<u64> for Node {
    fn from(value: u64) -> Node {
        Node::new(Value::Num(value as f64))
    }
}

impl From<usize> for Node {
    fn from(value: usize) -> Node {
        Node::new(Value::Num(value as f64))
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Node {
        Node::new(Value::Str(value.to_string()))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Node {
        Node::new(Value::Str(value))
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Node {
        Node::new(Value::Arr(items))
    }
}

impl From<IndexMap<String, Node>> for Node {
    fn from(map: IndexMap<String, Node>) -> Node {
        Node::new(Value::Obj(map))
    }
}

impl From<Opt<Node>> for Node {
    fn from(cell: Opt<Node>) -> Node {
        Node::new(Value::Opt(cell))
    }
}

impl From<&Node> for Node {
    fn from(node: &Node) -> Node {
        node.clone()
    }
}
