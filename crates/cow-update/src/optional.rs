//! The optional adapter: how the engine sees the external one-slot container.
//!
//! The reconciler never touches `opt_cell::Opt` directly. It consults an
//! [`OptionalAdapter`] strategy at every step before applying key/index
//! semantics or guards, and again when writing a value back into a slot that
//! held a container. [`OptCellAdapter`] is the one implementation, for
//! [`Opt<Node>`](opt_cell::Opt) values embedded in the tree.

use opt_cell::Opt;

use crate::value::{Node, Value};

/// Uniform operations over values that may be wrapped in the external
/// optional container.
pub trait OptionalAdapter {
    /// True if `value` is the container at all, empty or not.
    fn is_optional(&self, value: &Node) -> bool;

    /// True only if `value` is the container in its canonical empty state.
    fn is_empty_optional(&self, value: &Node) -> bool;

    /// If `value` is a non-empty container, its contained value; otherwise
    /// `value` unchanged (non-container values are already unwrapped).
    fn unwrap(&self, value: Node) -> Node;

    /// Write a value back into a slot. If the original slot held the
    /// container (empty or not), the new value is wrapped as non-empty, or
    /// maps to the canonical empty container when there is no new value. If
    /// the slot held a plain value, the new value passes through unchanged.
    fn rewrap(&self, original_was_container: bool, value: Option<Node>) -> Option<Node>;
}

/// [`OptionalAdapter`] for [`Opt<Node>`](opt_cell::Opt) values in the tree.
pub struct OptCellAdapter;

impl OptionalAdapter for OptCellAdapter {
    fn is_optional(&self, value: &Node) -> bool {
        matches!(**value, Value::Opt(_))
    }

    fn is_empty_optional(&self, value: &Node) -> bool {
        match &**value {
            Value::Opt(cell) => cell.is_empty(),
            _ => false,
        }
    }

    fn unwrap(&self, value: Node) -> Node {
        match &*value {
            Value::Opt(cell) => match cell.get() {
                Some(inner) => inner.clone(),
                None => value.clone(),
            },
            _ => value,
        }
    }

    fn rewrap(&self, original_was_container: bool, value: Option<Node>) -> Option<Node> {
        if !original_was_container {
            return value;
        }
        Some(match value {
            Some(inner) => Node::from(Opt::new(inner)),
            None => Node::from(Opt::<Node>::empty()),
        })
    }
}
