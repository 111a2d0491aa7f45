//! The shallow-merge updater.

use crate::types::UpdateError;
use crate::value::Node;

/// Merge a flat `patch` record into `record`, copy-on-write.
///
/// For every key in `patch`: the delete marker removes the key, any other
/// value replaces the current one unless it has the same identity
/// ([`Node::same`]). Keys absent from the record are inserted. If no key
/// contributed an actual change, the original `record` handle is returned.
///
/// # Errors
///
/// [`UpdateError::NotARecord`] if either argument is not a record.
///
/// # Example
///
/// ```
/// use cow_update::{node, update, Node};
///
/// let doc = node!({"a": 33, "b": 1});
///
/// // Identical values contribute no change: same handle back.
/// let noop = update(&doc, &node!({"a": 33})).unwrap();
/// assert!(noop.same(&doc));
///
/// let patched = update(&doc, &node!({"a": 34, "b": Node::delete_marker()})).unwrap();
/// assert_eq!(patched, node!({"a": 34}));
/// ```
pub fn update(record: &Node, patch: &Node) -> Result<Node, UpdateError> {
    let map = record.as_obj().ok_or(UpdateError::NotARecord)?;
    let patch_map = patch.as_obj().ok_or(UpdateError::NotARecord)?;

    let mut next = map.clone();
    let mut changed = false;
    for (key, value) in patch_map {
        if value.is_delete_marker() {
            if next.shift_remove(key).is_some() {
                changed = true;
            }
        } else {
            match map.get(key) {
                Some(current) if current.same(value) => {}
                _ => {
                    next.insert(key.clone(), value.clone());
                    changed = true;
                }
            }
        }
    }

    if changed {
        Ok(Node::from(next))
    } else {
        Ok(record.clone())
    }
}
