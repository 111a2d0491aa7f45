//! The reconciler: executes a committed path in one pass.
//!
//! Four phases over the root value and its path:
//!
//! 1. **Descent** - walk the steps, unwrapping optionals, evaluating guards,
//!    and substituting defaults; a failed guard aborts the whole operation.
//! 2. **Leaf computation** - apply the terminal `Set`/`Modify` to the value
//!    reached at the end of the path.
//! 3. **No-op detection** - if nothing was default-substituted and the
//!    computed leaf has the same identity as the existing one, the original
//!    root handle is returned with no allocation.
//! 4. **Reconstruction** - rebuild only the containers on the path, leaf to
//!    root, sharing every sibling handle with the original tree.

use crate::builder::DeepUpdate;
use crate::optional::OptionalAdapter;
use crate::types::{Guard, Step, StepNode, UpdateError};
use crate::value::{Node, Value};

/// The committed terminal operation.
pub(crate) enum Terminal {
    Set(Node),
    Modify(Box<dyn FnOnce(Option<Node>) -> Node>),
}

/// One navigated level: the unwrapped value there (after any default
/// substitution) and whether the slot originally held the optional container.
struct Slot {
    value: Option<Node>,
    was_opt: bool,
}

enum Entered {
    Aborted,
    Slot(Slot),
}

pub(crate) fn reconcile<A: OptionalAdapter>(
    adapter: &A,
    update: DeepUpdate,
    terminal: Terminal,
) -> Result<Node, UpdateError> {
    let DeepUpdate {
        root,
        root_guard,
        root_default,
        steps,
    } = update;

    // ── Descent ──────────────────────────────────────────────────────────
    let mut origin_absent = false;
    let mut slots: Vec<Slot> = Vec::with_capacity(steps.len() + 1);

    match enter(adapter, Some(root.clone()), &root_guard, &root_default, &mut origin_absent) {
        Entered::Aborted => return Ok(root),
        Entered::Slot(slot) => slots.push(slot),
    }

    for StepNode { step, guard, default } in &steps {
        let raw = advance(slots.last().and_then(|s| s.value.as_ref()), step)?;
        match enter(adapter, raw, guard, default, &mut origin_absent) {
            Entered::Aborted => return Ok(root),
            Entered::Slot(slot) => slots.push(slot),
        }
    }

    // ── Leaf computation ─────────────────────────────────────────────────
    let current = slots.last().and_then(|s| s.value.clone());
    let computed = match terminal {
        Terminal::Set(value) => value,
        Terminal::Modify(f) => f(current.clone()),
    };

    // ── No-op detection ──────────────────────────────────────────────────
    if !origin_absent {
        if computed.is_delete_marker() {
            // Deleting an already-absent entry changes nothing.
            if current.is_none() {
                return Ok(root);
            }
        } else if let Some(existing) = &current {
            if computed.same(existing) {
                return Ok(root);
            }
        }
    }

    // ── Reconstruction, leaf to root ─────────────────────────────────────
    // `None` means "remove the entry at this level's step in its parent".
    let mut child: Option<Node> = if computed.is_delete_marker() {
        None
    } else {
        Some(computed)
    };

    for i in (1..=steps.len()).rev() {
        if let Some(value) = child {
            child = adapter.rewrap(slots[i].was_opt, Some(value));
        }
        let step = &steps[i - 1].step;
        match (&slots[i - 1].value, child) {
            (Some(parent), written) => {
                child = Some(write_child(parent, step, written)?);
            }
            // Removing an entry of an absent parent leaves it absent;
            // keep propagating so tainted ancestors still materialize.
            (None, None) => {
                child = None;
            }
            (None, Some(_)) => {
                return Err(UpdateError::AbsentTarget(step.to_string()));
            }
        }
    }

    if let Some(value) = child {
        child = adapter.rewrap(slots[0].was_opt, Some(value));
    }
    child.ok_or(UpdateError::DeleteRoot)
}

/// Unwrap, guard, and default one navigated slot.
fn enter<A: OptionalAdapter>(
    adapter: &A,
    raw: Option<Node>,
    guard: &Option<Guard>,
    default: &Option<Node>,
    origin_absent: &mut bool,
) -> Entered {
    let was_opt = raw.as_ref().is_some_and(|v| adapter.is_optional(v));
    let mut value = match raw {
        None => None,
        Some(v) if adapter.is_empty_optional(&v) => None,
        Some(v) => Some(adapter.unwrap(v)),
    };

    match guard {
        Some(Guard::AbortIfAbsent) if value.is_none() => return Entered::Aborted,
        Some(Guard::AbortIfNot(pred)) if !pred(value.as_ref()) => return Entered::Aborted,
        _ => {}
    }

    if value.is_none() {
        if let Some(default) = default {
            // A fresh structural copy: the caller's default instance must
            // never share identity with the produced tree.
            value = Some(default.deep_clone());
            *origin_absent = true;
        }
    }

    Entered::Slot(Slot { value, was_opt })
}

/// Navigate one step deeper. Absence propagates; an accessor applied to a
/// container of the wrong kind is a programmer error.
fn advance(current: Option<&Node>, step: &Step) -> Result<Option<Node>, UpdateError> {
    let Some(node) = current else {
        return Ok(None);
    };
    match (&**node, step) {
        (Value::Obj(map), Step::Key(key) | Step::DictKey(key)) => Ok(map.get(key).cloned()),
        (Value::Arr(items), Step::Index(index)) => Ok(items.get(*index).cloned()),
        (_, Step::Key(key) | Step::DictKey(key)) => Err(UpdateError::KeyIntoNonRecord(key.clone())),
        (_, Step::Index(index)) => Err(UpdateError::IndexIntoNonArray(*index)),
    }
}

/// Rebuild one container with `child` written (or removed) at `step`,
/// sharing every other entry with `parent`.
fn write_child(parent: &Node, step: &Step, child: Option<Node>) -> Result<Node, UpdateError> {
    match (&**parent, step) {
        (Value::Obj(map), Step::Key(key) | Step::DictKey(key)) => {
            let mut next = map.clone();
            match child {
                Some(value) => {
                    next.insert(key.clone(), value);
                }
                None => {
                    next.shift_remove(key);
                }
            }
            Ok(Node::from(next))
        }
        (Value::Arr(items), Step::Index(index)) => {
            let mut next = items.clone();
            match child {
                Some(value) => {
                    if *index < next.len() {
                        next[*index] = value;
                    } else if *index == next.len() {
                        // Writing at the current length appends.
                        next.push(value);
                    } else {
                        return Err(UpdateError::IndexOutOfBounds {
                            index: *index,
                            len: items.len(),
                        });
                    }
                }
                None => {
                    if *index < next.len() {
                        next.remove(*index);
                    }
                }
            }
            Ok(Node::from(next))
        }
        (_, Step::Key(key) | Step::DictKey(key)) => Err(UpdateError::KeyIntoNonRecord(key.clone())),
        (_, Step::Index(index)) => Err(UpdateError::IndexIntoNonArray(*index)),
    }
}
