//! The fluent, lazy path builder.
//!
//! A [`DeepUpdate`] records a sequence of steps plus per-step guards and
//! defaults. Nothing happens until a terminal operation ([`set`](DeepUpdate::set),
//! [`modify`](DeepUpdate::modify), [`delete`](DeepUpdate::delete)) commits the
//! path to the reconciler. Builder methods take `self` by value and return a
//! new builder state; the builder is as immutable as the data it describes.

use crate::optional::OptCellAdapter;
use crate::reconcile::{reconcile, Terminal};
use crate::types::{Guard, Step, StepNode, UpdateError};
use crate::value::Node;

/// Begin a deep update rooted at `root`.
///
/// # Example
///
/// ```
/// use cow_update::{deep_update, node};
///
/// let doc = node!({"user": {"name": "ada", "tags": ["x"]}});
/// let next = deep_update(&doc).at("user").at("name").set("grace").unwrap();
///
/// assert_eq!(next, node!({"user": {"name": "grace", "tags": ["x"]}}));
/// // The untouched sibling is shared with the original tree.
/// let tags = |n: &cow_update::Node| n.get_key("user").unwrap().get_key("tags").unwrap().clone();
/// assert!(tags(&next).same(&tags(&doc)));
/// ```
pub fn deep_update(root: &Node) -> DeepUpdate {
    DeepUpdate {
        root: root.clone(),
        root_guard: None,
        root_default: None,
        steps: Vec::new(),
    }
}

/// A lazily built navigation path into a document tree.
pub struct DeepUpdate {
    pub(crate) root: Node,
    pub(crate) root_guard: Option<Guard>,
    pub(crate) root_default: Option<Node>,
    pub(crate) steps: Vec<StepNode>,
}

impl DeepUpdate {
    /// Append a navigation step: a `&str`/`String` key or a `usize` index.
    pub fn at(mut self, step: impl Into<Step>) -> Self {
        self.steps.push(StepNode::new(step.into()));
        self
    }

    /// Append a dictionary-key step: navigates like [`at`](Self::at) with a
    /// key, but documents that the entry may legitimately be absent.
    pub fn at_key(mut self, key: impl Into<String>) -> Self {
        self.steps.push(StepNode::new(Step::DictKey(key.into())));
        self
    }

    /// Attach a default to the most recent step (or to the root if no step
    /// exists yet): if the value there is absent or an empty optional, a
    /// structural copy of `default` is substituted at apply time. The
    /// supplied default itself is never mutated and never aliased into the
    /// result.
    ///
    /// Supersedes any guard already attached to the same step.
    pub fn with_default(mut self, default: impl Into<Node>) -> Self {
        let default = Some(default.into());
        match self.steps.last_mut() {
            Some(last) => {
                last.default = default;
                last.guard = None;
            }
            None => {
                self.root_default = default;
                self.root_guard = None;
            }
        }
        self
    }

    /// Abort the whole update if the value at the most recent step (or the
    /// root) is absent: the terminal operation then returns the original
    /// root handle untouched.
    ///
    /// Supersedes any default already attached to the same step.
    pub fn abort_if_undef(self) -> Self {
        self.guard(Guard::AbortIfAbsent)
    }

    /// Abort the whole update unless `pred` holds for the unwrapped value at
    /// the most recent step (or the root). An absent value is passed to the
    /// predicate as `None`.
    ///
    /// Supersedes any default already attached to the same step.
    pub fn abort_if_not(self, pred: impl Fn(Option<&Node>) -> bool + 'static) -> Self {
        self.guard(Guard::AbortIfNot(Box::new(pred)))
    }

    fn guard(mut self, guard: Guard) -> Self {
        let guard = Some(guard);
        match self.steps.last_mut() {
            Some(last) => {
                last.guard = guard;
                last.default = None;
            }
            None => {
                self.root_guard = guard;
                self.root_default = None;
            }
        }
        self
    }

    /// Commit the path, replacing the value at its end with `value`.
    ///
    /// Returns the new root, or the original root handle on a no-op or an
    /// aborted guard.
    pub fn set(self, value: impl Into<Node>) -> Result<Node, UpdateError> {
        reconcile(&OptCellAdapter, self, Terminal::Set(value.into()))
    }

    /// Commit the path, erasing the key or index at its end.
    ///
    /// Sugar for `set(Node::delete_marker())`. Deleting an already-absent
    /// entry is a no-op.
    pub fn delete(self) -> Result<Node, UpdateError> {
        self.set(Node::delete_marker())
    }

    /// Commit the path, transforming the value at its end with `f`.
    ///
    /// `f` receives the unwrapped current value (`None` if absent and no
    /// default was attached) and returns the new value, which may be the
    /// delete marker.
    pub fn modify(self, f: impl FnOnce(Option<Node>) -> Node + 'static) -> Result<Node, UpdateError> {
        reconcile(&OptCellAdapter, self, Terminal::Modify(Box::new(f)))
    }
}
