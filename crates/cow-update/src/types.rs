//! Core types for the update engine: path steps, guards, and errors.

use std::fmt;

use thiserror::Error;

use crate::value::Node;

/// One segment of a navigation path.
///
/// A closed set: the reconciler dispatches on the tag, never on runtime
/// inspection of the container. `DictKey` navigates the same way `Key` does
/// but documents that the container may legitimately lack the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A named field of a record.
    Key(String),
    /// A position in an array.
    Index(usize),
    /// A string key of a dictionary-like record that may lack the entry.
    DictKey(String),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(key) | Step::DictKey(key) => write!(f, "{key}"),
            Step::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Step {
    fn from(key: &str) -> Step {
        Step::Key(key.to_string())
    }
}

impl From<String> for Step {
    fn from(key: String) -> Step {
        Step::Key(key)
    }
}

impl From<usize> for Step {
    fn from(index: usize) -> Step {
        Step::Index(index)
    }
}

/// A condition attached to a step that can abort the whole update.
///
/// When a guard fails, the terminal operation returns the original root
/// handle untouched; no reconstruction happens.
pub enum Guard {
    /// Abort if the value at this step is absent (missing key/index or an
    /// empty optional).
    AbortIfAbsent,
    /// Abort if the predicate over the unwrapped current value is false.
    /// An absent value is passed through as `None`; there is no auto-abort
    /// short-circuit.
    AbortIfNot(Box<dyn Fn(Option<&Node>) -> bool>),
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::AbortIfAbsent => f.write_str("AbortIfAbsent"),
            Guard::AbortIfNot(_) => f.write_str("AbortIfNot(..)"),
        }
    }
}

/// A step plus its optional guard or default.
///
/// A guard and a default are mutually exclusive on the same step: attaching
/// one clears the other.
#[derive(Debug)]
pub struct StepNode {
    pub step: Step,
    pub guard: Option<Guard>,
    pub default: Option<Node>,
}

impl StepNode {
    pub fn new(step: Step) -> StepNode {
        StepNode {
            step,
            guard: None,
            default: None,
        }
    }
}

/// Errors raised by the shallow updater and the deep-update reconciler.
///
/// Expected absence is never an error (guards turn it into an abort outcome
/// instead); every variant here marks a misuse of the API against the actual
/// shape of the document.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UpdateError {
    /// The shallow updater was given a non-record value.
    #[error("NOT_A_RECORD")]
    NotARecord,
    /// A key step was applied to a value that is not a record.
    #[error("INVALID_TARGET: key `{0}` into non-record value")]
    KeyIntoNonRecord(String),
    /// An index step was applied to a value that is not an array.
    #[error("INVALID_TARGET: index {0} into non-array value")]
    IndexIntoNonArray(usize),
    /// A write landed more than one position past the end of an array.
    #[error("INDEX_OUT_OF_BOUNDS: index {index} into array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// A write targeted a child of an absent value that had no default.
    #[error("NOT_FOUND: no value to write into at `{0}`")]
    AbsentTarget(String),
    /// The root value itself cannot be deleted.
    #[error("INVALID_TARGET: cannot delete the root value")]
    DeleteRoot,
}
