//! Copy-on-write structural updates for immutable document trees.
//!
//! Two capabilities over trees of records, arrays, and optional containers:
//!
//! - [`update`] - shallow-merge a flat patch record into a record, with
//!   delete-marker semantics and no-op detection.
//! - [`deep_update`] - a fluent, lazy path builder that navigates an
//!   arbitrary-depth path (keys, indices, dictionary keys, transparent
//!   optional unwrapping) and replaces or transforms the value found there,
//!   reconstructing only the containers on the path and sharing every
//!   untouched branch with the original tree.
//!
//! Inputs are never mutated. Every invocation returns either the original
//! root handle (no-op, or an aborted guard) or a new root whose off-path
//! branches are the original's own handles, so callers relying on handle
//! identity for caching stay valid.
//!
//! # Example
//!
//! ```
//! use cow_update::{deep_update, node};
//!
//! let doc = node!({"user": {"name": "ada", "score": 1}, "log": ["boot"]});
//!
//! // Writing the value already present is a no-op: the same handle returns.
//! let same = deep_update(&doc).at("user").at("score").set(1).unwrap();
//! assert!(same.same(&doc));
//!
//! // A real write rebuilds only the path; `log` is shared by handle.
//! let next = deep_update(&doc).at("user").at("score").set(2).unwrap();
//! assert_eq!(next, node!({"user": {"name": "ada", "score": 2}, "log": ["boot"]}));
//! assert!(next.get_key("log").unwrap().same(doc.get_key("log").unwrap()));
//!
//! // Guards turn absence into a clean abort instead of an error.
//! let aborted = deep_update(&doc).at("log").at(5).abort_if_undef().set("x").unwrap();
//! assert!(aborted.same(&doc));
//! ```

use indexmap::IndexMap;

pub mod builder;
mod json;
mod macros;
pub mod optional;
mod reconcile;
pub mod types;
pub mod update;
pub mod value;

pub use builder::{deep_update, DeepUpdate};
pub use optional::{OptCellAdapter, OptionalAdapter};
pub use types::{Guard, Step, UpdateError};
pub use update::update;
pub use value::{Node, Value};

// The container type the engine threads through navigation.
pub use opt_cell::Opt;

/// The record map type: insertion-ordered, as key order is observable.
pub type NodeMap = IndexMap<String, Node>;
