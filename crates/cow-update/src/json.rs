//! Boundary conversion between [`Node`] trees and `serde_json::Value`.
//!
//! The engine needs shared handles for identity and structural sharing, so
//! `serde_json::Value` cannot be its internal representation; these
//! conversions are the interop seam. Optional containers and delete markers
//! are engine-level notions: a non-empty optional serializes transparently
//! as its content, while empty optionals and delete markers serialize as
//! `null`. `from_json` never produces either.

use serde_json::Value as Json;

use crate::value::{Node, Value};

impl Node {
    /// Build a tree from a `serde_json::Value`. Object key order is
    /// preserved.
    ///
    /// # Example
    ///
    /// ```
    /// use cow_update::{node, Node};
    /// use serde_json::json;
    ///
    /// let doc = Node::from_json(&json!({"a": [1, null, "x"]}));
    /// assert_eq!(doc, node!({"a": [1, null, "x"]}));
    /// ```
    pub fn from_json(json: &Json) -> Node {
        match json {
            Json::Null => Node::null(),
            Json::Bool(b) => Node::from(*b),
            Json::Number(n) => Node::new(Value::Num(n.as_f64().unwrap_or(0.0))),
            Json::String(s) => Node::from(s.as_str()),
            Json::Array(items) => Node::from(items.iter().map(Node::from_json).collect::<Vec<_>>()),
            Json::Object(map) => Node::new(Value::Obj(
                map.iter().map(|(k, v)| (k.clone(), Node::from_json(v))).collect(),
            )),
        }
    }

    /// Render the tree as a `serde_json::Value`.
    ///
    /// Whole numbers in the i64 range render as JSON integers.
    pub fn to_json(&self) -> Json {
        match &**self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Num(n) => number_to_json(*n),
            Value::Str(s) => Json::String(s.clone()),
            Value::Arr(items) => Json::Array(items.iter().map(Node::to_json).collect()),
            Value::Obj(map) => Json::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Opt(cell) => match cell.get() {
                Some(inner) => inner.to_json(),
                None => Json::Null,
            },
            Value::Delete => Json::Null,
        }
    }
}

fn number_to_json(n: f64) -> Json {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Json::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(Json::Null, Json::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node;
    use opt_cell::Opt;
    use serde_json::json;

    #[test]
    fn test_roundtrip_document() {
        let json = json!({"a": {"b": [1, 2.5, "x", true, null]}, "c": -3});
        let doc = Node::from_json(&json);
        assert_eq!(doc.to_json(), json);
    }

    #[test]
    fn test_from_json_preserves_key_order() {
        let doc = Node::from_json(&json!({"z": 1, "a": 2}));
        let keys: Vec<&str> = doc.as_obj().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn test_optionals_flatten() {
        let doc = node!({
            "present": Node::from(Opt::new(node!({"x": 1}))),
            "missing": Node::from(Opt::<Node>::empty()),
        });
        assert_eq!(doc.to_json(), json!({"present": {"x": 1}, "missing": null}));
    }

    #[test]
    fn test_delete_marker_renders_null() {
        assert_eq!(Node::delete_marker().to_json(), json!(null));
    }

    #[test]
    fn test_integers_render_without_fraction() {
        assert_eq!(node!(3).to_json(), json!(3));
        assert_eq!(node!(2.5).to_json(), json!(2.5));
    }
}
