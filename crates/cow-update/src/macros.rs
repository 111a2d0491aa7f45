//! The [`node!`] literal macro.
//!
//! JSON-like literal syntax for building [`Node`](crate::Node) trees, in the
//! mold of `serde_json::json!`. Any expression implementing `Into<Node>` can
//! be interpolated.

/// Build a [`Node`](crate::Node) from a JSON-like literal.
///
/// # Example
///
/// ```
/// use cow_update::node;
///
/// let tag = "beta";
/// let doc = node!({
///     "name": "demo",
///     "tags": [tag, "stable"],
///     "meta": { "count": 3, "active": true, "extra": null },
/// });
/// assert_eq!(doc.get_key("name"), Some(&node!("demo")));
/// ```
#[macro_export]
macro_rules! node {
    ($($tree:tt)+) => {
        $crate::node_internal!($($tree)+)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! node_internal {
    //////////////////////////////////////////////////////////////////////////
    // TT muncher for array elements. Produces a vec![] of Nodes.
    //////////////////////////////////////////////////////////////////////////

    // Done with trailing comma.
    (@array [$($elems:expr,)*]) => {
        vec![$($elems,)*]
    };

    // Done without trailing comma.
    (@array [$($elems:expr),*]) => {
        vec![$($elems),*]
    };

    // Next element is `null`.
    (@array [$($elems:expr,)*] null $($rest:tt)*) => {
        $crate::node_internal!(@array [$($elems,)* $crate::node_internal!(null)] $($rest)*)
    };

    // Next element is `true`.
    (@array [$($elems:expr,)*] true $($rest:tt)*) => {
        $crate::node_internal!(@array [$($elems,)* $crate::node_internal!(true)] $($rest)*)
    };

    // Next element is `false`.
    (@array [$($elems:expr,)*] false $($rest:tt)*) => {
        $crate::node_internal!(@array [$($elems,)* $crate::node_internal!(false)] $($rest)*)
    };

    // Next element is an array.
    (@array [$($elems:expr,)*] [$($array:tt)*] $($rest:tt)*) => {
        $crate::node_internal!(@array [$($elems,)* $crate::node_internal!([$($array)*])] $($rest)*)
    };

    // Next element is a map.
    (@array [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        $crate::node_internal!(@array [$($elems,)* $crate::node_internal!({$($map)*})] $($rest)*)
    };

    // Next element is an expression followed by comma.
    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::node_internal!(@array [$($elems,)* $crate::node_internal!($next),] $($rest)*)
    };

    // Last element is an expression with no trailing comma.
    (@array [$($elems:expr,)*] $last:expr) => {
        $crate::node_internal!(@array [$($elems,)* $crate::node_internal!($last)])
    };

    // Comma after the most recent element.
    (@array [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::node_internal!(@array [$($elems,)*] $($rest)*)
    };

    // Unexpected token after most recent element.
    (@array [$($elems:expr),*] $unexpected:tt $($rest:tt)*) => {
        $crate::node_unexpected!($unexpected)
    };

    //////////////////////////////////////////////////////////////////////////
    // TT muncher for object entries. Inserts into the given map binding.
    //////////////////////////////////////////////////////////////////////////

    // Done.
    (@object $object:ident () () ()) => {};

    // Insert the current entry followed by trailing comma.
    (@object $object:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        let _ = $object.insert(($($key)+).into(), $value);
        $crate::node_internal!(@object $object () ($($rest)*) ($($rest)*));
    };

    // Current entry followed by unexpected token.
    (@object $object:ident [$($key:tt)+] ($value:expr) $unexpected:tt $($rest:tt)*) => {
        $crate::node_unexpected!($unexpected);
    };

    // Insert the last entry without trailing comma.
    (@object $object:ident [$($key:tt)+] ($value:expr)) => {
        let _ = $object.insert(($($key)+).into(), $value);
    };

    // Next value is `null`.
    (@object $object:ident ($($key:tt)+) (: null $($rest:tt)*) $copy:tt) => {
        $crate::node_internal!(@object $object [$($key)+] ($crate::node_internal!(null)) $($rest)*);
    };

    // Next value is `true`.
    (@object $object:ident ($($key:tt)+) (: true $($rest:tt)*) $copy:tt) => {
        $crate::node_internal!(@object $object [$($key)+] ($crate::node_internal!(true)) $($rest)*);
    };

    // Next value is `false`.
    (@object $object:ident ($($key:tt)+) (: false $($rest:tt)*) $copy:tt) => {
        $crate::node_internal!(@object $object [$($key)+] ($crate::node_internal!(false)) $($rest)*);
    };

    // Next value is an array.
    (@object $object:ident ($($key:tt)+) (: [$($array:tt)*] $($rest:tt)*) $copy:tt) => {
        $crate::node_internal!(@object $object [$($key)+] ($crate::node_internal!([$($array)*])) $($rest)*);
    };

    // Next value is a map.
    (@object $object:ident ($($key:tt)+) (: {$($map:tt)*} $($rest:tt)*) $copy:tt) => {
        $crate::node_internal!(@object $object [$($key)+] ($crate::node_internal!({$($map)*})) $($rest)*);
    };

    // Next value is an expression followed by comma.
    (@object $object:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        $crate::node_internal!(@object $object [$($key)+] ($crate::node_internal!($value)) , $($rest)*);
    };

    // Last value is an expression with no trailing comma.
    (@object $object:ident ($($key:tt)+) (: $value:expr) $copy:tt) => {
        $crate::node_internal!(@object $object [$($key)+] ($crate::node_internal!($value)));
    };

    // Missing value for last entry. Trigger a reasonable error message.
    (@object $object:ident ($($key:tt)+) (:) $copy:tt) => {
        // "unexpected end of macro invocation"
        $crate::node_internal!();
    };

    // Missing colon and value for last entry.
    (@object $object:ident ($($key:tt)+) () $copy:tt) => {
        // "unexpected end of macro invocation"
        $crate::node_internal!();
    };

    // Misplaced colon. Trigger a reasonable error message.
    (@object $object:ident () (: $($rest:tt)*) ($colon:tt $($copy:tt)*)) => {
        // Takes no arguments so "no rules expected the token `:`".
        $crate::node_unexpected!($colon);
    };

    // Found a comma inside a key. Trigger a reasonable error message.
    (@object $object:ident ($($key:tt)*) (, $($rest:tt)*) ($comma:tt $($copy:tt)*)) => {
        // Takes no arguments so "no rules expected the token `,`".
        $crate::node_unexpected!($comma);
    };

    // Key is fully parenthesized. This avoids clippy double_parens false
    // positives because the parenthesization may be necessary here.
    (@object $object:ident () (($key:expr) : $($rest:tt)*) $copy:tt) => {
        $crate::node_internal!(@object $object ($key) (: $($rest)*) (: $($rest)*));
    };

    // Refuse to absorb colon token into key expression.
    (@object $object:ident ($($key:tt)*) (: $($unexpected:tt)+) $copy:tt) => {
        $crate::node_expect_expr_comma!($($unexpected)+);
    };

    // Munch a token into the current key.
    (@object $object:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        $crate::node_internal!(@object $object ($($key)* $tt) ($($rest)*) ($($rest)*));
    };

    //////////////////////////////////////////////////////////////////////////
    // Main implementation.
    //////////////////////////////////////////////////////////////////////////

    (null) => {
        $crate::Node::null()
    };

    (true) => {
        $crate::Node::from(true)
    };

    (false) => {
        $crate::Node::from(false)
    };

    ([]) => {
        $crate::Node::from(::std::vec::Vec::<$crate::Node>::new())
    };

    ([ $($tt:tt)+ ]) => {
        $crate::Node::from($crate::node_internal!(@array [] $($tt)+))
    };

    ({}) => {
        $crate::Node::from($crate::NodeMap::new())
    };

    ({ $($tt:tt)+ }) => {
        $crate::Node::from({
            let mut object = $crate::NodeMap::new();
            $crate::node_internal!(@object object () ($($tt)+) ($($tt)+));
            object
        })
    };

    // Any Into<Node> type.
    ($other:expr) => {
        $crate::Node::from($other)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! node_unexpected {
    () => {};
}

#[macro_export]
#[doc(hidden)]
macro_rules! node_expect_expr_comma {
    ($e:expr , $($tt:tt)*) => {};
}

#[cfg(test)]
mod tests {
    use crate::{Node, Value};

    #[test]
    fn test_scalars() {
        assert_eq!(node!(null), Node::null());
        assert_eq!(node!(true), Node::from(true));
        assert_eq!(node!(1), Node::from(1));
        assert_eq!(node!(-2), Node::from(-2));
        assert_eq!(node!(1.5), Node::from(1.5));
        assert_eq!(node!("s"), Node::from("s"));
    }

    #[test]
    fn test_arrays() {
        let empty = node!([]);
        assert_eq!(empty.as_arr().map(Vec::len), Some(0));
        let arr = node!([1, "two", null, [3], {"four": 4}, true]);
        let items = arr.as_arr().unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!(items[1], node!("two"));
        assert_eq!(items[4].get_key("four"), Some(&node!(4)));
    }

    #[test]
    fn test_objects() {
        let doc = node!({
            "a": 1,
            "b": {"c": [true, null]},
        });
        let map = doc.as_obj().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(doc.get_key("b").unwrap().get_key("c"), Some(&node!([true, null])));
    }

    #[test]
    fn test_key_order_preserved() {
        let doc = node!({"z": 1, "a": 2, "m": 3});
        let keys: Vec<&str> = doc.as_obj().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_interpolation() {
        let inner = node!({"x": 1});
        let count = 2 + 3;
        let doc = node!({"inner": inner.clone(), "count": count});
        assert!(doc.get_key("inner").unwrap().same(&inner));
        assert_eq!(doc.get_key("count"), Some(&node!(5)));
    }

    #[test]
    fn test_null_is_value_null() {
        assert!(matches!(*node!(null), Value::Null));
    }
}
