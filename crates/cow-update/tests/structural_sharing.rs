//! Invariant-focused coverage: immutability of inputs, structural sharing of
//! unaffected branches, abort purity, and default non-aliasing.

use cow_update::{deep_update, node, update};

#[test]
fn test_original_tree_is_never_mutated() {
    let doc = node!({"a": {"b": [1, {"c": 2}]}, "d": "keep"});
    let snapshot = doc.deep_clone();

    let _ = deep_update(&doc).at("a").at("b").at(1).at("c").set(3).unwrap();
    let _ = deep_update(&doc).at("a").at("b").at(0).delete().unwrap();
    let _ = deep_update(&doc).at("d").delete().unwrap();
    let _ = update(&doc, &node!({"d": "changed"})).unwrap();

    assert_eq!(doc, snapshot);
}

#[test]
fn test_every_sibling_is_shared_along_the_path() {
    let doc = node!({
        "left": {"deep": [1, 2, 3]},
        "mid": {"x": {"y": 1}, "z": [true]},
        "right": "leaf",
    });
    let out = deep_update(&doc).at("mid").at("x").at("y").set(2).unwrap();

    // Off-path branches at the root level.
    assert!(out.get_key("left").unwrap().same(doc.get_key("left").unwrap()));
    assert!(out.get_key("right").unwrap().same(doc.get_key("right").unwrap()));
    // Off-path branch inside the rebuilt container.
    assert!(out
        .get_key("mid")
        .unwrap()
        .get_key("z")
        .unwrap()
        .same(doc.get_key("mid").unwrap().get_key("z").unwrap()));
    // On-path containers are new.
    assert!(!out.get_key("mid").unwrap().same(doc.get_key("mid").unwrap()));
}

#[test]
fn test_abort_returns_the_exact_root_handle() {
    let doc = node!({"a": {}});
    let out = deep_update(&doc)
        .at("a")
        .at("missing")
        .with_default(node!({"x": {"y": 1}}))
        .at("x")
        .at("nope")
        .abort_if_undef()
        .at("deeper")
        .set(1)
        .unwrap();
    // Defaults were substituted during descent, yet the abort still yields
    // the untouched original.
    assert!(out.same(&doc));
    assert_eq!(doc, node!({"a": {}}));
}

#[test]
fn test_consumed_default_is_never_aliased() {
    let default = node!({"c": {}});
    let doc = node!({"a": {}});

    let first = deep_update(&doc)
        .at("a")
        .at("b")
        .with_default(default.clone())
        .at("c")
        .at("d")
        .set(1)
        .unwrap();
    assert_eq!(first, node!({"a": {"b": {"c": {"d": 1}}}}));

    // The caller's default instance saw none of that.
    assert_eq!(default, node!({"c": {}}));
    // And the produced subtree does not share identity with it.
    let b = first.get_key("a").unwrap().get_key("b").unwrap();
    assert!(!b.same(&default));
    assert!(!b.get_key("c").unwrap().same(default.get_key("c").unwrap()));

    // A second update through the same default instance starts fresh.
    let second = deep_update(&doc)
        .at("a")
        .at("b")
        .with_default(default.clone())
        .at("c")
        .at("e")
        .set(2)
        .unwrap();
    assert_eq!(second, node!({"a": {"b": {"c": {"e": 2}}}}));
    assert_eq!(default, node!({"c": {}}));
}

#[test]
fn test_noop_chain_returns_root_at_every_depth() {
    let doc = node!({"a": {"b": {"c": "v"}}});
    assert!(deep_update(&doc).at("a").at("b").at("c").set("v").unwrap().same(&doc));
    assert!(deep_update(&doc).at("a").at("b").at("missing").delete().unwrap().same(&doc));
}

#[test]
fn test_shallow_update_shares_all_values() {
    let doc = node!({"a": [1], "b": {"x": 2}, "c": 3});
    let out = update(&doc, &node!({"c": 4})).unwrap();
    assert!(out.get_key("a").unwrap().same(doc.get_key("a").unwrap()));
    assert!(out.get_key("b").unwrap().same(doc.get_key("b").unwrap()));
}
