//! Tree ⇄ flat behaviour.

use proptest::prelude::*;
use rstest::rstest;
use serde_json::{Value, json};

use super::tree_strategy;
use crate::convert::{
    FlatMap, flat_to_tree, get_path, set_path, tree_to_flat, tree_to_flat_at, yaml_text_to_flat_at,
};
use crate::{KeyPath, PropsError};

fn flat(value: Value) -> FlatMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object literal, got {other}"),
    }
}

#[rstest]
fn nested_sequences_flatten_to_chained_indices() {
    let out = tree_to_flat(&json!({"e": [[10, 20], [30, 40]]}));
    assert_eq!(
        out,
        flat(json!({"e[0][0]": 10, "e[0][1]": 20, "e[1][0]": 30, "e[1][1]": 40}))
    );
}

#[rstest]
fn mappings_inside_sequences_use_dotted_suffixes() {
    let out = tree_to_flat(&json!({
        "server": {"ports": [{"name": "http", "port": 80}], "host": "localhost"}
    }));
    let keys: Vec<&str> = out.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["server.ports[0].name", "server.ports[0].port", "server.host"]
    );
}

#[rstest]
fn empty_containers_vanish() {
    let out = tree_to_flat(&json!({"a": {}, "b": [], "c": 1}));
    assert_eq!(out, flat(json!({"c": 1})));
}

#[rstest]
fn scalar_root_uses_the_empty_key() {
    assert_eq!(tree_to_flat(&json!(5)), flat(json!({"": 5})));
}

#[rstest]
#[case::mapping(json!({"a": 1, "b": [true]}), json!({"t.a": 1, "t.b[0]": true}))]
#[case::sequence(json!([{"name": "x"}, 2]), json!({"t[0].name": "x", "t[1]": 2}))]
#[case::scalar(json!("v"), json!({"t": "v"}))]
#[case::empty(json!({}), json!({}))]
fn prefixed_flattening_mounts_every_key(#[case] tree: Value, #[case] expected: Value) {
    let out = tree_to_flat_at("t", &tree).expect("prefix parses");
    assert_eq!(out, flat(expected));
}

#[rstest]
fn nested_prefix_and_empty_prefix() {
    let tree = json!({"port": 80});
    let nested = tree_to_flat_at("servers[2].http", &tree).expect("prefix parses");
    assert_eq!(nested, flat(json!({"servers[2].http.port": 80})));
    assert_eq!(tree_to_flat_at("", &tree).expect("empty prefix"), tree_to_flat(&tree));
}

#[rstest]
fn malformed_prefix_is_rejected() {
    let err = tree_to_flat_at("t[", &json!({"a": 1})).expect_err("malformed prefix");
    assert!(matches!(err.as_ref(), PropsError::MalformedKey { .. }));
}

#[rstest]
fn yaml_text_flattens_under_a_prefix() {
    let text = "server:\n  port: 8080\n  hosts:\n    - a\n    - b\n";
    let out = yaml_text_to_flat_at("t", text).expect("yaml");
    assert_eq!(
        out,
        flat(json!({"t.server.port": 8080, "t.server.hosts[0]": "a", "t.server.hosts[1]": "b"}))
    );
}

#[rstest]
fn sparse_indices_are_padded_with_null() {
    let tree = flat_to_tree(&flat(json!({"list[2]": "c", "list[0]": "a"}))).expect("valid keys");
    assert_eq!(tree, json!({"list": ["a", null, "c"]}));
}

#[rstest]
fn later_keys_replace_conflicting_nodes() {
    let tree = flat_to_tree(&flat(json!({"a": 1, "a.b": 2}))).expect("valid keys");
    assert_eq!(tree, json!({"a": {"b": 2}}));
    let back = flat_to_tree(&flat(json!({"a.b": 2, "a": 1}))).expect("valid keys");
    assert_eq!(back, json!({"a": 1}));
}

#[rstest]
fn malformed_keys_fail_the_rebuild() {
    let err = flat_to_tree(&flat(json!({"a[x]": 1}))).expect_err("bad index");
    assert!(matches!(&*err, PropsError::MalformedKey { .. }));
}

#[rstest]
fn set_and_get_address_the_same_node() {
    let mut tree = json!({});
    let path = KeyPath::parse("a.b[1].c").expect("valid key");
    set_path(&mut tree, &path, json!("x"));
    assert_eq!(tree, json!({"a": {"b": [null, {"c": "x"}]}}));
    assert_eq!(get_path(&tree, &path), Some(&json!("x")));
    let missing = KeyPath::parse("a.b[5]").expect("valid key");
    assert_eq!(get_path(&tree, &missing), None);
    assert_eq!(get_path(&tree, &KeyPath::root()), Some(&tree));
}

proptest! {
    #[test]
    fn unflatten_inverts_flatten(tree in tree_strategy()) {
        let rebuilt = flat_to_tree(&tree_to_flat(&tree)).expect("generated keys are valid");
        prop_assert_eq!(rebuilt, tree);
    }
}
