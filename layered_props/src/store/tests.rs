//! Tests for the layered property store.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use std::sync::Arc;
use std::thread;

use figment::Figment;
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::PropertyStore;
use crate::PropsError;

#[fixture]
fn store() -> PropertyStore {
    let store = PropertyStore::new();
    store
        .load(&json!({
            "server": { "port": 8080, "host": "localhost", "secure": "true" },
            "ratio": "0.25",
            "servers": [{ "host": "a" }, { "host": "b" }],
            "name": "demo"
        }))
        .expect("fixture tree loads");
    store
}

fn flat(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.clone()))
        .collect()
}

#[rstest]
fn later_layers_win_per_leaf() {
    let store = PropertyStore::new();
    store.load(&json!({ "a": 1, "b": 2 })).expect("load");
    store
        .append(flat(&[("b", json!(3)), ("c", json!(4))]))
        .expect("append");
    assert_eq!(store.tree(), json!({ "a": 1, "b": 3, "c": 4 }));
    assert_eq!(
        store.flat(),
        flat(&[("a", json!(1)), ("b", json!(3)), ("c", json!(4))])
    );
}

#[rstest]
fn append_keeps_untouched_nested_leaves(store: PropertyStore) {
    store
        .append_tree(&json!({ "server": { "port": 9090 } }))
        .expect("append");
    assert_eq!(store.get_u16("server.port"), 9090);
    assert_eq!(store.get_string("server.host"), "localhost");
}

#[rstest]
fn append_replaces_conflicting_node(store: PropertyStore) {
    store
        .append(flat(&[("server", json!("flattened"))]))
        .expect("append");
    assert_eq!(store.get("server"), Some(json!("flattened")));
    assert!(!store.contains_key("server.port"));
}

#[rstest]
fn flat_and_tree_stay_in_sync(store: PropertyStore) {
    store.set("servers[3].host", json!("d"));
    let snapshot = store.snapshot();
    assert_eq!(
        crate::convert::tree_to_flat(snapshot.tree()),
        snapshot.flat().clone()
    );
    assert_eq!(
        crate::convert::flat_to_tree(snapshot.flat()).expect("canonical flat"),
        snapshot.tree().clone()
    );
    assert_eq!(store.get("servers[2]"), Some(Value::Null));
}

#[rstest]
fn load_replaces_everything(store: PropertyStore) {
    store.load(&json!({ "only": true })).expect("load");
    assert_eq!(store.flat(), flat(&[("only", json!(true))]));
}

#[rstest]
#[case::sequence(json!([1, 2]), "sequence")]
#[case::scalar(json!("text"), "string")]
#[case::null(Value::Null, "null")]
fn load_rejects_non_mapping_roots(#[case] tree: Value, #[case] found: &str) {
    let store = PropertyStore::new();
    let err = store.load(&tree).expect_err("non-mapping root");
    assert!(
        matches!(err.as_ref(), PropsError::Conversion { found: got, .. } if got == found),
        "unexpected error: {err:?}"
    );
    assert!(store.is_empty());
}

#[rstest]
fn load_drops_empty_containers() {
    let store = PropertyStore::new();
    store
        .load(&json!({ "keep": 1, "empty": {}, "none": [] }))
        .expect("load");
    assert_eq!(store.tree(), json!({ "keep": 1 }));
}

#[rstest]
fn unaddressable_yaml_keys_are_skipped_on_load() {
    let tree = crate::convert::yaml_text_to_tree("name[x]: 1\nother: 2\n").expect("yaml");
    let store = PropertyStore::new();
    store.load(&tree).expect("the rest of the layer loads");
    assert_eq!(store.get_i32("other"), 2);
    assert!(!store.contains_key("name[x]"));
    assert_eq!(store.tree(), json!({ "other": 2 }));
}

#[rstest]
fn unaddressable_keys_are_skipped_on_append(store: PropertyStore) {
    store
        .append_tree(&json!({ "bad]key": { "x": 1 }, "name": "renamed" }))
        .expect("append");
    assert_eq!(store.get_string("name"), "renamed");
    assert_eq!(store.get_i32("server.port"), 8080);
    assert!(!store.flat().contains_key("bad]key.x"));
}

#[rstest]
fn append_at_mounts_the_tree_under_a_prefix(store: PropertyStore) {
    store
        .append_at("cache.redis", &json!({ "host": "r1", "port": 6379 }))
        .expect("append");
    store
        .append_at("servers[1]", &json!({ "host": "c" }))
        .expect("append into a sequence element");
    assert_eq!(store.get_string("cache.redis.host"), "r1");
    assert_eq!(store.get_i32("cache.redis.port"), 6379);
    assert_eq!(store.get_string("servers[1].host"), "c");
    assert_eq!(store.get_i32("server.port"), 8080);
}

#[rstest]
fn append_at_rejects_malformed_prefix(store: PropertyStore) {
    let before = store.tree();
    let err = store
        .append_at("a[", &json!({ "x": 1 }))
        .expect_err("malformed prefix");
    assert!(matches!(err.as_ref(), PropsError::MalformedKey { .. }));
    assert_eq!(store.tree(), before);
}

#[rstest]
fn set_keeps_the_value_type_class() {
    let store = PropertyStore::new();
    store.set("k", json!(5));
    store.set("k", json!(["list"]));
    assert_eq!(store.get("k"), Some(json!(5)));
    store.set("k", json!("five"));
    assert_eq!(store.get_string("k"), "five");
}

#[rstest]
fn set_replaces_subtrees_of_the_same_class(store: PropertyStore) {
    store.set("server", json!({ "port": 1 }));
    assert_eq!(store.get("server"), Some(json!({ "port": 1 })));
    store.set("servers", json!("flat"));
    assert_eq!(store.get("servers[0].host"), Some(json!("a")));
}

#[rstest]
#[case::malformed("a[")]
#[case::root("")]
fn set_ignores_unusable_keys(store: PropertyStore, #[case] key: &str) {
    let before = store.snapshot();
    store.set(key, json!(1));
    assert_eq!(*store.snapshot(), *before);
}

#[rstest]
fn append_rejects_malformed_keys_atomically(store: PropertyStore) {
    let before = store.snapshot();
    let err = store
        .append(flat(&[("ok", json!(1)), ("bad]", json!(2))]))
        .expect_err("malformed key");
    assert!(matches!(err.as_ref(), PropsError::MalformedKey { .. }));
    assert_eq!(*store.snapshot(), *before);
}

#[rstest]
fn typed_getters_coerce_leaves(store: PropertyStore) {
    assert_eq!(store.get_i32("server.port"), 8080);
    assert_eq!(store.get_string("server.port"), "8080");
    assert!(store.get_bool("server.secure"));
    assert!(store.get_f64("ratio").total_cmp(&0.25).is_eq());
    assert_eq!(store.get_u8("server.port"), 0);
    assert_eq!(store.get_string("servers[1].host"), "b");
}

#[rstest]
fn typed_getters_default_only_when_absent(store: PropertyStore) {
    assert_eq!(store.get_i64_or("missing", 7), 7);
    assert_eq!(store.get_string_or("missing", "fallback"), "fallback");
    assert_eq!(store.get_i64_or("name", 7), 0);
    assert_eq!(store.get_usize("missing"), 0);
    assert!(store.get_bool_or("missing", true));
    assert_eq!(store.get_string("server"), "");
}

#[derive(Debug, Default, PartialEq, Deserialize)]
struct Server {
    port: u16,
    host: String,
    secure: bool,
}

#[rstest]
fn objects_bind_from_any_branch(store: PropertyStore) {
    let server: Server = store.get_object("server").expect("server");
    assert_eq!(
        server,
        Server {
            port: 8080,
            host: "localhost".into(),
            secure: true,
        }
    );
    let hosts: Vec<Server> = store.get_object("servers").expect("servers");
    assert_eq!(hosts.len(), 2);
    let second: Server = store.get_object("servers[1]").expect("indexed");
    assert_eq!(second.host, "b");
}

#[rstest]
fn absent_object_is_zero_valued(store: PropertyStore) {
    let missing: Server = store.get_object("nowhere").expect("absent");
    assert_eq!(missing, Server::default());
}

#[rstest]
fn whole_tree_binds_from_the_empty_key(store: PropertyStore) {
    #[derive(Deserialize)]
    struct Root {
        name: String,
        server: Server,
    }
    let root: Root = store.get_object("").expect("root");
    assert_eq!(root.name, "demo");
    assert_eq!(root.server.port, 8080);
}

#[rstest]
fn strict_objects_report_coercion_failures() {
    let store = PropertyStore::new();
    store
        .load(&json!({ "server": { "port": "eighty" } }))
        .expect("load");
    let err = store
        .get_object_strict::<Server>("server")
        .expect_err("strict");
    assert!(matches!(err.as_ref(), PropsError::Coercion { path, .. } if path == "server.port"));
    assert!(store.get_object::<Server>("server").is_ok());
}

#[rstest]
fn malformed_object_key_is_an_error(store: PropertyStore) {
    let err = store.get_object::<Server>("a[x]").expect_err("malformed");
    assert!(matches!(err.as_ref(), PropsError::MalformedKey { .. }));
}

#[rstest]
fn clear_and_sizes(store: PropertyStore) {
    assert_eq!(store.len(), 7);
    assert!(store.contains_key("servers"));
    assert!(store.contains_key("servers[0].host"));
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.tree(), json!({}));
}

#[rstest]
fn snapshots_are_stable_across_mutation(store: PropertyStore) {
    let before = store.snapshot();
    store.set("name", json!("changed"));
    assert_eq!(before.flat().get("name"), Some(&json!("demo")));
    assert_eq!(store.get_string("name"), "changed");
}

#[rstest]
fn bootstrap_runs_once_after_success() {
    let store = PropertyStore::new();
    let failed = store.bootstrap_once(|_| {
        Err(Arc::new(PropsError::Mapping("first attempt fails".into())))
    });
    assert!(failed.is_err());
    let ran = store
        .bootstrap_once(|target| target.load(&json!({ "n": 1 })))
        .expect("bootstrap");
    assert!(ran);
    let again = store
        .bootstrap_once(|target| target.load(&json!({ "n": 2 })))
        .expect("bootstrap");
    assert!(!again);
    assert_eq!(store.get_i32("n"), 1);
}

#[rstest]
fn concurrent_writers_never_tear_the_snapshot() {
    let store = Arc::new(PropertyStore::new());
    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let shared = Arc::clone(&store);
            thread::spawn(move || {
                for round in 0..25 {
                    shared.set(&format!("w{worker}.r{round}"), json!(round));
                    let snapshot = shared.snapshot();
                    assert_eq!(
                        crate::convert::tree_to_flat(snapshot.tree()),
                        snapshot.flat().clone()
                    );
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker thread");
    }
    assert_eq!(store.len(), 200);
}

#[rstest]
fn store_feeds_a_figment_pipeline(store: PropertyStore) {
    #[derive(Deserialize)]
    struct Endpoint {
        port: u16,
        host: String,
    }
    let server: Endpoint = Figment::from(&store)
        .extract_inner("server")
        .expect("figment extraction");
    assert_eq!(server.port, 8080);
    assert_eq!(server.host, "localhost");
}

#[rstest]
fn root_key_fragments_are_rejected(store: PropertyStore) {
    let before = store.snapshot();
    let err = store
        .append(flat(&[("", json!("scalar root"))]))
        .expect_err("root key");
    assert!(matches!(err.as_ref(), PropsError::Conversion { .. }));
    assert_eq!(*store.snapshot(), *before);
    assert!(store.append_tree(&json!(5)).is_err());
}
