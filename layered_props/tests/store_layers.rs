//! Layer precedence and type stability through the public store API.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::panic_in_result_fn is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::panic_in_result_fn,
    reason = "assertions give clearer intent inside fallible tests"
)]

use layered_props::convert::TextFormat;
use layered_props::{FlatMap, PropertyStore, PropsResult};
use rstest::rstest;
use serde::Deserialize;
use serde_json::json;

#[rstest]
fn later_layers_override_earlier_ones() -> PropsResult<()> {
    let store = PropertyStore::new();
    store.load(&json!({ "a": 1, "b": 2 }))?;
    let mut overlay = FlatMap::new();
    overlay.insert("b".into(), json!(3));
    overlay.insert("c".into(), json!(4));
    store.append(overlay)?;
    assert_eq!(store.tree(), json!({ "a": 1, "b": 3, "c": 4 }));
    Ok(())
}

#[rstest]
fn mixed_format_layers_merge_per_leaf() -> PropsResult<()> {
    let store = PropertyStore::new();
    store.load(&TextFormat::Yaml.parse("db:\n  host: base\n  pool:\n    max: 10\n    min: 1\n")?)?;
    store.append(TextFormat::Properties.parse_flat("db.pool.max=50\n")?)?;
    store.append(TextFormat::Json.parse_flat(r#"{"db": {"user": "app"}}"#)?)?;

    #[derive(Debug, Deserialize)]
    struct Pool {
        max: u32,
        min: u32,
    }
    #[derive(Debug, Deserialize)]
    struct Db {
        host: String,
        user: String,
        pool: Pool,
    }
    let db: Db = store.get_object("db")?;
    assert_eq!(db.host, "base");
    assert_eq!(db.user, "app");
    assert_eq!((db.pool.max, db.pool.min), (50, 1));
    Ok(())
}

#[rstest]
fn set_never_changes_the_type_class() {
    let store = PropertyStore::new();
    store.set("k", json!(5));
    store.set("k", json!(["list"]));
    store.set("k", json!({ "nested": true }));
    assert_eq!(store.get("k"), Some(json!(5)));
    assert_eq!(store.get_i32("k"), 5);
}

#[rstest]
fn sequence_elements_are_addressable() -> PropsResult<()> {
    let store = PropertyStore::new();
    store.load(&json!({ "e": [[10, 20], [30, 40]] }))?;
    assert_eq!(store.get_i32("e[0][1]"), 20);
    assert_eq!(store.get_i32("e[1][0]"), 30);
    store.set("e[1][1]", json!(41));
    assert_eq!(store.get("e"), Some(json!([[10, 20], [30, 41]])));
    Ok(())
}
