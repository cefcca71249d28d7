//! Converter coverage: flattening laws, text round-trips and edge cases.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use proptest::prelude::*;
use serde_json::{Map, Value};

mod flatten_tests;

/// Scalars that survive every representation unchanged.
pub(super) fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z][a-z ]{0,8}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

/// Trees without empty containers, rooted at a mapping.
pub(super) fn tree_strategy() -> impl Strategy<Value = Value> {
    let node = leaf_strategy().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,5}", inner, 1..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    });
    prop::collection::btree_map("[a-z]{1,5}", node, 1..5)
        .prop_map(|entries| Value::Object(entries.into_iter().collect()))
}
