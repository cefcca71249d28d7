//! Key grammar coverage.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use proptest::prelude::*;
use rstest::rstest;

use super::{KeyPath, Step};
use crate::PropsError;

fn key(name: &str) -> Step {
    Step::Key(name.to_owned())
}

#[rstest]
#[case("", vec![])]
#[case("a", vec![key("a")])]
#[case("a.b.c", vec![key("a"), key("b"), key("c")])]
#[case("e[0][1]", vec![key("e"), Step::Index(0), Step::Index(1)])]
#[case("server.ports[12].name", vec![key("server"), key("ports"), Step::Index(12), key("name")])]
#[case("[3].x", vec![Step::Index(3), key("x")])]
#[case("a[0][10]", vec![key("a"), Step::Index(0), Step::Index(10)])]
#[case("a..b", vec![key("a"), key(""), key("b")])]
#[case("base.profiles-active", vec![key("base"), key("profiles-active")])]
fn parses_valid_keys(#[case] text: &str, #[case] expected: Vec<Step>) {
    let path = KeyPath::parse(text).expect("key parses");
    assert_eq!(path.steps(), expected.as_slice());
    assert_eq!(path.to_string(), text);
}

#[rstest]
#[case("a[0")]
#[case("a[x]")]
#[case("a[-1]")]
#[case("a[]")]
#[case("a]b")]
#[case("a[0]b")]
#[case("a.[0]")]
#[case("a[99999999999999999999999]")]
#[case("a[007]")]
#[case("a[00]")]
#[case("a[0][01]")]
fn rejects_malformed_keys(#[case] text: &str) {
    let err = KeyPath::parse(text).expect_err("key is malformed");
    assert!(
        matches!(&*err, PropsError::MalformedKey { key, .. } if key == text),
        "unexpected error {err:?}"
    );
}

#[rstest]
fn parent_and_last_walk_back_one_step() {
    let path = KeyPath::parse("a.b[2]").expect("key parses");
    assert_eq!(path.last(), Some(&Step::Index(2)));
    let parent = path.parent().expect("non-root path has a parent");
    assert_eq!(parent.to_string(), "a.b");
    assert!(path.starts_with(&parent));
    assert!(KeyPath::root().parent().is_none());
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_-]{0,8}".prop_map(Step::Key),
        (0usize..50).prop_map(Step::Index),
    ]
}

fn path_strategy() -> impl Strategy<Value = KeyPath> {
    ("[a-z]{1,6}", prop::collection::vec(step_strategy(), 0..6)).prop_map(|(head, tail)| {
        std::iter::once(Step::Key(head)).chain(tail).collect()
    })
}

proptest! {
    #[test]
    fn format_then_parse_is_identity(path in path_strategy()) {
        let text = path.to_string();
        let reparsed = KeyPath::parse(&text).expect("formatted path parses");
        prop_assert_eq!(reparsed, path);
    }

    #[test]
    fn parse_then_format_is_identity(
        head in "[a-z]{1,6}",
        indices in prop::collection::vec("0|[1-9][0-9]{0,3}", 0..4),
        tail in "[a-z]{0,6}",
    ) {
        let mut text = head;
        for index in &indices {
            text.push_str(&format!("[{index}]"));
        }
        if !tail.is_empty() {
            text.push('.');
            text.push_str(&tail);
        }
        let path = KeyPath::parse(&text).expect("generated key parses");
        prop_assert_eq!(path.to_string(), text);
    }
}
