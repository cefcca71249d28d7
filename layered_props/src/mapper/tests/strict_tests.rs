//! Strict mode: failures are collected instead of zeroed.

use rstest::rstest;
use serde::Deserialize;
use serde_json::json;

use crate::PropsError;
use crate::mapper::{MapMode, from_dynamic_with};

#[derive(Debug, Default, Deserialize)]
struct Limits {
    retries: u8,
    ratio: f64,
    enabled: bool,
    nested: Nested,
}

#[derive(Debug, Default, Deserialize)]
struct Nested {
    depth: u32,
}

#[rstest]
fn clean_source_passes_strict_mapping() {
    let source = json!({ "retries": "3", "ratio": 0.5, "enabled": "true", "nested": { "depth": 2 } });
    let limits: Limits = from_dynamic_with(Some(&source), MapMode::Strict).expect("strict");
    assert_eq!(limits.retries, 3);
    assert_eq!(limits.nested.depth, 2);
}

#[rstest]
fn missing_fields_are_not_failures() {
    let limits: Limits = from_dynamic_with(Some(&json!({})), MapMode::Strict).expect("strict");
    assert_eq!(limits.retries, 0);
    assert!(!limits.enabled);
}

#[rstest]
fn single_failure_is_reported_with_its_path() {
    let source = json!({ "nested": { "depth": "deep" } });
    let err = from_dynamic_with::<Limits>(Some(&source), MapMode::Strict).expect_err("strict");
    match err.as_ref() {
        PropsError::Coercion {
            path,
            target,
            value,
        } => {
            assert_eq!(path, "nested.depth");
            assert_eq!(*target, "u32");
            assert_eq!(value, "'deep'");
        }
        other => panic!("expected coercion error, got {other:?}"),
    }
}

#[rstest]
fn every_failure_is_aggregated() {
    let source = json!({ "retries": 900, "ratio": "half", "enabled": "maybe", "nested": [1] });
    let err = from_dynamic_with::<Limits>(Some(&source), MapMode::Strict).expect_err("strict");
    let PropsError::Aggregate(all) = err.as_ref() else {
        panic!("expected aggregate, got {err:?}");
    };
    assert_eq!(all.len(), 4);
    let rendered = err.to_string();
    assert!(rendered.contains("retries"), "{rendered}");
    assert!(rendered.contains("expected mapping, found sequence"), "{rendered}");
}

#[rstest]
fn lenient_mode_zeroes_the_same_source() {
    let source = json!({ "retries": 900, "ratio": "half", "enabled": "maybe", "nested": [1] });
    let limits: Limits = from_dynamic_with(Some(&source), MapMode::Lenient).expect("lenient");
    assert_eq!(limits.retries, 0);
    assert!(limits.ratio.abs() < f64::EPSILON);
    assert!(!limits.enabled);
    assert_eq!(limits.nested.depth, 0);
}
