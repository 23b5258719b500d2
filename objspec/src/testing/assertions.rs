//! Test assertions for validation results.

use serde_json::Value;

use crate::tree::{flatten, Branch};
use crate::validation::ValidationResult;

/// Asserts that the result is valid.
pub fn assert_valid(result: &ValidationResult) {
    assert!(
        result.is_valid,
        "Expected a valid result, got errors: {}",
        serde_json::to_string(&result.errors).unwrap_or_default()
    );
}

/// Asserts that the result is invalid.
pub fn assert_invalid(result: &ValidationResult) {
    assert!(!result.is_valid, "Expected an invalid result, but it is valid");
}

/// Asserts that the property errors hold `message` at the dot-joined `path`.
pub fn assert_property_error(result: &ValidationResult, path: &str, message: &str) {
    assert_error_at(&result.errors.property, "property", path, message);
}

/// Asserts that the object rule `rule` failed with `message`.
pub fn assert_object_error(result: &ValidationResult, rule: &str, message: &str) {
    assert_error_at(&result.errors.object, "object", rule, message);
}

/// Asserts that no property errors were found.
pub fn assert_no_property_errors(result: &ValidationResult) {
    assert!(
        result.errors.property.is_empty(),
        "Expected no property errors, got: {}",
        serde_json::to_string(&result.errors.property).unwrap_or_default()
    );
}

fn assert_error_at(tree: &Branch, kind: &str, path: &str, message: &str) {
    let leaves = flatten(tree);
    let leaf = leaves.iter().find(|leaf| leaf.path == path);

    let Some(leaf) = leaf else {
        let paths: Vec<_> = leaves.iter().map(|leaf| leaf.path.as_str()).collect();
        panic!("Expected {kind} error at '{path}', but it doesn't exist. Paths: {paths:?}");
    };

    let found = match &leaf.value {
        Value::Array(messages) => messages.iter().any(|m| m.as_str() == Some(message)),
        Value::String(m) => m == message,
        _ => false,
    };

    assert!(
        found,
        "Expected {kind} error '{}' at '{}', got {}",
        message, path, leaf.value
    );
}
