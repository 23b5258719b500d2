//! Rebuilds a JSON mapping with every leaf replaced.

use serde_json::{Map, Value};

/// Replaces every leaf of `tree` with `f(key)`. Non-empty nested mappings are
/// rebuilt; sequences and empty mappings count as leaves.
pub fn set_leaves<F>(tree: &Map<String, Value>, f: &F) -> Map<String, Value>
where
    F: Fn(&str) -> Value + ?Sized,
{
    tree.iter()
        .map(|(key, value)| {
            let replaced = match value {
                Value::Object(nested) if !nested.is_empty() => Value::Object(set_leaves(nested, f)),
                _ => f(key),
            };
            (key.clone(), replaced)
        })
        .collect()
}

/// Replaces every leaf of `tree` with a copy of `value`.
#[must_use]
pub fn set_leaves_to(tree: &Map<String, Value>, value: &Value) -> Map<String, Value> {
    set_leaves(tree, &|_: &str| value.clone())
}
