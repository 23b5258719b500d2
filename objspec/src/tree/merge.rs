//! Deep merging of JSON trees and result branches.

use serde_json::{Map, Value};

use super::{Branch, ResultTree};

/// How two sequences found at the same key are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceMerge {
    /// Element-wise: mapping elements of the left sequence are deep-merged
    /// with the right element at the same index, other elements are replaced
    /// by it. Right elements past the end of the left sequence are appended.
    #[default]
    Positional,
    /// The right sequence is appended to the left one.
    Concatenate,
}

/// Deep-merges `right` over `left` without touching either.
///
/// Mappings are merged key by key, sequences according to `sequences`, and
/// in every other case the right value wins.
#[must_use]
pub fn deep_merge(left: &Value, right: &Value, sequences: SequenceMerge) -> Value {
    merge_values(left, right, sequences, false)
}

/// Merges a schema skeleton with real input, reconciling arrays positionally.
///
/// A mapping in the skeleton stands for a nested schema and survives when the
/// input holds a non-mapping at the same place, so the nested rules still see
/// their keys.
#[must_use]
pub fn merge_with_arrays(template: &Value, input: &Value) -> Value {
    merge_values(template, input, SequenceMerge::Positional, true)
}

fn merge_values(left: &Value, right: &Value, sequences: SequenceMerge, keep_mappings: bool) -> Value {
    match (left, right) {
        (Value::Object(l), Value::Object(r)) => Value::Object(merge_maps(l, r, sequences, keep_mappings)),
        (Value::Array(l), Value::Array(r)) => Value::Array(merge_sequences(l, r, sequences, keep_mappings)),
        (Value::Object(_), _) if keep_mappings => left.clone(),
        (_, right) => right.clone(),
    }
}

fn merge_maps(
    left: &Map<String, Value>,
    right: &Map<String, Value>,
    sequences: SequenceMerge,
    keep_mappings: bool,
) -> Map<String, Value> {
    let mut merged = left.clone();

    for (key, value) in right {
        let combined = match left.get(key) {
            Some(existing) => merge_values(existing, value, sequences, keep_mappings),
            None => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }

    merged
}

fn merge_sequences(left: &[Value], right: &[Value], sequences: SequenceMerge, keep_mappings: bool) -> Vec<Value> {
    match sequences {
        SequenceMerge::Positional => {
            let mut merged: Vec<Value> = left
                .iter()
                .enumerate()
                .map(|(index, template)| match (template, right.get(index)) {
                    (Value::Object(_), Some(actual)) => merge_values(template, actual, sequences, keep_mappings),
                    (Value::Object(_), None) => template.clone(),
                    (_, actual) => actual.cloned().unwrap_or(Value::Null),
                })
                .collect();
            merged.extend(right.iter().skip(left.len()).cloned());
            merged
        }
        SequenceMerge::Concatenate => left.iter().chain(right).cloned().collect(),
    }
}

/// Merges two result branches. Leaves holding message lists are
/// concatenated; otherwise the right side wins.
#[must_use]
pub fn merge_branches(left: &Branch, right: &Branch) -> Branch {
    let mut merged = left.clone();

    for (key, node) in right {
        let combined = match left.get(key) {
            Some(existing) => merge_nodes(existing, node),
            None => node.clone(),
        };
        merged.insert(key.clone(), combined);
    }

    merged
}

fn merge_nodes(left: &ResultTree, right: &ResultTree) -> ResultTree {
    match (left, right) {
        (ResultTree::Branch(l), ResultTree::Branch(r)) => ResultTree::Branch(merge_branches(l, r)),
        (ResultTree::Leaf(l), ResultTree::Leaf(r)) => {
            ResultTree::Leaf(deep_merge(l, r, SequenceMerge::Concatenate))
        }
        (_, right) => right.clone(),
    }
}
