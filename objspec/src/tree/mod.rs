//! Result trees and the generic tree helpers built around them.
//!
//! Input records are plain `serde_json::Value` trees; evaluation results are
//! [`ResultTree`]s, which additionally distinguish a sequence of per-element
//! results from a leaf that happens to hold a list of messages.

mod diff;
mod filter;
mod flatten;
mod merge;
mod set;

pub use diff::diff_keys;
pub use filter::filter_tree;
pub use flatten::{flatten, FlatLeaf};
pub use merge::{deep_merge, merge_branches, merge_with_arrays, SequenceMerge};
pub use set::{set_leaves, set_leaves_to};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A mapping level of a result tree.
pub type Branch = IndexMap<String, ResultTree>;

static NULL: Value = Value::Null;

/// The outcome of evaluating a schema, shaped like the schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultTree {
    /// The composed outcome of one field, e.g. `true` or a list of messages.
    Leaf(Value),
    /// Outcomes of a nested record.
    Branch(Branch),
    /// Outcomes of a sequence, aligned with its elements.
    Sequence(Vec<ResultTree>),
}

impl ResultTree {
    /// Returns true for leaves.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns the leaf value, if this is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Self::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the branch, if this is a branch.
    #[must_use]
    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Self::Branch(branch) => Some(branch),
            _ => None,
        }
    }

    /// Converts the tree into a plain JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Leaf(value) => value.clone(),
            Self::Branch(branch) => branch_to_value(branch),
            Self::Sequence(items) => Value::Array(items.iter().map(Self::to_value).collect()),
        }
    }
}

/// Converts a branch into a plain JSON mapping.
#[must_use]
pub fn branch_to_value(branch: &Branch) -> Value {
    Value::Object(
        branch
            .iter()
            .map(|(key, node)| (key.clone(), node.to_value()))
            .collect(),
    )
}

/// Mappings become branches; everything else, sequences included, is a leaf.
impl From<Value> for ResultTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Branch(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
            other => Self::Leaf(other),
        }
    }
}

impl fmt::Display for ResultTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(value) => write!(f, "{}", display_value(value)),
            other => write!(f, "{}", other.to_value()),
        }
    }
}

/// Renders a leaf for trace messages: strings verbatim, lists comma-joined.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// Reads `key` from a mapping, or index `key` from a sequence. Anything
/// missing reads as `null`.
pub(crate) fn lookup<'a>(record: &'a Value, key: &str) -> &'a Value {
    match record {
        Value::Object(map) => map.get(key).unwrap_or(&NULL),
        Value::Array(items) => key
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index))
            .unwrap_or(&NULL),
        _ => &NULL,
    }
}

/// Reads element `index` of a sequence, `null` otherwise.
pub(crate) fn element(record: &Value, index: usize) -> &Value {
    record.as_array().and_then(|items| items.get(index)).unwrap_or(&NULL)
}

/// The keys a record is walked by: mapping keys in order, sequence indices,
/// nothing for scalars.
pub(crate) fn record_keys(record: &Value) -> Vec<String> {
    match record {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => (0..items.len()).map(|index| index.to_string()).collect(),
        _ => Vec::new(),
    }
}
