//! Flattens result trees into path/value pairs.

use serde::Serialize;
use serde_json::Value;

use super::{Branch, ResultTree};

/// One leaf of a flattened tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatLeaf {
    /// Dot-joined path from the root, sequence indices included.
    pub path: String,
    /// The leaf value.
    pub value: Value,
}

/// Lists every leaf of `branch` with its dot-joined path, in tree order.
#[must_use]
pub fn flatten(branch: &Branch) -> Vec<FlatLeaf> {
    let mut leaves = Vec::new();
    for (key, node) in branch {
        collect(node, key.clone(), &mut leaves);
    }
    leaves
}

fn collect(node: &ResultTree, path: String, leaves: &mut Vec<FlatLeaf>) {
    match node {
        ResultTree::Leaf(value) => leaves.push(FlatLeaf {
            path,
            value: value.clone(),
        }),
        ResultTree::Branch(branch) => {
            for (key, child) in branch {
                collect(child, format!("{path}.{key}"), leaves);
            }
        }
        ResultTree::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                collect(child, format!("{path}.{index}"), leaves);
            }
        }
    }
}
