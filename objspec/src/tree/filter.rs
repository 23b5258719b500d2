//! Prunes result trees down to the leaves that satisfy a predicate.

use serde_json::Value;

use super::{Branch, ResultTree};

/// Keeps the leaves of `branch` that satisfy `predicate`.
///
/// Branches left empty are dropped from their parent. A sequence is turned
/// into a branch keyed by the original indices of its surviving elements, so
/// positions are preserved.
pub fn filter_tree<P>(branch: &Branch, predicate: &P) -> Branch
where
    P: Fn(&Value) -> bool + ?Sized,
{
    let mut kept = Branch::new();

    for (key, node) in branch {
        if let Some(node) = filter_node(node, predicate) {
            kept.insert(key.clone(), node);
        }
    }

    kept
}

fn filter_node<P>(node: &ResultTree, predicate: &P) -> Option<ResultTree>
where
    P: Fn(&Value) -> bool + ?Sized,
{
    let filtered = match node {
        ResultTree::Leaf(value) => return predicate(value).then(|| node.clone()),
        ResultTree::Branch(branch) => filter_tree(branch, predicate),
        ResultTree::Sequence(items) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| filter_node(item, predicate).map(|kept| (index.to_string(), kept)))
            .collect(),
    };

    (!filtered.is_empty()).then_some(ResultTree::Branch(filtered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::branch_to_value;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn not_true(value: &Value) -> bool {
        value != &Value::Bool(true)
    }

    fn branch(value: Value) -> Branch {
        match ResultTree::from(value) {
            ResultTree::Branch(branch) => branch,
            ResultTree::Leaf(_) | ResultTree::Sequence(_) => unreachable!(),
        }
    }

    #[test]
    fn test_all_true_leaves_filter_to_empty() {
        let tree = branch(json!({"a": true, "b": {"c": true, "d": {"e": true}}}));
        assert!(filter_tree(&tree, &not_true).is_empty());
    }

    #[test]
    fn test_no_true_leaves_is_unchanged() {
        let tree = branch(json!({"a": ["x"], "b": {"c": ["y", "z"]}}));
        assert_eq!(filter_tree(&tree, &not_true), tree);
    }

    #[test]
    fn test_prunes_empty_branches() {
        let tree = branch(json!({
            "id": true,
            "address": {"street": true},
            "user": {"name": ["required"], "age": true}
        }));

        assert_eq!(
            branch_to_value(&filter_tree(&tree, &not_true)),
            json!({"user": {"name": ["required"]}})
        );
    }

    #[test]
    fn test_sequences_keep_original_indices() {
        let mut tree = Branch::new();
        tree.insert(
            "users".to_string(),
            ResultTree::Sequence(vec![
                ResultTree::Leaf(json!(true)),
                ResultTree::Branch(branch(json!({"name": ["too short"], "email": true}))),
                ResultTree::Branch(branch(json!({"name": true}))),
                ResultTree::Leaf(json!(["bad element"])),
            ]),
        );

        assert_eq!(
            branch_to_value(&filter_tree(&tree, &not_true)),
            json!({"users": {"1": {"name": ["too short"]}, "3": ["bad element"]}})
        );
    }

    #[test]
    fn test_fully_valid_sequence_is_dropped() {
        let mut tree = Branch::new();
        tree.insert(
            "users".to_string(),
            ResultTree::Sequence(vec![ResultTree::Leaf(json!(true)), ResultTree::Sequence(vec![])]),
        );

        assert!(filter_tree(&tree, &not_true).is_empty());
    }
}
