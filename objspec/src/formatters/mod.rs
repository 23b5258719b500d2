//! Flat renderings of validation errors for display.
//!
//! Both formatters walk the `property` and `object` trees with
//! [`flatten`](crate::tree::flatten) and name each entry by its dot-joined
//! path.

use serde::Serialize;
use serde_json::Value;

use crate::tree::{flatten, Branch};
use crate::validation::ValidationErrors;

/// One error message and the path it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageEntry {
    /// Dot-joined path of the failing field or object rule.
    pub name: String,
    /// The message.
    pub message: String,
}

/// All error messages of one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyEntry {
    /// Dot-joined path of the failing field or object rule.
    pub name: String,
    /// The messages, in the order they were reported.
    pub messages: Vec<String>,
}

/// Formatted property and object errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedErrors<T> {
    /// Entries for per-field errors.
    pub property: Vec<T>,
    /// Entries for whole-record errors.
    pub object: Vec<T>,
}

/// One entry per message.
#[must_use]
pub fn error_per_message(errors: &ValidationErrors) -> FormattedErrors<MessageEntry> {
    let entries = |tree: &Branch| -> Vec<MessageEntry> {
        flatten(tree)
            .into_iter()
            .flat_map(|leaf| {
                let name = leaf.path;
                messages(&leaf.value)
                    .into_iter()
                    .map(move |message| MessageEntry {
                        name: name.clone(),
                        message,
                    })
            })
            .collect()
    };

    FormattedErrors {
        property: entries(&errors.property),
        object: entries(&errors.object),
    }
}

/// One entry per failing path, holding all of its messages.
#[must_use]
pub fn error_per_property(errors: &ValidationErrors) -> FormattedErrors<PropertyEntry> {
    let entries = |tree: &Branch| -> Vec<PropertyEntry> {
        flatten(tree)
            .into_iter()
            .map(|leaf| PropertyEntry {
                messages: messages(&leaf.value),
                name: leaf.path,
            })
            .collect()
    };

    FormattedErrors {
        property: entries(&errors.property),
        object: entries(&errors.object),
    }
}

fn messages(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(message_text).collect(),
        other => vec![message_text(other)],
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn errors() -> ValidationErrors {
        ValidationErrors::from_value(&json!({
            "property": {
                "surname": ["surname must begin with a capital", "surname is too long"]
            },
            "object": {
                "id": ["ids must be unique"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_error_per_message() {
        assert_eq!(
            serde_json::to_value(error_per_message(&errors())).unwrap(),
            json!({
                "property": [
                    {"name": "surname", "message": "surname must begin with a capital"},
                    {"name": "surname", "message": "surname is too long"}
                ],
                "object": [{"name": "id", "message": "ids must be unique"}]
            })
        );
    }

    #[test]
    fn test_error_per_property() {
        assert_eq!(
            serde_json::to_value(error_per_property(&errors())).unwrap(),
            json!({
                "property": [
                    {"name": "surname", "messages": ["surname must begin with a capital", "surname is too long"]}
                ],
                "object": [{"name": "id", "messages": ["ids must be unique"]}]
            })
        );
    }

    #[test]
    fn test_nested_paths() {
        let errors = ValidationErrors::from_value(&json!({
            "property": {"address": {"street": ["required"]}, "specs": {"1": {"name": ["bad"]}}},
            "object": {"validObject": "Invalid object."}
        }))
        .unwrap();

        assert_eq!(
            error_per_message(&errors).property,
            vec![
                MessageEntry { name: "address.street".to_string(), message: "required".to_string() },
                MessageEntry { name: "specs.1.name".to_string(), message: "bad".to_string() },
            ]
        );
        assert_eq!(
            error_per_property(&errors).object,
            vec![PropertyEntry {
                name: "validObject".to_string(),
                messages: vec!["Invalid object.".to_string()]
            }]
        );
    }

    #[test]
    fn test_empty_errors() {
        let formatted = error_per_message(&ValidationErrors::default());
        assert!(formatted.property.is_empty());
        assert!(formatted.object.is_empty());
    }

    #[test]
    fn test_rejects_missing_or_malformed_errors() {
        assert_eq!(
            ValidationErrors::from_value(&json!(null)).unwrap_err().to_string(),
            "Errors not specified."
        );
        assert_eq!(
            ValidationErrors::from_value(&json!(false)).unwrap_err(),
            ConfigError::ErrorsNotObject
        );
    }
}
