//! Error types for the objspec crate.
//!
//! Validation failures are never errors: they are returned as data inside a
//! [`ValidationResult`](crate::validation::ValidationResult). The types here
//! cover structural defects in the way the validator was set up.

use std::collections::HashMap;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ObjspecError> = std::result::Result<T, E>;

/// The main error type for objspec operations.
#[derive(Debug, Error)]
pub enum ObjspecError {
    /// The validator, its options or its schema are misconfigured.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration defects, raised before any input is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Options were supplied but are not a mapping.
    #[error("Options is not a valid object.")]
    InvalidOptions,

    /// An option has a value of the wrong shape.
    #[error("Invalid option '{option}': {reason}")]
    InvalidOptionValue {
        /// The offending option.
        option: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The `logger` option does not name a logger that can be constructed.
    #[error("Specified logger is not a valid logger: {found}")]
    InvalidLogger {
        /// The rejected value, rendered as JSON.
        found: String,
    },

    /// A dynamic rule was skeletonized without a source record.
    #[error("Schema contains function, but no source object specified (property '{property}').")]
    MissingSource {
        /// The property holding the dynamic rule.
        property: String,
    },

    /// A pattern predicate was given an invalid regular expression.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as supplied.
        pattern: String,
        /// The regex compiler's complaint.
        reason: String,
    },

    /// An error tree handed to a formatter was missing.
    #[error("Errors not specified.")]
    ErrorsNotSpecified,

    /// An error tree handed to a formatter was not a mapping.
    #[error("Errors not a valid object.")]
    ErrorsNotObject,
}

impl ConfigError {
    /// Creates an invalid option value error.
    #[must_use]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOptionValue {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing source error for a dynamic rule.
    #[must_use]
    pub fn missing_source(property: impl Into<String>) -> Self {
        Self::MissingSource {
            property: property.into(),
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        let kind = match self {
            Self::InvalidOptions => "InvalidOptions",
            Self::InvalidOptionValue { option, .. } => {
                map.insert("option".to_string(), serde_json::json!(option));
                "InvalidOptionValue"
            }
            Self::InvalidLogger { found } => {
                map.insert("found".to_string(), serde_json::json!(found));
                "InvalidLogger"
            }
            Self::MissingSource { property } => {
                map.insert("property".to_string(), serde_json::json!(property));
                "MissingSource"
            }
            Self::InvalidPattern { pattern, .. } => {
                map.insert("pattern".to_string(), serde_json::json!(pattern));
                "InvalidPattern"
            }
            Self::ErrorsNotSpecified => "ErrorsNotSpecified",
            Self::ErrorsNotObject => "ErrorsNotObject",
        };

        map.insert("type".to_string(), serde_json::json!(kind));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::InvalidOptions.to_string(), "Options is not a valid object.");
        assert_eq!(ConfigError::ErrorsNotSpecified.to_string(), "Errors not specified.");
        assert_eq!(ConfigError::ErrorsNotObject.to_string(), "Errors not a valid object.");
        assert!(ConfigError::missing_source("specs")
            .to_string()
            .starts_with("Schema contains function, but no source object specified"));
    }

    #[test]
    fn test_config_error_to_dict() {
        let dict = ConfigError::missing_source("specs").to_dict();

        assert_eq!(dict.get("type").unwrap(), "MissingSource");
        assert_eq!(dict.get("property").unwrap(), "specs");
        assert!(dict.contains_key("message"));
    }

    #[test]
    fn test_objspec_error_from_config() {
        let err: ObjspecError = ConfigError::InvalidOptions.into();
        assert!(matches!(err, ObjspecError::Config(ConfigError::InvalidOptions)));
        assert_eq!(err.to_string(), "Options is not a valid object.");
    }
}
