//! Validator options.
//!
//! Options can be built in code through the `with_*` builders or read from a
//! JSON value with [`ValidatorOptions::from_value`]. Either way every field
//! falls back to its default individually.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Level;

use crate::errors::ConfigError;
use crate::observability::{NoOpLogger, TracingLogger, ValidationLogger};

/// How keys missing from the schema are treated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalPropsOptions {
    /// Skip reporting undeclared keys.
    #[serde(default)]
    pub ignore: bool,
    /// Message attached to every undeclared key.
    #[serde(default = "default_additional_props_message")]
    pub message: String,
}

fn default_additional_props_message() -> String {
    "Unexpected property.".to_string()
}

impl Default for AdditionalPropsOptions {
    fn default() -> Self {
        Self {
            ignore: false,
            message: default_additional_props_message(),
        }
    }
}

/// What is reported when the input is not a record at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidObjectOptions {
    /// Key of the object error.
    #[serde(default = "default_invalid_object_property")]
    pub property: String,
    /// The object error message.
    #[serde(default = "default_invalid_object_message")]
    pub message: String,
}

fn default_invalid_object_property() -> String {
    "validObject".to_string()
}

fn default_invalid_object_message() -> String {
    "Invalid object.".to_string()
}

impl Default for InvalidObjectOptions {
    fn default() -> Self {
        Self {
            property: default_invalid_object_property(),
            message: default_invalid_object_message(),
        }
    }
}

/// Options of a [`Validator`](crate::validation::Validator).
#[derive(Clone)]
pub struct ValidatorOptions {
    /// Handling of undeclared keys.
    pub additional_props: AdditionalPropsOptions,
    /// Handling of non-record input.
    pub invalid_object: InvalidObjectOptions,
    /// Receives trace events from the engine.
    pub logger: Arc<dyn ValidationLogger>,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            additional_props: AdditionalPropsOptions::default(),
            invalid_object: InvalidObjectOptions::default(),
            logger: Arc::new(NoOpLogger),
        }
    }
}

impl fmt::Debug for ValidatorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorOptions")
            .field("additional_props", &self.additional_props)
            .field("invalid_object", &self.invalid_object)
            .field("logger_enabled", &self.logger.enabled())
            .finish()
    }
}

impl ValidatorOptions {
    /// Creates options with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops reporting undeclared keys.
    #[must_use]
    pub fn ignore_additional_props(mut self) -> Self {
        self.additional_props.ignore = true;
        self
    }

    /// Sets the message for undeclared keys.
    #[must_use]
    pub fn with_additional_props_message(mut self, message: impl Into<String>) -> Self {
        self.additional_props.message = message.into();
        self
    }

    /// Sets the key and message reported for non-record input.
    #[must_use]
    pub fn with_invalid_object(mut self, property: impl Into<String>, message: impl Into<String>) -> Self {
        self.invalid_object = InvalidObjectOptions {
            property: property.into(),
            message: message.into(),
        };
        self
    }

    /// Sets the trace logger.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn ValidationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Reads options from JSON.
    ///
    /// `null` yields the defaults. Recognised keys are `additionalProps`,
    /// `invalidObject` and `logger`; others are ignored. The logger is given
    /// by name: `"none"`, `"tracing"`, or `{"tracing": "<level>"}`.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            _ => return Err(ConfigError::InvalidOptions),
        };

        let mut options = Self::default();

        if let Some(section) = present(map, "additionalProps") {
            options.additional_props = section_from_value("additionalProps", section)?;
        }
        if let Some(section) = present(map, "invalidObject") {
            options.invalid_object = section_from_value("invalidObject", section)?;
        }
        if let Some(logger) = map.get("logger") {
            options.logger = logger_from_value(logger)?;
        }

        Ok(options)
    }
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

fn section_from_value<T>(option: &str, value: &Value) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if !value.is_object() {
        return Err(ConfigError::invalid_option(option, "expected an object"));
    }
    T::deserialize(value).map_err(|e| ConfigError::invalid_option(option, e.to_string()))
}

fn logger_from_value(value: &Value) -> Result<Arc<dyn ValidationLogger>, ConfigError> {
    let invalid = || ConfigError::InvalidLogger {
        found: value.to_string(),
    };

    match value {
        Value::Null => Ok(Arc::new(NoOpLogger)),
        Value::String(name) => match name.as_str() {
            "none" | "noop" => Ok(Arc::new(NoOpLogger)),
            "tracing" => Ok(Arc::new(TracingLogger::default())),
            _ => Err(invalid()),
        },
        Value::Object(map) if map.len() == 1 => {
            let level = map
                .get("tracing")
                .and_then(Value::as_str)
                .and_then(|level| Level::from_str(level).ok())
                .ok_or_else(invalid)?;
            Ok(Arc::new(TracingLogger::new(level)))
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = ValidatorOptions::default();

        assert!(!options.additional_props.ignore);
        assert_eq!(options.additional_props.message, "Unexpected property.");
        assert_eq!(options.invalid_object.property, "validObject");
        assert_eq!(options.invalid_object.message, "Invalid object.");
        assert!(!options.logger.enabled());
    }

    #[test]
    fn test_builders() {
        let options = ValidatorOptions::new()
            .ignore_additional_props()
            .with_additional_props_message("Not allowed.")
            .with_invalid_object("shape", "Not a record.")
            .with_logger(Arc::new(TracingLogger::default()));

        assert!(options.additional_props.ignore);
        assert_eq!(options.additional_props.message, "Not allowed.");
        assert_eq!(
            options.invalid_object,
            InvalidObjectOptions {
                property: "shape".to_string(),
                message: "Not a record.".to_string()
            }
        );
        assert!(options.logger.enabled());
    }

    #[test]
    fn test_from_value_null_is_default() {
        let options = ValidatorOptions::from_value(&Value::Null).unwrap();
        assert_eq!(options.additional_props, AdditionalPropsOptions::default());
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        for value in [json!("options"), json!(1), json!([1, 2]), json!(true)] {
            assert_eq!(
                ValidatorOptions::from_value(&value).unwrap_err(),
                ConfigError::InvalidOptions
            );
        }
    }

    #[test]
    fn test_from_value_merges_per_field() {
        let options = ValidatorOptions::from_value(&json!({
            "additionalProps": {"ignore": true},
            "invalidObject": {"message": "Nope."}
        }))
        .unwrap();

        assert!(options.additional_props.ignore);
        assert_eq!(options.additional_props.message, "Unexpected property.");
        assert_eq!(options.invalid_object.property, "validObject");
        assert_eq!(options.invalid_object.message, "Nope.");
    }

    #[test]
    fn test_from_value_rejects_ill_typed_sections() {
        let err = ValidatorOptions::from_value(&json!({"additionalProps": {"ignore": "yes"}})).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptionValue { ref option, .. } if option == "additionalProps"));

        let err = ValidatorOptions::from_value(&json!({"invalidObject": "validObject"})).unwrap_err();
        assert_eq!(err, ConfigError::invalid_option("invalidObject", "expected an object"));
    }

    #[test]
    fn test_from_value_loggers() {
        let none = ValidatorOptions::from_value(&json!({"logger": "none"})).unwrap();
        assert!(!none.logger.enabled());

        let tracing = ValidatorOptions::from_value(&json!({"logger": "tracing"})).unwrap();
        assert!(tracing.logger.enabled());

        let leveled = ValidatorOptions::from_value(&json!({"logger": {"tracing": "trace"}})).unwrap();
        assert!(leveled.logger.enabled());
    }

    #[test]
    fn test_from_value_rejects_unknown_loggers() {
        for logger in [json!("console"), json!(42), json!({"tracing": "loud"}), json!({"file": "x.log"})] {
            let err = ValidatorOptions::from_value(&json!({ "logger": logger })).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidLogger {
                    found: logger.to_string()
                }
            );
        }
    }

    #[test]
    fn test_sections_round_trip_camel_case() {
        let value = serde_json::to_value(InvalidObjectOptions::default()).unwrap();
        assert_eq!(value, json!({"property": "validObject", "message": "Invalid object."}));

        let value = serde_json::to_value(AdditionalPropsOptions::default()).unwrap();
        assert_eq!(value, json!({"ignore": false, "message": "Unexpected property."}));
    }
}
