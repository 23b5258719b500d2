//! Trace events emitted while a schema is evaluated.
//!
//! Every event is purely observational: loggers never influence the outcome
//! of a validation.

mod logger;

pub use logger::{CollectingLogger, FnLogger, NoOpLogger, TracingLogger, ValidationLogger};

#[cfg(test)]
pub use logger::MockValidationLogger;

use serde::{Deserialize, Serialize};
use std::fmt;

/// What part of the evaluation an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    /// A property is about to be checked against its rule.
    Property,
    /// A single predicate tuple is run.
    PredicateTuple,
    /// A nested schema is evaluated.
    PredicateObject,
    /// A positional template is evaluated against a sequence.
    PredicateItems,
    /// A dynamic rule is resolved and applied.
    PredicateFunction,
    /// A property has no rule.
    PredicateMissing,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property => write!(f, "property"),
            Self::PredicateTuple => write!(f, "predicate-tuple"),
            Self::PredicateObject => write!(f, "predicate-object"),
            Self::PredicateItems => write!(f, "predicate-items"),
            Self::PredicateFunction => write!(f, "predicate-function"),
            Self::PredicateMissing => write!(f, "predicate-missing"),
        }
    }
}

/// Whether an event precedes or follows the step it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStage {
    /// Emitted before the step runs.
    Processing,
    /// Emitted after the step produced its result.
    Processed,
}

impl fmt::Display for EventStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
            Self::Processed => write!(f, "processed"),
        }
    }
}

/// A structured trace event handed to a [`ValidationLogger`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Event type.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Event stage.
    pub stage: EventStage,
    /// Human readable message.
    pub message: String,
    /// Event payload.
    pub data: serde_json::Value,
}

impl TraceEvent {
    /// Creates a new trace event.
    #[must_use]
    pub fn new(
        event_type: EventType,
        stage: EventStage,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            event_type,
            stage,
            message: message.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_serializes_with_type_key() {
        let event = TraceEvent::new(
            EventType::PredicateTuple,
            EventStage::Processing,
            "Invoking tuple predicate for property 'name'.",
            json!({"property": "name"}),
        );

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "predicate-tuple");
        assert_eq!(value["stage"], "processing");
        assert_eq!(value["data"]["property"], "name");
    }

    #[test]
    fn test_display_matches_serialized_names() {
        for event_type in [
            EventType::Property,
            EventType::PredicateTuple,
            EventType::PredicateObject,
            EventType::PredicateItems,
            EventType::PredicateFunction,
            EventType::PredicateMissing,
        ] {
            assert_eq!(
                serde_json::to_value(event_type).unwrap(),
                json!(event_type.to_string())
            );
        }
        assert_eq!(EventStage::Processed.to_string(), "processed");
    }
}
