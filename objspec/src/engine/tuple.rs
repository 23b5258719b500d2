//! Runs a single predicate tuple against a value.

use serde_json::{json, Value};
use std::fmt;

use crate::observability::{EventStage, EventType, TraceEvent, ValidationLogger};
use crate::schema::PredicateTuple;

/// The outcome of one predicate tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The predicate held.
    Pass,
    /// The predicate failed with the rendered message.
    Fail(String),
}

impl Verdict {
    /// Returns true if the predicate held.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        match self {
            Self::Pass => None,
            Self::Fail(message) => Some(message),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Pass => Value::Bool(true),
            Self::Fail(message) => Value::String(message.clone()),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "true"),
            Self::Fail(message) => write!(f, "{message}"),
        }
    }
}

/// Runs `tuple` against `value`, with `siblings` as the enclosing record.
///
/// A failing predicate renders the tuple's message from the value and `key`.
/// Two `predicate-tuple` events are emitted around the call when the logger
/// is enabled.
pub fn run_predicate(
    tuple: &PredicateTuple,
    value: &Value,
    siblings: &Value,
    key: &str,
    logger: &dyn ValidationLogger,
) -> Verdict {
    let traced = logger.enabled();

    if traced {
        logger.log(&TraceEvent::new(
            EventType::PredicateTuple,
            EventStage::Processing,
            format!("Invoking tuple predicate for property '{key}'."),
            json!({
                "property": key,
                "predicate": tuple.description(),
                "value": value,
            }),
        ));
    }

    let verdict = if tuple.test(value, siblings) {
        Verdict::Pass
    } else {
        Verdict::Fail(tuple.message().render(value, key))
    };

    if traced {
        logger.log(&TraceEvent::new(
            EventType::PredicateTuple,
            EventStage::Processed,
            format!("Validation result for object property '{key}' is '{verdict}'."),
            json!({
                "property": key,
                "predicate": tuple.description(),
                "value": value,
                "result": verdict.to_value(),
            }),
        ));
    }

    verdict
}
