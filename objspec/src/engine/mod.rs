//! The recursive evaluation engine.
//!
//! An [`Evaluator`] walks the keys of an input record, looks each one up in a
//! [`Schema`] and produces a result tree of the same shape. What a passing or
//! failing leaf looks like is decided by the evaluator's composers, so the
//! engine itself carries no opinion about the result format.

mod tuple;

pub use tuple::{run_predicate, Verdict};

use serde_json::{json, Value};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::observability::{EventStage, EventType, NoOpLogger, TraceEvent, ValidationLogger};
use crate::schema::{Rule, Schema};
use crate::tree::{lookup, record_keys, Branch, ResultTree};

/// Composes the leaf for a field whose predicates all held. Receives the
/// field value.
pub type SuccessFn = dyn Fn(&Value) -> Value + Send + Sync;

/// Composes the leaf for a field with failing predicates. Receives the
/// messages in declaration order.
pub type FailureFn = dyn Fn(Vec<String>) -> Value + Send + Sync;

/// The record an evaluation walks.
#[derive(Clone, Copy)]
pub enum Input<'a> {
    /// A plain record.
    Record(&'a Value),
    /// A record computed per key. Called with `None` for the record whose
    /// keys are walked, and with `Some(key)` for the record that key is read
    /// from, which is also the key's sibling scope.
    Accessor(&'a dyn Fn(Option<&str>) -> Value),
}

impl<'a> Input<'a> {
    /// Resolves the record for `key`.
    #[must_use]
    pub fn scope(&self, key: Option<&str>) -> Cow<'a, Value> {
        match *self {
            Self::Record(record) => Cow::Borrowed(record),
            Self::Accessor(access) => Cow::Owned(access(key)),
        }
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(record) => f.debug_tuple("Record").field(record).finish(),
            Self::Accessor(_) => f.write_str("Accessor(..)"),
        }
    }
}

impl<'a> From<&'a Value> for Input<'a> {
    fn from(record: &'a Value) -> Self {
        Self::Record(record)
    }
}

/// Evaluates schemas against records.
pub struct Evaluator {
    on_success: Box<SuccessFn>,
    on_failure: Box<FailureFn>,
    logger: Arc<dyn ValidationLogger>,
}

impl Evaluator {
    /// Creates an evaluator with custom leaf composers.
    pub fn new<S, F>(on_success: S, on_failure: F, logger: Arc<dyn ValidationLogger>) -> Self
    where
        S: Fn(&Value) -> Value + Send + Sync + 'static,
        F: Fn(Vec<String>) -> Value + Send + Sync + 'static,
    {
        Self {
            on_success: Box::new(on_success),
            on_failure: Box::new(on_failure),
            logger,
        }
    }

    /// Creates the evaluator used for validation: passing fields become
    /// `true`, failing fields the list of their messages.
    #[must_use]
    pub fn standard(logger: Arc<dyn ValidationLogger>) -> Self {
        Self::new(
            |_| Value::Bool(true),
            |messages| Value::Array(messages.into_iter().map(Value::String).collect()),
            logger,
        )
    }

    /// Evaluates every key of the input record against `schema`.
    ///
    /// Results follow the input's key order. Keys declared in the schema but
    /// absent from the input are not visited; keys without a rule pass.
    pub fn evaluate(&self, schema: &Schema, input: Input<'_>) -> Branch {
        let keys = record_keys(&input.scope(None));
        let mut results = Branch::with_capacity(keys.len());

        for key in keys {
            let scope = input.scope(Some(&key));
            let value = lookup(&scope, &key);
            let rule = schema.get(&key);

            self.emit(|| {
                TraceEvent::new(
                    EventType::Property,
                    EventStage::Processing,
                    format!("Checking object property '{key}' against schema predicate."),
                    json!({
                        "key": key,
                        "value": value,
                        "rule": rule.map(Rule::kind),
                    }),
                )
            });

            let node = match rule {
                Some(rule) => self.apply(rule, &key, value, &scope),
                None => self.missing(&key),
            };
            results.insert(key, node);
        }

        results
    }

    fn apply(&self, rule: &Rule, key: &str, value: &Value, siblings: &Value) -> ResultTree {
        match rule {
            Rule::Tuples(tuples) => {
                let failures: Vec<String> = tuples
                    .iter()
                    .map(|tuple| run_predicate(tuple, value, siblings, key, self.logger.as_ref()))
                    .filter_map(Verdict::into_message)
                    .collect();

                if failures.is_empty() {
                    ResultTree::Leaf((self.on_success)(value))
                } else {
                    ResultTree::Leaf((self.on_failure)(failures))
                }
            }
            Rule::Schema(nested) => self.traced(
                EventType::PredicateObject,
                key,
                || format!("Schema predicate object found for property '{key}'."),
                || ResultTree::Branch(self.evaluate(nested, Input::Record(value))),
            ),
            Rule::Items(templates) => self.traced(
                EventType::PredicateItems,
                key,
                || format!("Schema predicate items found for property '{key}'."),
                || self.items(templates, value),
            ),
            Rule::Dynamic(generate) => self.traced(
                EventType::PredicateFunction,
                key,
                || format!("Schema predicate function found for property '{key}'."),
                || self.apply(&generate(value), key, value, siblings),
            ),
        }
    }

    /// Element `i` of a sequence is evaluated against template `i`. A value
    /// that is not a sequence is walked like a record keyed by index.
    fn items(&self, templates: &[Schema], value: &Value) -> ResultTree {
        let by_index: Schema = templates
            .iter()
            .enumerate()
            .map(|(index, template)| (index.to_string(), Rule::Schema(template.clone())))
            .collect();

        let results = self.evaluate(&by_index, Input::Record(value));
        if value.is_array() {
            ResultTree::Sequence(results.into_values().collect())
        } else {
            ResultTree::Branch(results)
        }
    }

    fn missing(&self, key: &str) -> ResultTree {
        self.traced(
            EventType::PredicateMissing,
            key,
            || format!("No schema predicate found for property '{key}'."),
            || ResultTree::Leaf((self.on_success)(&json!([]))),
        )
    }

    fn traced<M, F>(&self, event_type: EventType, key: &str, message: M, run: F) -> ResultTree
    where
        M: FnOnce() -> String,
        F: FnOnce() -> ResultTree,
    {
        self.emit(|| TraceEvent::new(event_type, EventStage::Processing, message(), json!({ "property": key })));

        let node = run();

        self.emit(|| {
            TraceEvent::new(
                event_type,
                EventStage::Processed,
                format!("Validation result for object property '{key}' is '{node}'."),
                json!({ "property": key, "result": node.to_value() }),
            )
        });

        node
    }

    fn emit<F>(&self, build: F)
    where
        F: FnOnce() -> TraceEvent,
    {
        if self.logger.enabled() {
            self.logger.log(&build());
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::standard(Arc::new(NoOpLogger))
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator").finish_non_exhaustive()
    }
}
