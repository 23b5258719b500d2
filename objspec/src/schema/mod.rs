//! Declarative schemas: field names mapped to rules.
//!
//! A [`Schema`] is built once and shared; every rule is immutable and cheap to
//! clone. Rule dispatch is decided by the [`Rule`] variant alone.

pub mod predicates;
mod skeleton;

pub use skeleton::skeleton;

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A predicate over a field value and the record that contains it.
pub type PredicateFn = dyn Fn(&Value, &Value) -> bool + Send + Sync;

/// Builds an error message from the failing value and its key.
pub type MessageFn = dyn Fn(&Value, &str) -> String + Send + Sync;

/// Produces a concrete rule from a field value.
pub type RuleFn = dyn Fn(&Value) -> Rule + Send + Sync;

/// The message reported when a predicate fails.
#[derive(Clone)]
pub enum Message {
    /// Fixed text.
    Text(String),
    /// Text computed from the failing value and its key.
    Computed(Arc<MessageFn>),
}

impl Message {
    /// Creates a computed message.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Value, &str) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Renders the message for a failing value.
    #[must_use]
    pub fn render(&self, value: &Value, key: &str) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Computed(f) => f(value, key),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A predicate paired with the message reported when it fails.
#[derive(Clone)]
pub struct PredicateTuple {
    predicate: Arc<PredicateFn>,
    message: Message,
    description: String,
}

impl PredicateTuple {
    /// Creates a tuple whose predicate sees the value and its sibling scope.
    pub fn new<P>(predicate: P, message: impl Into<Message>) -> Self
    where
        P: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
            description: std::any::type_name::<P>().to_string(),
        }
    }

    /// Creates a tuple whose predicate only looks at the value.
    pub fn unary<P>(predicate: P, message: impl Into<Message>) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let description = std::any::type_name::<P>().to_string();
        Self {
            predicate: Arc::new(move |value: &Value, _: &Value| predicate(value)),
            message: message.into(),
            description,
        }
    }

    /// Overrides the description reported in trace events.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Runs the predicate.
    #[must_use]
    pub fn test(&self, value: &Value, siblings: &Value) -> bool {
        (self.predicate)(value, siblings)
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Returns the description reported in trace events.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for PredicateTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateTuple")
            .field("description", &self.description)
            .field("message", &self.message)
            .finish()
    }
}

/// How a single field is validated.
#[derive(Clone)]
pub enum Rule {
    /// Every tuple is run; the field passes when all predicates hold.
    Tuples(Vec<PredicateTuple>),
    /// The field is a nested record validated against its own schema.
    Schema(Schema),
    /// The field is a sequence; element `i` is validated against schema `i`.
    Items(Vec<Schema>),
    /// The concrete rule is generated from the field value.
    Dynamic(Arc<RuleFn>),
}

impl Rule {
    /// Creates a tuple-sequence rule.
    pub fn tuples(tuples: impl IntoIterator<Item = PredicateTuple>) -> Self {
        Self::Tuples(tuples.into_iter().collect())
    }

    /// Creates a dynamic rule.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Rule + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    /// Validates every element of a sequence, or every value of a mapping,
    /// against the same schema. Any other value passes.
    #[must_use]
    pub fn each(schema: Schema) -> Self {
        Self::dynamic(move |value| match value {
            Value::Array(items) => Rule::Items(vec![schema.clone(); items.len()]),
            Value::Object(map) => Rule::Schema(
                map.keys()
                    .map(|key| (key.clone(), Rule::Schema(schema.clone())))
                    .collect(),
            ),
            _ => Rule::Tuples(Vec::new()),
        })
    }

    /// Returns a short name of the variant for trace events.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tuples(_) => "tuples",
            Self::Schema(_) => "schema",
            Self::Items(_) => "items",
            Self::Dynamic(_) => "dynamic",
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tuples(tuples) => f.debug_tuple("Tuples").field(tuples).finish(),
            Self::Schema(schema) => f.debug_tuple("Schema").field(schema).finish(),
            Self::Items(items) => f.debug_tuple("Items").field(items).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<Schema> for Rule {
    fn from(schema: Schema) -> Self {
        Self::Schema(schema)
    }
}

impl From<Vec<PredicateTuple>> for Rule {
    fn from(tuples: Vec<PredicateTuple>) -> Self {
        Self::Tuples(tuples)
    }
}

/// An ordered mapping from field names to rules.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: IndexMap<String, Rule>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, builder style.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.insert(key, rule);
        self
    }

    /// Adds or replaces a rule.
    pub fn insert(&mut self, key: impl Into<String>, rule: impl Into<Rule>) {
        self.rules.insert(key.into(), rule.into());
    }

    /// Looks up the rule for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.get(key)
    }

    /// Returns true if the key has a rule.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }

    /// Iterates over the rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Rule)> {
        self.rules.iter()
    }

    /// Iterates over the declared keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.rules.keys()
    }

    /// Returns the number of declared keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Rule)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, Rule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(k, rule)| (k.into(), rule)).collect(),
        }
    }
}
