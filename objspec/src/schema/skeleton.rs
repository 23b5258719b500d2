//! Expands a schema into a template record with `null` leaves.
//!
//! Merging the skeleton under real input guarantees the engine sees every
//! declared key, even when the input omits it.

use serde_json::{Map, Value};

use super::{Rule, Schema};
use crate::errors::ConfigError;
use crate::tree::{element, lookup};

/// Builds the skeleton of `schema`.
///
/// `source` is the record the skeleton will be merged with. It is required as
/// soon as a dynamic rule has to be resolved; nested levels read missing
/// values as `null`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingSource`] if a dynamic rule is reached without
/// a source record.
pub fn skeleton(schema: &Schema, source: Option<&Value>) -> Result<Value, ConfigError> {
    let mut template = Map::new();

    for (key, rule) in schema.iter() {
        let child = source.map(|record| lookup(record, key));
        template.insert(key.clone(), skeleton_rule(rule, key, child)?);
    }

    Ok(Value::Object(template))
}

fn skeleton_rule(rule: &Rule, key: &str, source: Option<&Value>) -> Result<Value, ConfigError> {
    match rule {
        Rule::Tuples(_) => Ok(Value::Null),
        Rule::Schema(nested) => skeleton(nested, source),
        Rule::Items(templates) if templates.is_empty() => Ok(Value::Null),
        Rule::Items(templates) => templates
            .iter()
            .enumerate()
            .map(|(index, template)| skeleton(template, source.map(|s| element(s, index))))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Rule::Dynamic(generate) => {
            let value = source.ok_or_else(|| ConfigError::missing_source(key))?;
            skeleton_rule(&generate(value), key, Some(value))
        }
    }
}
