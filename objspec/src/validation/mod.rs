//! The public validator.
//!
//! [`Validator::validate`] runs three passes over a record: schema
//! evaluation, the undeclared-key check and the optional object rules. Their
//! failures are collected into a [`ValidationResult`].


use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::config::ValidatorOptions;
use crate::engine::{Evaluator, Input};
use crate::errors::{ConfigError, Result};
use crate::schema::{skeleton, Schema};
use crate::tree::{
    diff_keys, filter_tree, merge_branches, merge_with_arrays, set_leaves_to, Branch, ResultTree,
};

/// Errors found by a validation, shaped like the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    /// Per-field errors.
    pub property: Branch,
    /// Whole-record errors, keyed by object rule name.
    pub object: Branch,
}

impl ValidationErrors {
    /// Returns true if neither tree holds an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.property.is_empty() && self.object.is_empty()
    }

    /// Rebuilds errors from their JSON form, e.g. a stored
    /// [`ValidationResult::to_json`] output's `errors` field.
    ///
    /// Missing `property` or `object` trees are read as empty.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let map = match value {
            Value::Null => return Err(ConfigError::ErrorsNotSpecified),
            Value::Object(map) => map,
            _ => return Err(ConfigError::ErrorsNotObject),
        };

        Ok(Self {
            property: branch_from(map.get("property"))?,
            object: branch_from(map.get("object"))?,
        })
    }
}

fn branch_from(value: Option<&Value>) -> Result<Branch, ConfigError> {
    match value {
        None | Some(Value::Null) => Ok(Branch::new()),
        Some(Value::Object(_)) => match value.cloned().map(ResultTree::from) {
            Some(ResultTree::Branch(branch)) => Ok(branch),
            _ => Err(ConfigError::ErrorsNotObject),
        },
        Some(_) => Err(ConfigError::ErrorsNotObject),
    }
}

/// The outcome of one validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no errors were found.
    pub is_valid: bool,
    /// The errors found.
    pub errors: ValidationErrors,
}

impl ValidationResult {
    fn from_errors(errors: ValidationErrors) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Serializes the result as `{"isValid": .., "errors": {..}}`.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Validates records against a schema and optional object rules.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
    object_rules: Option<Schema>,
    options: ValidatorOptions,
}

impl Validator {
    /// Creates a validator with default options.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            object_rules: None,
            options: ValidatorOptions::default(),
        }
    }

    /// Adds rules evaluated against the record as a whole. Each rule sees the
    /// full record as its value.
    #[must_use]
    pub fn with_object_rules(mut self, rules: Schema) -> Self {
        self.object_rules = Some(rules);
        self
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validates `input`.
    ///
    /// Failures are data in the returned result. Input that is not a record
    /// yields a single object error.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the schema cannot be expanded for
    /// this input.
    pub fn validate(&self, input: &Value) -> Result<ValidationResult> {
        let Value::Object(fields) = input else {
            let mut object = Branch::new();
            object.insert(
                self.options.invalid_object.property.clone(),
                ResultTree::Leaf(Value::String(self.options.invalid_object.message.clone())),
            );
            return Ok(ValidationResult::from_errors(ValidationErrors {
                property: Branch::new(),
                object,
            }));
        };

        let evaluator = Evaluator::standard(Arc::clone(&self.options.logger));

        let template = skeleton(&self.schema, Some(input))?;
        let record = merge_with_arrays(&template, input);
        let mut property = filter_tree(&evaluator.evaluate(&self.schema, Input::Record(&record)), &is_failure);

        if !self.options.additional_props.ignore {
            let additional = template
                .as_object()
                .map(|declared| diff_keys(declared, fields))
                .unwrap_or_default();

            if !additional.is_empty() {
                let stamped = set_leaves_to(&additional, &json!([self.options.additional_props.message]));
                if let ResultTree::Branch(stamped) = ResultTree::from(Value::Object(stamped)) {
                    property = merge_branches(&property, &stamped);
                }
            }
        }

        let object = match &self.object_rules {
            Some(rules) => object_errors(&evaluator, rules, &record),
            None => Branch::new(),
        };

        let result = ValidationResult::from_errors(ValidationErrors { property, object });
        tracing::debug!(
            is_valid = result.is_valid,
            property_errors = result.errors.property.len(),
            object_errors = result.errors.object.len(),
            "Validation finished"
        );

        Ok(result)
    }
}

/// Evaluates object rules with the whole record bound under every rule name.
fn object_errors(evaluator: &Evaluator, rules: &Schema, record: &Value) -> Branch {
    let access = |key: Option<&str>| -> Value {
        match key {
            Some(key) => {
                let mut scope = Map::new();
                scope.insert(key.to_string(), record.clone());
                Value::Object(scope)
            }
            None => Value::Object(rules.keys().map(|name| (name.clone(), Value::Null)).collect()),
        }
    };

    filter_tree(&evaluator.evaluate(rules, Input::Accessor(&access)), &is_failure)
}

fn is_failure(value: &Value) -> bool {
    value != &Value::Bool(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::predicates::{is_required, is_string};
    use crate::schema::{PredicateTuple, Rule};
    use crate::tree::branch_to_value;
    use pretty_assertions::assert_eq;

    fn name_schema() -> Schema {
        Schema::new().field(
            "name",
            Rule::tuples([PredicateTuple::unary(is_required(is_string), "name is a required string")]),
        )
    }

    #[test]
    fn test_valid_input() {
        let result = Validator::new(name_schema()).validate(&json!({"name": "foo"})).unwrap();

        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_missing_declared_key_is_evaluated() {
        let result = Validator::new(name_schema()).validate(&json!({})).unwrap();

        assert!(!result.is_valid);
        assert_eq!(
            branch_to_value(&result.errors.property),
            json!({"name": ["name is a required string"]})
        );
    }

    #[test]
    fn test_non_record_input() {
        for input in [json!(null), json!(false), json!("x"), json!([1])] {
            let result = Validator::new(name_schema()).validate(&input).unwrap();
            assert_eq!(
                result.to_json().unwrap(),
                json!({"isValid": false, "errors": {"property": {}, "object": {"validObject": "Invalid object."}}})
            );
        }
    }

    #[test]
    fn test_custom_invalid_object() {
        let validator = Validator::new(name_schema())
            .with_options(ValidatorOptions::new().with_invalid_object("shape", "Expected a record."));

        let result = validator.validate(&json!(7)).unwrap();
        assert_eq!(branch_to_value(&result.errors.object), json!({"shape": "Expected a record."}));
    }

    #[test]
    fn test_dynamic_rule_nested_in_items() {
        let schema = Schema::new().field(
            "outer",
            Rule::Items(vec![Schema::new().field("inner", Rule::each(name_schema()))]),
        );

        let result = Validator::new(schema).validate(&json!({"outer": [{"inner": [{"name": "x"}]}]}));
        assert!(result.unwrap().is_valid);
    }

    #[test]
    fn test_errors_from_value() {
        let errors = ValidationErrors::from_value(&json!({
            "property": {"name": ["required"]},
            "object": {}
        }))
        .unwrap();

        assert_eq!(branch_to_value(&errors.property), json!({"name": ["required"]}));
        assert!(errors.object.is_empty());

        let partial = ValidationErrors::from_value(&json!({"object": {"x": "y"}})).unwrap();
        assert!(partial.property.is_empty());
    }

    #[test]
    fn test_errors_from_value_rejects_bad_shapes() {
        assert_eq!(
            ValidationErrors::from_value(&Value::Null).unwrap_err(),
            ConfigError::ErrorsNotSpecified
        );
        assert_eq!(
            ValidationErrors::from_value(&json!("errors")).unwrap_err(),
            ConfigError::ErrorsNotObject
        );
        assert_eq!(
            ValidationErrors::from_value(&json!({"property": ["x"]})).unwrap_err(),
            ConfigError::ErrorsNotObject
        );
    }
}
