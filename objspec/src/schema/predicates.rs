//! Primitive predicates for building predicate tuples.
//!
//! Plain checks have the signature `fn(&Value) -> bool` and can be handed to
//! [`PredicateTuple::unary`](super::PredicateTuple::unary). The wrappers
//! [`is_required`] and [`is_optional`] decide how missing values are treated.

use regex::Regex;
use serde_json::Value;

use crate::errors::ConfigError;

/// True for `null`, which is also how absent fields are read.
pub fn is_nil(value: &Value) -> bool {
    value.is_null()
}

/// True for an empty string, sequence or mapping. `null` is not empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// True for strings.
pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// True for numbers.
pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

/// True for numbers without a fractional part.
pub fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0),
        _ => false,
    }
}

/// True for booleans.
pub fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}

/// True for sequences.
pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

/// True for mappings.
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

/// Fails nil and empty values, otherwise defers to `predicate`.
pub fn is_required<P>(predicate: P) -> impl Fn(&Value) -> bool + Send + Sync + 'static
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
{
    move |value| !is_nil(value) && !is_empty(value) && predicate(value)
}

/// Passes nil values, otherwise defers to `predicate`.
pub fn is_optional<P>(predicate: P) -> impl Fn(&Value) -> bool + Send + Sync + 'static
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
{
    move |value| is_nil(value) || predicate(value)
}

/// Passes strings matching `pattern`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPattern`] if the pattern does not compile.
pub fn matches(pattern: &str) -> Result<impl Fn(&Value) -> bool + Send + Sync + 'static, ConfigError> {
    let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    Ok(move |value: &Value| value.as_str().is_some_and(|s| regex.is_match(s)))
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Passes strings or sequences with at least `min` characters or elements.
pub fn min_length(min: usize) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    move |value| length(value).is_some_and(|len| len >= min)
}

/// Passes strings or sequences with at most `max` characters or elements.
pub fn max_length(max: usize) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    move |value| length(value).is_some_and(|len| len <= max)
}

/// Passes when the value equals the sibling field `key`.
///
/// Meant for [`PredicateTuple::new`](super::PredicateTuple::new), which hands
/// the enclosing record to the predicate.
pub fn equals_sibling(key: impl Into<String>) -> impl Fn(&Value, &Value) -> bool + Send + Sync + 'static {
    let key = key.into();
    move |value, siblings| siblings.get(&key).unwrap_or(&Value::Null) == value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!([])));
        assert!(is_empty(&json!({})));
        assert!(!is_empty(&json!(null)));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(false)));
        assert!(!is_empty(&json!("x")));
    }

    #[test]
    fn test_is_integer() {
        assert!(is_integer(&json!(3)));
        assert!(is_integer(&json!(-3)));
        assert!(is_integer(&json!(3.0)));
        assert!(!is_integer(&json!(3.5)));
        assert!(!is_integer(&json!("3")));
    }

    #[test]
    fn test_is_required() {
        assert!(!is_required(is_boolean)(&json!(null)));
        assert!(is_required(is_boolean)(&json!(false)));
        assert!(is_required(is_boolean)(&json!(true)));
        assert!(!is_required(is_boolean)(&json!("")));
        assert!(!is_required(is_string)(&json!("")));
        assert!(is_required(is_string)(&json!("foo")));
        assert!(!is_required(is_string)(&json!(false)));
        assert!(!is_required(is_array)(&json!([])));
        assert!(is_required(is_array)(&json!([0])));
        assert!(!is_required(is_object)(&json!({})));
        assert!(is_required(is_object)(&json!({"foo": "bar"})));
    }

    #[test]
    fn test_is_optional() {
        assert!(is_optional(is_boolean)(&json!(null)));
        assert!(is_optional(is_boolean)(&json!(false)));
        assert!(!is_optional(is_boolean)(&json!("")));
        assert!(is_optional(is_string)(&json!("")));
        assert!(is_optional(is_object)(&json!({})));
        assert!(is_optional(is_array)(&json!([])));
        assert!(!is_optional(is_string)(&json!(false)));
    }

    #[test]
    fn test_matches() {
        let is_code = matches(r"^[A-Z]{3}-\d+$").unwrap();
        assert!(is_code(&json!("ABC-12")));
        assert!(!is_code(&json!("abc-12")));
        assert!(!is_code(&json!(12)));
    }

    #[test]
    fn test_matches_rejects_invalid_pattern() {
        let err = matches("(unclosed").err().unwrap();
        assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_length_bounds() {
        assert!(min_length(3)(&json!("héllo")));
        assert!(!min_length(6)(&json!("héllo")));
        assert!(max_length(2)(&json!([1, 2])));
        assert!(!max_length(1)(&json!([1, 2])));
        assert!(!min_length(0)(&json!(5)));
    }

    #[test]
    fn test_equals_sibling() {
        let same_as_password = equals_sibling("password");
        let record = json!({"password": "fooBar", "repeat": "fooBar"});

        assert!(same_as_password(&json!("fooBar"), &record));
        assert!(!same_as_password(&json!("other"), &record));
        assert!(!same_as_password(&json!("x"), &json!(null)));
    }
}
