//! Sample schemas and records.

use serde_json::{json, Value};

use crate::schema::predicates::{is_integer, is_optional, is_required, is_string, min_length};
use crate::schema::{PredicateTuple, Rule, Schema};

/// A postal address: required street, optional city.
#[must_use]
pub fn address_schema() -> Schema {
    Schema::new()
        .field(
            "street",
            Rule::tuples([PredicateTuple::unary(is_required(is_string), "street is required")]),
        )
        .field(
            "city",
            Rule::tuples([PredicateTuple::unary(is_optional(is_string), "city must be a string")]),
        )
}

/// A user with names, an optional age and a nested [`address_schema`].
#[must_use]
pub fn user_schema() -> Schema {
    Schema::new()
        .field(
            "forename",
            Rule::tuples([PredicateTuple::unary(is_required(is_string), "forename is required")]),
        )
        .field(
            "surname",
            Rule::tuples([
                PredicateTuple::unary(is_required(is_string), "surname is required"),
                PredicateTuple::unary(min_length(2), "surname is too short"),
            ]),
        )
        .field(
            "age",
            Rule::tuples([PredicateTuple::unary(is_optional(is_integer), "age must be a whole number")]),
        )
        .field("address", address_schema())
}

/// Object rules for [`user_schema`]: forename and surname must differ.
#[must_use]
pub fn user_rules() -> Schema {
    Schema::new().field(
        "forenameCannotEqualSurname",
        Rule::tuples([PredicateTuple::unary(
            |user: &Value| user.get("forename") != user.get("surname"),
            "forename cannot equal surname",
        )]),
    )
}

/// A record that satisfies [`user_schema`] and [`user_rules`].
#[must_use]
pub fn valid_user() -> Value {
    json!({
        "forename": "Ada",
        "surname": "Lovelace",
        "age": 36,
        "address": {"street": "St James's Square", "city": "London"}
    })
}

/// One element of [`items_schema`].
#[must_use]
pub fn item_schema() -> Schema {
    Schema::new().field(
        "name",
        Rule::tuples([PredicateTuple::unary(is_required(is_string), "name is a required string")]),
    )
}

/// A collection validated element by element against [`item_schema`].
#[must_use]
pub fn items_schema() -> Schema {
    Schema::new().field("specs", Rule::each(item_schema()))
}
