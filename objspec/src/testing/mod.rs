//! Testing utilities for schemas and validators.
//!
//! This module provides:
//! - Assertions over validation results
//! - Sample schemas, object rules and records

mod assertions;
mod fixtures;

pub use assertions::{
    assert_invalid, assert_no_property_errors, assert_object_error, assert_property_error,
    assert_valid,
};
pub use fixtures::{
    address_schema, item_schema, items_schema, user_rules, user_schema, valid_user,
};
