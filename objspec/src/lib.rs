//! # Objspec
//!
//! Schema-driven validation of nested records.
//!
//! A schema maps field names to rules: predicate tuples pairing a check with
//! an error message, nested schemas, positional item templates, or rules
//! generated from the value itself. Validation walks the record and reports:
//!
//! - **Property errors**: failing fields, shaped like the input
//! - **Undeclared keys**: keys the schema does not mention
//! - **Object errors**: failing cross-field rules over the whole record
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use objspec::prelude::*;
//! use objspec::schema::predicates::{is_required, is_string};
//!
//! let schema = Schema::new()
//!     .field("forename", Rule::tuples([PredicateTuple::unary(is_required(is_string), "forename is required")]))
//!     .field("surname", Rule::tuples([PredicateTuple::unary(is_required(is_string), "surname is required")]));
//!
//! let rules = Schema::new().field(
//!     "forenameCannotEqualSurname",
//!     Rule::tuples([PredicateTuple::unary(
//!         |user: &Value| user["forename"] != user["surname"],
//!         "forename cannot equal surname",
//!     )]),
//! );
//!
//! let result = Validator::new(schema)
//!     .with_object_rules(rules)
//!     .validate(&json!({"forename": "Ada", "surname": "Ada"}))?;
//!
//! assert!(!result.is_valid);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod engine;
pub mod errors;
pub mod formatters;
pub mod observability;
pub mod schema;
pub mod testing;
pub mod tree;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{AdditionalPropsOptions, InvalidObjectOptions, ValidatorOptions};
    pub use crate::engine::{Evaluator, Input, Verdict};
    pub use crate::errors::{ConfigError, ObjspecError, Result};
    pub use crate::formatters::{error_per_message, error_per_property, FormattedErrors};
    pub use crate::observability::{
        CollectingLogger, EventStage, EventType, NoOpLogger, TraceEvent, TracingLogger,
        ValidationLogger,
    };
    pub use crate::schema::{Message, PredicateTuple, Rule, Schema};
    pub use crate::tree::{Branch, ResultTree};
    pub use crate::validation::{ValidationErrors, ValidationResult, Validator};
    pub use serde_json::{json, Value};
}
