//! Finds keys present in a candidate record but absent from a reference.

use serde_json::{Map, Value};

/// Returns every key of `candidate` that `reference` does not have, with its
/// value.
///
/// Keys present in both are only descended into when both values are
/// mappings, and the nested difference is reported only if non-empty. Values
/// are never compared, so a key whose type differs is not a difference.
#[must_use]
pub fn diff_keys(reference: &Map<String, Value>, candidate: &Map<String, Value>) -> Map<String, Value> {
    let mut additional = Map::new();

    for (key, value) in candidate {
        match (reference.get(key), value) {
            (None, _) => {
                additional.insert(key.clone(), value.clone());
            }
            (Some(Value::Object(expected)), Value::Object(actual)) => {
                let nested = diff_keys(expected, actual);
                if !nested.is_empty() {
                    additional.insert(key.clone(), Value::Object(nested));
                }
            }
            _ => {}
        }
    }

    additional
}
