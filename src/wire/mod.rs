//! Conversion between the backend's wire shapes and the canonical models.
//!
//! The REST backend and the local store disagree on field spellings, id
//! types, amount signs and date precision. Everything entering the core
//! funnels through this module, and everything leaving it is re-encoded
//! here, so the rest of the crate only ever sees canonical rows.
//!
//! Normalization never raises for a malformed record: lists drop the record,
//! single records become `None`.

pub mod account;
pub mod envelope;
pub mod transaction;

use serde_json::Value;

/// Coerce a JSON scalar into an id string.
///
/// The REST backend uses numeric ids, the local store strings; both end up
/// as opaque strings in canonical rows.
pub(crate) fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Coerce a JSON scalar into a number, accepting numeric strings.
pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Extract a trimmed, non-empty string.
pub(crate) fn non_empty_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
        _ => None,
    }
}

/// Unwrap a write echo that nests the entity under `key`, e.g.
/// `{"account": {...}}`. Responses that carry the entity directly pass
/// through unchanged.
pub(crate) fn unwrap_entity<'a>(value: &'a Value, key: &str) -> &'a Value {
    value.get(key).unwrap_or(value)
}
