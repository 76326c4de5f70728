//! Typed field extraction from JSON objects

use crate::error::ValidationError;
use serde_json::{Map, Value};

/// Borrow the payload as an object
pub(crate) fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload.as_object().ok_or_else(|| {
        ValidationError::InvalidFormat(format!("expected a JSON object, got {}", kind_of(payload)))
    })
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

pub(crate) fn required_str(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ValidationError> {
    required(obj, field)?
        .as_str()
        .map(str::to_owned)
        .ok_or(ValidationError::WrongType { field, expected: "a string" })
}

/// Integers are accepted and widened to f64
pub(crate) fn required_f64(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<f64, ValidationError> {
    required(obj, field)?
        .as_f64()
        .ok_or(ValidationError::WrongType { field, expected: "a number" })
}

pub(crate) fn required_bool(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<bool, ValidationError> {
    required(obj, field)?
        .as_bool()
        .ok_or(ValidationError::WrongType { field, expected: "a boolean" })
}

pub(crate) fn required_i64(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<i64, ValidationError> {
    required(obj, field)?
        .as_i64()
        .ok_or(ValidationError::WrongType { field, expected: "an integer" })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
