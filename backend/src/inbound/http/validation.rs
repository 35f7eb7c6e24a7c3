//! Shared validation helpers for inbound HTTP adapters.
//!
//! Write endpoints take the raw body and pull fields out of a JSON object
//! one at a time, so the first missing or malformed field (in the order
//! each handler asks for them) is the one reported. Numbers may arrive as
//! JSON numbers or numeric strings.

use std::str::FromStr;

use serde_json::{Map, Value, json};

use crate::domain::Error;

/// Message returned when a write endpoint receives no usable JSON object.
pub(crate) const NO_INPUT: &str = "No input data provided";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidType,
    TooLong,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidType => "invalid_type",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    ValidationError::new(field, format!("Missing required field: {}", field.as_str()))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_type_error(field: FieldName, expected: &str) -> Error {
    ValidationError::new(field, format!("{} must be {expected}", field.as_str()))
        .with_code(ErrorCode::InvalidType)
}

pub(crate) fn too_long_error(field: FieldName, max: usize) -> Error {
    ValidationError::new(
        field,
        format!("{} must be at most {max} characters", field.as_str()),
    )
    .with_code(ErrorCode::TooLong)
}

pub(crate) fn invalid_value_error(field: FieldName, message: impl Into<String>) -> Error {
    ValidationError::new(field, message).with_code(ErrorCode::InvalidValue)
}

/// Parse a request body into a non-empty JSON object.
pub(crate) fn parse_json_object(body: &[u8]) -> Result<Map<String, Value>, Error> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(Error::invalid_request(NO_INPUT)),
    }
}

/// Fetch a field, treating `null` as absent.
fn present(object: &Map<String, Value>, field: FieldName) -> Result<&Value, Error> {
    match object.get(field.as_str()) {
        None | Some(Value::Null) => Err(missing_field_error(field)),
        Some(value) => Ok(value),
    }
}

pub(crate) fn require_str(object: &Map<String, Value>, field: FieldName) -> Result<String, Error> {
    present(object, field)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| invalid_type_error(field, "a string"))
}

pub(crate) fn require_f64(object: &Map<String, Value>, field: FieldName) -> Result<f64, Error> {
    let value = match present(object, field)? {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    value
        .filter(|number| number.is_finite())
        .ok_or_else(|| invalid_type_error(field, "a number"))
}

/// Integers accept JSON floats by truncation toward zero; strings must hold
/// an integer literal.
pub(crate) fn require_i32(object: &Map<String, Value>, field: FieldName) -> Result<i32, Error> {
    let value = match present(object, field)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(truncate)),
        Value::String(raw) => raw.trim().parse::<i64>().ok(),
        _ => None,
    };
    value
        .and_then(|wide| i32::try_from(wide).ok())
        .ok_or_else(|| invalid_type_error(field, "an integer"))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "out-of-range values saturate and are rejected by the i32 conversion"
)]
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// Parse an optional query value, ignoring values that do not parse.
pub(crate) fn lenient<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|value| value.trim().parse().ok())
}

/// Decoded query-string pairs. A repeated key resolves to its first value.
pub(crate) type QueryPairs = [(String, String)];

/// Return the first value given for `key`.
pub(crate) fn first_value(pairs: &QueryPairs, key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    const FIELD: FieldName = FieldName::new("price");

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::empty_object(b"{}".as_slice())]
    #[case::array(b"[1, 2]".as_slice())]
    #[case::malformed(b"{\"title\":".as_slice())]
    fn rejects_unusable_bodies(#[case] body: &[u8]) {
        let err = parse_json_object(body).expect_err("no input");
        assert_eq!(err.message(), NO_INPUT);
        assert_eq!(err.code(), DomainCode::InvalidRequest);
    }

    #[rstest]
    #[case::absent(json!({"other": 1}))]
    #[case::null(json!({"price": null}))]
    fn missing_and_null_fields_are_reported_as_missing(#[case] body: Value) {
        let err = require_f64(&object(body), FIELD).expect_err("missing");
        assert_eq!(err.message(), "Missing required field: price");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "price", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case::number(json!({"price": 499.5}), 499.5)]
    #[case::integer(json!({"price": 500}), 500.0)]
    #[case::string(json!({"price": " 12.25 "}), 12.25)]
    fn floats_accept_numbers_and_numeric_strings(#[case] body: Value, #[case] expected: f64) {
        assert_eq!(require_f64(&object(body), FIELD).expect("number"), expected);
    }

    #[rstest]
    #[case::word(json!({"price": "cheap"}))]
    #[case::boolean(json!({"price": true}))]
    #[case::nan(json!({"price": "NaN"}))]
    fn floats_reject_non_numeric_values(#[case] body: Value) {
        let err = require_f64(&object(body), FIELD).expect_err("not a number");
        assert_eq!(err.message(), "price must be a number");
    }

    #[rstest]
    #[case::integer(json!({"duration": 7}), 7)]
    #[case::float_truncates(json!({"duration": 7.9}), 7)]
    #[case::negative_float(json!({"duration": -2.5}), -2)]
    #[case::string(json!({"duration": "14"}), 14)]
    fn integers_accept_numbers_and_integer_strings(#[case] body: Value, #[case] expected: i32) {
        let field = FieldName::new("duration");
        assert_eq!(require_i32(&object(body), field).expect("integer"), expected);
    }

    #[rstest]
    #[case::fractional_string(json!({"duration": "7.5"}))]
    #[case::too_large(json!({"duration": 3_000_000_000_i64}))]
    #[case::array(json!({"duration": [7]}))]
    fn integers_reject_other_values(#[case] body: Value) {
        let field = FieldName::new("duration");
        let err = require_i32(&object(body), field).expect_err("not an integer");
        assert_eq!(err.message(), "duration must be an integer");
    }

    #[rstest]
    fn strings_reject_numbers() {
        let field = FieldName::new("title");
        let err = require_str(&object(json!({"title": 5})), field).expect_err("not a string");
        assert_eq!(err.message(), "title must be a string");
    }

    #[rstest]
    #[case(Some("12"), Some(12))]
    #[case(Some(" 3 "), Some(3))]
    #[case(Some("abc"), None)]
    #[case(Some("1.5"), None)]
    #[case(None, None)]
    fn lenient_ignores_unparseable_values(#[case] raw: Option<&str>, #[case] expected: Option<i64>) {
        assert_eq!(lenient::<i64>(raw), expected);
    }

    #[rstest]
    #[case::first_wins("page", Some("1"))]
    #[case::single("limit", Some("5"))]
    #[case::absent("search", None)]
    fn first_value_takes_earliest_occurrence(#[case] key: &str, #[case] expected: Option<&str>) {
        let pairs = [
            ("page".to_owned(), "1".to_owned()),
            ("limit".to_owned(), "5".to_owned()),
            ("page".to_owned(), "2".to_owned()),
        ];

        assert_eq!(first_value(&pairs, key).as_deref(), expected);
    }
}
