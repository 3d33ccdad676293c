//! Runtime JSON decoding of client-supplied expression trees.
//!
//! The wire form mirrors [`Expression`] one node at a time. Every node is an
//! object whose `"type"` member names its kind.
//!
//! # Quick Start
//!
//! ```
//! use sqlapi::prelude::*;
//!
//! let expr = parse_expression(r#"{
//!     "type": "Equals",
//!     "column": {"type": "Column", "name": "material"},
//!     "value": {"type": "StringValue", "value": "steel"}
//! }"#).unwrap();
//!
//! assert_eq!(expr, equals("material", "steel"));
//! ```
//!
//! # Node Kinds
//!
//! | `type` | Members |
//! |--------|---------|
//! | `Column` | `name`: string |
//! | `And` / `Or` | `left`, `right`: node |
//! | `Between` | `column`: `Column` node, `lower`, `upper`: integer |
//! | `Parenthesis` | `inner`: node |
//! | `Equals` | `column`: `Column` node, `value`: value node |
//! | `StringValue` | `value`: string |
//! | `IntegerValue` | `value`: integer |
//!
//! A node kind outside this table is reported as
//! [`ErrorKind::UnsupportedExpression`] (or [`ErrorKind::UnsupportedValue`]
//! in value position), so the caller can tell "not in our grammar" apart
//! from malformed JSON.

use super::types::{Column, Expression, Value};
use crate::error::{Error, ErrorKind, Step};
use miniserde::json::{Number, Object, Value as JsonValue};

/// Maximum nesting depth accepted while decoding.
pub const MAX_DECODE_DEPTH: usize = 128;

/// Decode an expression tree from a JSON string.
///
/// This is a convenience function that calls [`Expression::parse`].
///
/// # Errors
///
/// Returns an [`Error`] if the JSON is invalid or does not describe a
/// supported expression.
pub fn parse_expression(json_str: &str) -> Result<Expression, Error> {
    Expression::parse(json_str)
}

/// Decode an expression tree from JSON bytes.
///
/// Convenience function for raw request bodies.
///
/// ```
/// use sqlapi::prelude::*;
///
/// let body = br#"{"type": "Column", "name": "weight"}"#;
/// assert_eq!(parse_expression_bytes(body).unwrap(), column("weight"));
/// ```
pub fn parse_expression_bytes(bytes: &[u8]) -> Result<Expression, Error> {
    Expression::parse_bytes(bytes)
}

impl Expression {
    /// Decode an expression tree from a JSON string.
    ///
    /// Nesting is capped at [`MAX_DECODE_DEPTH`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the JSON is invalid or malformed.
    pub fn parse(json_str: &str) -> Result<Self, Error> {
        Self::parse_with_max_depth(json_str, Some(MAX_DECODE_DEPTH))
    }

    /// Decode an expression tree from a JSON string with a caller-chosen
    /// nesting limit, `None` for unlimited.
    ///
    /// ```
    /// use sqlapi::{ErrorKind, Expression};
    ///
    /// let json = r#"{"type": "Parenthesis", "inner": {"type": "Column", "name": "a"}}"#;
    /// assert!(Expression::parse_with_max_depth(json, Some(1)).is_ok());
    ///
    /// let err = Expression::parse_with_max_depth(json, Some(0)).unwrap_err();
    /// assert_eq!(err.kind(), &ErrorKind::NestingTooDeep { max: 0 });
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the JSON is invalid, malformed, or nested
    /// deeper than `max_depth`.
    pub fn parse_with_max_depth(json_str: &str, max_depth: Option<usize>) -> Result<Self, Error> {
        let json: JsonValue =
            miniserde::json::from_str(json_str).map_err(|_| Error::new(ErrorKind::InvalidJson))?;
        decode_expression(&json, 0, max_depth)
    }

    /// Decode an expression tree from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the bytes are not valid UTF-8 or valid JSON.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::parse_bytes_with_max_depth(bytes, Some(MAX_DECODE_DEPTH))
    }

    /// Byte-slice form of [`parse_with_max_depth`](Self::parse_with_max_depth).
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the bytes are not valid UTF-8 or valid JSON,
    /// or the tree is nested deeper than `max_depth`.
    pub fn parse_bytes_with_max_depth(
        bytes: &[u8],
        max_depth: Option<usize>,
    ) -> Result<Self, Error> {
        let s = std::str::from_utf8(bytes).map_err(|_| Error::new(ErrorKind::InvalidJson))?;
        Self::parse_with_max_depth(s, max_depth)
    }

    /// Decode an expression tree from an already parsed JSON value.
    ///
    /// For most cases, prefer [`parse`](Self::parse) or [`parse_bytes`](Self::parse_bytes).
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the JSON structure is invalid.
    pub fn from_json(json: &JsonValue) -> Result<Self, Error> {
        decode_expression(json, 0, Some(MAX_DECODE_DEPTH))
    }
}

impl Value {
    /// Decode a value node (`StringValue` or `IntegerValue`).
    ///
    /// ```
    /// use sqlapi::Value;
    ///
    /// let json: miniserde::json::Value =
    ///     miniserde::json::from_str(r#"{"type": "IntegerValue", "value": 42}"#).unwrap();
    /// assert_eq!(Value::from_json(&json), Ok(Value::Integer(42)));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the node is malformed or of another kind.
    pub fn from_json(json: &JsonValue) -> Result<Self, Error> {
        let obj = expect_object(json)?;
        match node_type(obj)? {
            "StringValue" => match member(obj, "value")? {
                JsonValue::String(s) => Ok(Self::String(s.clone())),
                _ => Err(invalid("value", "a string")),
            },
            "IntegerValue" => integer_member(obj, "value").map(Self::Integer),
            other => Err(Error::new(ErrorKind::UnsupportedValue(other.to_string()))),
        }
    }
}

impl Column {
    /// Decode a `Column` node.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the node is not a well-formed `Column`.
    pub fn from_json(json: &JsonValue) -> Result<Self, Error> {
        let obj = expect_object(json)?;
        if node_type(obj)? != "Column" {
            return Err(invalid("column", "a Column node"));
        }
        match member(obj, "name")? {
            JsonValue::String(name) => Ok(Self::new(name.clone())),
            _ => Err(invalid("name", "a string")),
        }
    }
}

fn decode_expression(
    json: &JsonValue,
    depth: usize,
    max_depth: Option<usize>,
) -> Result<Expression, Error> {
    if let Some(max) = max_depth.filter(|max| depth > *max) {
        return Err(Error::new(ErrorKind::NestingTooDeep { max }));
    }

    let obj = expect_object(json)?;
    let child = |key: &'static str, step: Step| -> Result<Box<Expression>, Error> {
        let json = member(obj, key).map_err(|e| e.within(step))?;
        decode_expression(json, depth + 1, max_depth)
            .map(Box::new)
            .map_err(|e| e.within(step))
    };

    match node_type(obj)? {
        "Column" => Column::from_json(json).map(Expression::Column),
        "And" => Ok(Expression::And {
            left: child("left", Step::AndLeft)?,
            right: child("right", Step::AndRight)?,
        }),
        // Decoded as-is; rejecting it is the processor's job.
        "Or" => Ok(Expression::Or {
            left: child("left", Step::OrLeft)?,
            right: child("right", Step::OrRight)?,
        }),
        "Between" => {
            let column = member(obj, "column")
                .and_then(Column::from_json)
                .map_err(|e| e.within(Step::BetweenColumn))?;
            let lower =
                integer_member(obj, "lower").map_err(|e| e.within(Step::BetweenLower))?;
            let upper =
                integer_member(obj, "upper").map_err(|e| e.within(Step::BetweenUpper))?;
            Ok(Expression::Between {
                column,
                lower,
                upper,
            })
        },
        "Parenthesis" => Ok(Expression::Parenthesis(child(
            "inner",
            Step::ParenthesisInner,
        )?)),
        "Equals" => {
            let column = member(obj, "column")
                .and_then(Column::from_json)
                .map_err(|e| e.within(Step::EqualsColumn))?;
            let value = member(obj, "value")
                .and_then(Value::from_json)
                .map_err(|e| e.within(Step::EqualsValue))?;
            Ok(Expression::Equals { column, value })
        },
        other => Err(Error::new(ErrorKind::UnsupportedExpression(
            other.to_string(),
        ))),
    }
}

fn expect_object(json: &JsonValue) -> Result<&Object, Error> {
    match json {
        JsonValue::Object(obj) => Ok(obj),
        _ => Err(Error::new(ErrorKind::ExpectedObject)),
    }
}

fn member<'a>(obj: &'a Object, key: &'static str) -> Result<&'a JsonValue, Error> {
    obj.get(key)
        .ok_or_else(|| Error::new(ErrorKind::MissingField(key)))
}

fn node_type(obj: &Object) -> Result<&str, Error> {
    match member(obj, "type")? {
        JsonValue::String(s) => Ok(s.as_str()),
        _ => Err(invalid("type", "a string")),
    }
}

fn integer_member(obj: &Object, key: &'static str) -> Result<i64, Error> {
    match member(obj, key)? {
        JsonValue::Number(Number::I64(i)) => Ok(*i),
        JsonValue::Number(Number::U64(u)) => {
            i64::try_from(*u).map_err(|_| invalid(key, "a 64-bit signed integer"))
        },
        _ => Err(invalid(key, "an integer")),
    }
}

const fn invalid(field: &'static str, expected: &'static str) -> Error {
    Error::new(ErrorKind::InvalidField { field, expected })
}
