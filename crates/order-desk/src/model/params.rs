//! Raw field values as they arrive from forms and JSON bodies.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A submitted value before validation.
///
/// Form posts only ever produce `Text`; JSON bodies may carry real numbers, or anything else
/// JSON can express. Validation decides what a value means, so nothing here rejects input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    /// Booleans, arrays and objects. Never a usable attribute value.
    Other(serde_json::Value),
}

/// Why a value is not a usable integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    NotANumber,
    NotAnInteger,
}

impl NumericError {
    pub fn reason(self) -> &'static str {
        match self {
            NumericError::NotANumber => "is not a number",
            NumericError::NotAnInteger => "must be an integer",
        }
    }
}

impl FieldValue {
    /// Missing in all but name: empty or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.trim().is_empty())
    }

    /// A number or a string, the only shapes an attribute can hold.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, FieldValue::Other(_))
    }

    /// Interprets the value as an integer.
    ///
    /// Text must be an optionally signed run of digits; anything else that still parses as a
    /// finite number (`"5.5"`, `"1e3"`) is `NotAnInteger`. Digit runs too long for `i64`
    /// saturate, so range checks downstream still reject them.
    pub fn to_integer(&self) -> Result<i64, NumericError> {
        match self {
            FieldValue::Integer(value) => Ok(*value),
            FieldValue::Decimal(value) if value.is_finite() => Err(NumericError::NotAnInteger),
            FieldValue::Decimal(_) => Err(NumericError::NotANumber),
            FieldValue::Text(text) => parse_integer(text.trim()),
            FieldValue::Other(_) => Err(NumericError::NotANumber),
        }
    }
}

fn parse_integer(text: &str) -> Result<i64, NumericError> {
    let digits = text.strip_prefix(|c| c == '+' || c == '-').unwrap_or(text);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(text.parse::<i64>().unwrap_or(if text.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }));
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Err(NumericError::NotAnInteger),
        _ => Err(NumericError::NotANumber),
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Decimal(value) => write!(f, "{}", value),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(value.into())
    }
}
