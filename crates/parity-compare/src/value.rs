//! Scalar and kind helpers over the `serde_json::Value` tree model

use serde_json::{Number, Value};
use std::fmt;

/// A single scalar leaf with an explicit primitive type
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Parse a text leaf into the most specific scalar it unambiguously denotes.
    ///
    /// Patterns are tried in order: `-?[0-9]+` (integer), `-?[0-9]+.[0-9]+`
    /// (float), then a case-insensitive `true`/`false` (boolean). Anything
    /// else, including scientific notation, thousands separators, a leading
    /// `+` or integers too wide for 64 bits, stays text.
    ///
    /// Digits are ASCII only; non-ASCII decimal digits such as `"١٢"` stay
    /// text.
    pub fn parse(text: &str) -> Self {
        if is_integer_literal(text) {
            if let Ok(n) = text.parse::<i64>() {
                return Scalar::Integer(n);
            }
            if let Ok(n) = text.parse::<u64>() {
                return Scalar::Unsigned(n);
            }
            return Scalar::Text(text.to_string());
        }

        if is_float_literal(text) {
            return match text.parse::<f64>() {
                Ok(f) if f.is_finite() => Scalar::Float(f),
                _ => Scalar::Text(text.to_string()),
            };
        }

        if text.eq_ignore_ascii_case("true") {
            return Scalar::Bool(true);
        }
        if text.eq_ignore_ascii_case("false") {
            return Scalar::Bool(false);
        }

        Scalar::Text(text.to_string())
    }

    /// Kind tag of this scalar
    pub fn kind(&self) -> ValueKind {
        match self {
            Scalar::Null => ValueKind::Null,
            Scalar::Bool(_) => ValueKind::Boolean,
            Scalar::Integer(_) | Scalar::Unsigned(_) => ValueKind::Integer,
            Scalar::Float(_) => ValueKind::Float,
            Scalar::Text(_) => ValueKind::Text,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Integer(n) => Value::Number(n.into()),
            Scalar::Unsigned(n) => Value::Number(n.into()),
            Scalar::Float(f) => match Number::from_f64(f) {
                Some(n) => Value::Number(n),
                None => Value::Null,
            },
            Scalar::Text(s) => Value::String(s),
        }
    }
}

/// `-?[0-9]+`
fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?[0-9]+\.[0-9]+`
fn is_float_literal(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    match body.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && !frac.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Primitive kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    Text,
    Sequence,
    Mapping,
}

impl ValueKind {
    /// Classify a tree node
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::Text,
            Value::Array(_) => ValueKind::Sequence,
            Value::Object(_) => ValueKind::Mapping,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
