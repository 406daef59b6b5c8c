use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// A typed property value supplied in a render [`Context`](crate::Context).
///
/// Absence is not a variant: a property that is missing from the context
/// simply has no `Value`, and lookups return `None`.
///
/// # Example
///
/// ```
/// use streamfmt::Value;
///
/// let season: Value = 3.into();
/// let title: Value = "Show".into();
/// let cached: Value = true.into();
///
/// assert_eq!(season.to_string(), "3");
/// assert_eq!(title.to_string(), "Show");
/// assert_eq!(cached.to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean flag, rendered as `true` / `false`.
    Bool(bool),

    /// An integer number.
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),
}

/// The kind of a resolved property, with absence made explicit.
///
/// Comparison rules are defined over pairs of kinds rather than by coercing
/// values on the fly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    String,
    Boolean,
    Absent,
}

impl ValueKind {
    /// Returns the kind of an optional value.
    pub fn of(value: Option<&Value>) -> ValueKind {
        match value {
            None => ValueKind::Absent,
            Some(Value::Bool(_)) => ValueKind::Boolean,
            Some(Value::Number(_) | Value::Float(_)) => ValueKind::Number,
            Some(Value::String(_)) => ValueKind::String,
        }
    }
}

impl Value {
    /// Returns the kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        ValueKind::of(Some(self))
    }

    /// Get this value as an integer, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, if it is numeric.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Interprets this value as a number.
    ///
    /// Numbers are returned directly. Strings count as numeric when their
    /// trimmed text parses as a finite `f64`. Booleans are never numeric.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => parse_number(s),
            Value::Bool(_) => None,
        }
    }
}

/// Parses text as a finite number, ignoring surrounding whitespace.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Float(n as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        match i64::try_from(n) {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Float(n as f64),
        }
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
