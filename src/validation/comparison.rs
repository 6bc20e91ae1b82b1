//! Comparison operators and coercive value comparison
//!
//! Two values compare:
//! - numerically, when both convert to a number
//! - temporally, when either is a datetime or duration and both convert
//! - lexicographically on their string forms otherwise
//!
//! Null equals only null and is unordered against everything else.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use super::errors::{SchemaError, SchemaResult};
use super::result::ResultCode;
use crate::value::Value;

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Regular-expression search on the string form
    Like,
}

impl CompareOp {
    /// Parses an operator name or symbol, case-insensitively.
    pub fn parse(text: &str) -> SchemaResult<Self> {
        match text.trim().to_ascii_uppercase().as_str() {
            "EQ" | "=" | "==" => Ok(CompareOp::Eq),
            "NE" | "!=" | "<>" => Ok(CompareOp::Ne),
            "LT" | "<" => Ok(CompareOp::Lt),
            "LE" | "<=" => Ok(CompareOp::Le),
            "GT" | ">" => Ok(CompareOp::Gt),
            "GE" | ">=" => Ok(CompareOp::Ge),
            "LIKE" => Ok(CompareOp::Like),
            _ => Err(SchemaError::InvalidOperator(text.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "EQ",
            CompareOp::Ne => "NE",
            CompareOp::Lt => "LT",
            CompareOp::Le => "LE",
            CompareOp::Gt => "GT",
            CompareOp::Ge => "GE",
            CompareOp::Like => "LIKE",
        }
    }

    /// Result code reported when this comparison fails.
    pub fn failure_code(&self) -> ResultCode {
        match self {
            CompareOp::Eq => ResultCode::NotEq,
            CompareOp::Ne => ResultCode::NotNe,
            CompareOp::Lt => ResultCode::NotLt,
            CompareOp::Le => ResultCode::NotLe,
            CompareOp::Gt => ResultCode::NotGt,
            CompareOp::Ge => ResultCode::NotGe,
            CompareOp::Like => ResultCode::NotLike,
        }
    }
}

impl FromStr for CompareOp {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiles a LIKE pattern.
pub fn compile_pattern(pattern: &str) -> SchemaResult<Regex> {
    Regex::new(pattern).map_err(|e| SchemaError::invalid_pattern(pattern, e.to_string()))
}

/// Coercive comparison of values.
pub struct ObjectComparator;

impl ObjectComparator {
    /// Orders two values, or `None` if they are unordered.
    pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
        if a.is_null() || b.is_null() {
            return if a.is_null() && b.is_null() {
                Some(Ordering::Equal)
            } else {
                None
            };
        }

        if let (Some(x), Some(y)) = (a.to_nullable_double(), b.to_nullable_double()) {
            return x.partial_cmp(&y);
        }

        if matches!(a, Value::DateTime(_)) || matches!(b, Value::DateTime(_)) {
            if let (Some(x), Some(y)) = (a.to_nullable_datetime(), b.to_nullable_datetime()) {
                return Some(x.cmp(&y));
            }
        }

        if matches!(a, Value::Duration(_)) || matches!(b, Value::Duration(_)) {
            if let (Some(x), Some(y)) = (a.to_nullable_duration(), b.to_nullable_duration()) {
                return Some(x.cmp(&y));
            }
        }

        Some(a.to_string().cmp(&b.to_string()))
    }

    /// Coercive equality: `1`, `1.0` and `"1"` are equal.
    pub fn are_equal(a: &Value, b: &Value) -> bool {
        a == b || Self::compare(a, b) == Some(Ordering::Equal)
    }

    /// Returns true if the string form of `value` contains a match.
    pub fn is_like(value: &Value, pattern: &Regex) -> bool {
        match value.to_nullable_string() {
            Some(text) => pattern.is_match(&text),
            None => false,
        }
    }

    /// Applies `op` to two values. LIKE treats `b` as a pattern compiled on
    /// the fly; an invalid pattern never matches.
    pub fn evaluate(a: &Value, op: CompareOp, b: &Value) -> bool {
        match op {
            CompareOp::Eq => Self::are_equal(a, b),
            CompareOp::Ne => !Self::are_equal(a, b),
            CompareOp::Lt => Self::compare(a, b) == Some(Ordering::Less),
            CompareOp::Le => matches!(
                Self::compare(a, b),
                Some(Ordering::Less | Ordering::Equal)
            ),
            CompareOp::Gt => Self::compare(a, b) == Some(Ordering::Greater),
            CompareOp::Ge => matches!(
                Self::compare(a, b),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            CompareOp::Like => b
                .to_nullable_string()
                .and_then(|pattern| Regex::new(&pattern).ok())
                .map(|regex| Self::is_like(a, &regex))
                .unwrap_or(false),
        }
    }
}
