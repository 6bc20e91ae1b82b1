//! Validation results

use std::fmt;

use serde::Serialize;

use crate::value::Value;

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultSeverity {
    Information,
    Warning,
    Error,
}

impl ResultSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSeverity::Information => "INFORMATION",
            ResultSeverity::Warning => "WARNING",
            ResultSeverity::Error => "ERROR",
        }
    }
}

impl fmt::Display for ResultSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable machine-readable result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    /// Required value is null or missing
    ValueIsNull,
    /// Value category does not match the declared type
    TypeMismatch,
    /// Property present on the value but not declared (strict mode)
    UnexpectedProperty,
    /// Named sibling property required by a rule is missing
    PropertyMissing,
    AtLeastOneMissing,
    OnlyOneViolated,
    ValueNotIncluded,
    ValueIncluded,
    NotEq,
    NotNe,
    NotLt,
    NotLe,
    NotGt,
    NotGe,
    NotLike,
    /// Negated rule passed
    NotFailed,
    /// Nesting exceeded the configured depth limit
    DepthExceeded,
}

impl ResultCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultCode::ValueIsNull => "VALUE_IS_NULL",
            ResultCode::TypeMismatch => "TYPE_MISMATCH",
            ResultCode::UnexpectedProperty => "UNEXPECTED_PROPERTY",
            ResultCode::PropertyMissing => "PROPERTY_MISSING",
            ResultCode::AtLeastOneMissing => "AT_LEAST_ONE_MISSING",
            ResultCode::OnlyOneViolated => "ONLY_ONE_VIOLATED",
            ResultCode::ValueNotIncluded => "VALUE_NOT_INCLUDED",
            ResultCode::ValueIncluded => "VALUE_INCLUDED",
            ResultCode::NotEq => "NOT_EQ",
            ResultCode::NotNe => "NOT_NE",
            ResultCode::NotLt => "NOT_LT",
            ResultCode::NotLe => "NOT_LE",
            ResultCode::NotGt => "NOT_GT",
            ResultCode::NotGe => "NOT_GE",
            ResultCode::NotLike => "NOT_LIKE",
            ResultCode::NotFailed => "NOT_FAILED",
            ResultCode::DepthExceeded => "DEPTH_EXCEEDED",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One deviation found during validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Dot-path of the offending value; empty for the root
    pub path: String,
    pub severity: ResultSeverity,
    pub code: ResultCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
}

impl ValidationResult {
    pub fn new(
        path: impl Into<String>,
        severity: ResultSeverity,
        code: ResultCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            severity,
            code,
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    pub fn error(path: impl Into<String>, code: ResultCode, message: impl Into<String>) -> Self {
        Self::new(path, ResultSeverity::Error, code, message)
    }

    pub fn warning(path: impl Into<String>, code: ResultCode, message: impl Into<String>) -> Self {
        Self::new(path, ResultSeverity::Warning, code, message)
    }

    pub fn with_expected(mut self, expected: impl Into<Value>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_actual(mut self, actual: impl Into<Value>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == ResultSeverity::Error
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "[{}] {}: {}", self.severity, self.code, self.message)
        } else {
            write!(
                f,
                "[{}] {} at '{}': {}",
                self.severity, self.code, self.path, self.message
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serialization() {
        let result = ValidationResult::error("a.b", ResultCode::TypeMismatch, "bad type")
            .with_expected("integer")
            .with_actual("string");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["path"], "a.b");
        assert_eq!(json["severity"], "ERROR");
        assert_eq!(json["code"], "TYPE_MISMATCH");
        assert_eq!(json["expected"], "integer");

        let bare = ValidationResult::warning("", ResultCode::UnexpectedProperty, "x");
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("expected").is_none());
    }

    #[test]
    fn test_code_strings_match_serde() {
        for code in [ResultCode::NotLike, ResultCode::AtLeastOneMissing, ResultCode::DepthExceeded] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
        }
    }

    #[test]
    fn test_display() {
        let result = ValidationResult::error("a", ResultCode::ValueIsNull, "a is null");
        assert_eq!(result.to_string(), "[ERROR] VALUE_IS_NULL at 'a': a is null");
    }
}
