//! Structured errors
//!
//! Errors never crash a caller. They are values that propagate through
//! plugin calls and carry a machine-readable code plus a readable message.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const OVERFLOW: &str = "OVERFLOW";
    pub const VALIDATION: &str = "VALIDATION";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Call completed with a degraded result
    Warning,
    /// Call failed
    Error,
}

/// Structured error value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Severity level
    pub severity: Severity,
}

impl LabError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use list to see available functions")
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got),
        )
        .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got),
        )
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn validation(field: &str, details: impl Into<String>) -> Self {
        Self::new(codes::VALIDATION, format!("{}: {}", field, details.into()))
            .with_severity(Severity::Warning)
    }

    pub fn not_found(what: &str, name: &str) -> Self {
        Self::new(codes::NOT_FOUND, format!("No {} named '{}'", what, name))
    }
}

impl std::fmt::Display for LabError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for LabError {}

impl From<NumberError> for LabError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::NegativeInput(_) | NumberError::NotAnInteger(_) => {
                Self::domain_error(err.to_string())
            }
            NumberError::Overflow => Self::new(codes::OVERFLOW, err.to_string())
                .with_suggestion("Use the exact variant for large inputs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_carry_codes() {
        let err = LabError::parse_error("expected value at line 1");
        assert_eq!(err.code, codes::PARSE_ERROR);
        assert_eq!(err.message, "Parse error: expected value at line 1");

        let err = LabError::not_found("function", "frog");
        assert_eq!(err.code, codes::NOT_FOUND);
        assert_eq!(err.to_string(), "[NOT_FOUND] No function named 'frog'");

        let err = LabError::validation("email", "expected Text");
        assert_eq!(err.code, codes::VALIDATION);
        assert_eq!(err.severity, Severity::Warning);
    }

    #[test]
    fn test_from_number_error() {
        assert_eq!(LabError::from(NumberError::NegativeInput(-1)).code, codes::DOMAIN_ERROR);
        let overflow = LabError::from(NumberError::Overflow);
        assert_eq!(overflow.code, codes::OVERFLOW);
        assert!(overflow.suggestion.is_some());
    }
}
