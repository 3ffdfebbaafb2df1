//! Structured errors for callers of the operation registry
//!
//! These describe problems with a *request* (wrong argument count, a value of
//! the wrong type, an unknown operation). Problems with the *mathematics*
//! (singular matrix, wrong shape) are not errors: they are reported as a
//! [`Failure`](crate::Failure) inside a narrated [`Outcome`](crate::Outcome).

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNKNOWN_OPERATION: &str = "UNKNOWN_OPERATION";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const RAGGED_MATRIX: &str = "RAGGED_MATRIX";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL: &str = "INTERNAL";
    // Semantic failure codes, mirrored from `Failure::code`
    pub const SHAPE_ERROR: &str = "SHAPE_ERROR";
    pub const SINGULAR: &str = "SINGULAR";
    pub const DIMENSION_RESTRICTION: &str = "DIMENSION_RESTRICTION";
    pub const DEGENERATE_INPUT: &str = "DEGENERATE_INPUT";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The request was served with a degraded answer
    Warning,
    /// The request could not be served
    Error,
    /// The server cannot continue
    Fatal,
}

/// Structured error value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepwiseError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Operation that was being invoked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    pub severity: Severity,
}

impl StepwiseError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            operation: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: record the operation being invoked
    pub fn in_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Send numbers, arrays of numbers, or arrays of rows")
    }

    pub fn unknown_operation(name: &str) -> Self {
        Self::new(codes::UNKNOWN_OPERATION, format!("Unknown operation: {}", name))
            .with_suggestion("Use list_operations to see what is available")
    }

    pub fn arg_count(operation: &str, expected: usize, got: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", operation, expected, got),
        )
        .with_suggestion(format!("Use help('{}') for usage", operation))
        .in_operation(operation)
    }

    pub fn arg_type(operation: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", operation, arg, expected, got),
        )
        .in_operation(operation)
    }

    pub fn ragged_matrix(row: usize, len: usize, expected: usize) -> Self {
        Self::new(
            codes::RAGGED_MATRIX,
            format!("row {} has {} columns, expected {}", row + 1, len, expected),
        )
        .with_suggestion("Every row of a matrix must have the same length")
    }

    pub fn not_found(name: &str) -> Self {
        Self::new(codes::NOT_FOUND, format!("No operation named '{}'", name))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for StepwiseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for StepwiseError {}

impl From<serde_json::Error> for StepwiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_error(err.to_string())
    }
}
