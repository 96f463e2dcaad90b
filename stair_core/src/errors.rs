//! # Error Types
//!
//! Structured error types for stair_core. These errors are designed to be
//! informative for both humans and LLMs: every variant carries a complete
//! message that a front end can show as-is, plus enough context (field name,
//! offending text) to fix the input programmatically.
//!
//! ## Example
//!
//! ```rust
//! use stair_core::errors::{StairError, StairResult};
//!
//! fn validate_rise(total_rise_in: f64) -> StairResult<()> {
//!     if total_rise_in <= 0.0 {
//!         return Err(StairError::invalid_input(
//!             "total_rise",
//!             total_rise_in.to_string(),
//!             "Total rise must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for stair_core operations
pub type StairResult<T> = Result<T, StairError>;

/// Structured error type for stair operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum StairError {
    /// A measurement string does not match the supported grammar
    /// (or has a zero denominator)
    #[error("Invalid format for '{field}': '{input}' - {reason}")]
    ParseError {
        field: String,
        input: String,
        reason: String,
    },

    /// A field required by the chosen resolution path is absent or non-positive
    #[error("Missing or invalid input for '{field}': {value} - {reason}")]
    MissingOrInvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The supplied inputs match none of the recognized input combinations
    #[error("Ambiguous configuration: {reason}")]
    AmbiguousConfiguration { reason: String },

    /// A regulatory threshold table is inconsistent
    #[error("Invalid threshold '{field}': {reason}")]
    InvalidThresholds { field: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl StairError {
    /// Create a ParseError
    pub fn parse(field: impl Into<String>, input: impl Into<String>, reason: impl Into<String>) -> Self {
        StairError::ParseError {
            field: field.into(),
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingOrInvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        StairError::MissingOrInvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingOrInvalidInput error for an empty required field
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        StairError::MissingOrInvalidInput {
            reason: format!("A value for '{}' is required", field),
            field,
            value: String::new(),
        }
    }

    /// Create an AmbiguousConfiguration error
    pub fn ambiguous(reason: impl Into<String>) -> Self {
        StairError::AmbiguousConfiguration {
            reason: reason.into(),
        }
    }

    /// Create an InvalidThresholds error
    pub fn invalid_thresholds(field: impl Into<String>, reason: impl Into<String>) -> Self {
        StairError::InvalidThresholds {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        StairError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        StairError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check if the caller can recover by correcting input and calling again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StairError::ParseError { .. }
                | StairError::MissingOrInvalidInput { .. }
                | StairError::AmbiguousConfiguration { .. }
        )
    }

    /// Name of the input field at fault, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            StairError::ParseError { field, .. }
            | StairError::MissingOrInvalidInput { field, .. }
            | StairError::InvalidThresholds { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            StairError::ParseError { .. } => "PARSE_ERROR",
            StairError::MissingOrInvalidInput { .. } => "MISSING_OR_INVALID_INPUT",
            StairError::AmbiguousConfiguration { .. } => "AMBIGUOUS_CONFIGURATION",
            StairError::InvalidThresholds { .. } => "INVALID_THRESHOLDS",
            StairError::FileError { .. } => "FILE_ERROR",
            StairError::SerializationError { .. } => "SERIALIZATION_ERROR",
            StairError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = StairError::parse("tread_depth", "9 1a/4", "Expected '9.5', '1/4' or '9 1/4'");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"ParseError\""));
        let roundtrip: StairError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(StairError::missing_field("total_rise").error_code(), "MISSING_OR_INVALID_INPUT");
        assert_eq!(StairError::ambiguous("x").error_code(), "AMBIGUOUS_CONFIGURATION");
    }

    #[test]
    fn test_input_errors_are_recoverable() {
        assert!(StairError::parse("a", "b", "c").is_recoverable());
        assert!(StairError::ambiguous("x").is_recoverable());
        assert!(!StairError::serialization("bad json").is_recoverable());
    }

    #[test]
    fn test_field_name_is_exposed() {
        let err = StairError::missing_field("total_rise");
        assert_eq!(err.field(), Some("total_rise"));
        assert!(err.to_string().contains("total_rise"));
        assert_eq!(StairError::ambiguous("x").field(), None);
    }
}
