//! Error types for pathloom operators
//!
//! Every failure surfaces to the outer controller as a failed tick; nothing
//! is retried internally. Variants group into four kinds the controller can
//! act on: input, evaluation, bounds, internal.

use thiserror::Error;

/// Coarse classification of an error, used by controllers for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing required variable, wrong shape, non-scalar vertex id
    Input,
    /// Predicate failed to evaluate or produced the wrong type
    Evaluation,
    /// Step bound not positive
    Bounds,
    /// Invariant violation inside the operator
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Input => "input",
            ErrorKind::Evaluation => "evaluation",
            ErrorKind::Bounds => "bounds",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Errors that can occur during a pathloom operator tick
#[derive(Error, Debug)]
pub enum PathloomError {
    // Input errors
    #[error("missing variable: {name}")]
    MissingVariable { name: String },

    #[error("bad shape in {var}: {reason}")]
    BadShape { var: String, reason: String },

    #[error("invalid vertex id: {value} (expected a scalar int or string)")]
    InvalidVid { value: String },

    // Evaluation errors
    #[error("evaluation failed: {0}")]
    Evaluation(String),

    // Bounds errors
    #[error("step bound must be positive (got {0})")]
    Bounds(i64),

    // Invariant violations
    #[error("internal: {0}")]
    Internal(String),
}

impl PathloomError {
    /// Create an error for a missing variable-table binding
    pub fn missing_variable(name: impl Into<String>) -> Self {
        PathloomError::MissingVariable { name: name.into() }
    }

    /// Create an error for a malformed value in a named variable
    pub fn bad_shape(var: impl Into<String>, reason: impl Into<String>) -> Self {
        PathloomError::BadShape {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Create an error for a vertex id that is not a scalar
    pub fn invalid_vid(value: impl std::fmt::Debug) -> Self {
        PathloomError::InvalidVid {
            value: format!("{value:?}"),
        }
    }

    /// Create an error for a failed predicate evaluation
    pub fn evaluation(reason: impl Into<String>) -> Self {
        PathloomError::Evaluation(reason.into())
    }

    /// Create an error for a broken operator invariant
    pub fn internal(reason: impl Into<String>) -> Self {
        PathloomError::Internal(reason.into())
    }

    /// Get the kind classification for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PathloomError::MissingVariable { .. }
            | PathloomError::BadShape { .. }
            | PathloomError::InvalidVid { .. } => ErrorKind::Input,
            PathloomError::Evaluation(_) => ErrorKind::Evaluation,
            PathloomError::Bounds(_) => ErrorKind::Bounds,
            PathloomError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "kind": self.kind().as_str(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for pathloom operations
pub type Result<T> = std::result::Result<T, PathloomError>;
