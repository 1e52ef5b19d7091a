//! Error types for math operations

use thiserror::Error;

use crate::operation::Operation;

/// Result type alias for math operations
pub type MathResult<T> = Result<T, MathError>;

/// Rich, typed errors for math operations.
///
/// Validation and precondition failures are raised by the adapter before any
/// backend runs. Failures raised inside a backend are wrapped in
/// [`MathError::BackendFailed`] by the fallback chain; use
/// [`MathError::root_cause`] to get at the original failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("invalid operand '{value}': {reason}")]
    InvalidOperand { value: String, reason: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("{backend} backend does not support {operation}: {reason}")]
    UnsupportedOperation {
        backend: &'static str,
        operation: Operation,
        reason: String,
    },

    #[error("{operation} precondition failed for '{value}': {reason}")]
    InvalidPrecondition {
        operation: Operation,
        value: String,
        reason: &'static str,
    },

    #[error("{backend} backend failed during {operation}: {source}")]
    BackendFailed {
        backend: &'static str,
        operation: Operation,
        #[source]
        source: Box<MathError>,
    },

    #[error("no backend was able to perform {operation}")]
    Unknown { operation: Operation },

    #[error("invalid math configuration: {reason}")]
    Configuration { reason: String },
}

impl MathError {
    pub fn invalid_operand(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOperand {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(
        backend: &'static str,
        operation: Operation,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedOperation {
            backend,
            operation,
            reason: reason.into(),
        }
    }

    pub fn precondition(operation: Operation, value: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidPrecondition {
            operation,
            value: value.into(),
            reason,
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Wraps a failure raised by `backend` while running `operation`.
    pub fn backend_failed(backend: &'static str, operation: Operation, source: Self) -> Self {
        Self::BackendFailed {
            backend,
            operation,
            source: Box::new(source),
        }
    }

    /// The innermost error, skipping any [`MathError::BackendFailed`] wrappers.
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::BackendFailed { source, .. } = current {
            current = source;
        }
        current
    }

    /// Name of the backend that produced this error, if it came out of the chain.
    pub fn backend(&self) -> Option<&'static str> {
        match self {
            Self::BackendFailed { backend, .. } | Self::UnsupportedOperation { backend, .. } => {
                Some(backend)
            }
            _ => None,
        }
    }

    pub fn is_division_by_zero(&self) -> bool {
        matches!(self.root_cause(), Self::DivisionByZero)
    }

    pub fn is_invalid_operand(&self) -> bool {
        matches!(self.root_cause(), Self::InvalidOperand { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self.root_cause(), Self::UnsupportedOperation { .. })
    }
}
