//! # Design
//!
//! - Provide structured, constant-message errors for policy dispatch.
//! - Capture operation context (paths, resources, codes) to make failures
//!   reproducible in tests.
//! - Parameter and destination errors surface before any transfer side
//!   effect; transfer errors carry the primitive's negative code verbatim.

use shoal_events::InvocationError;
use thiserror::Error;

/// Result type for policy dispatch operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Errors produced by the policy dispatch engine.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Invocation parameters could not be normalised into an operation request.
    #[error("invalid parameter shape")]
    InvalidParameterShape {
        /// Why the parameters were rejected.
        reason: &'static str,
        /// Offending element or field, rendered for logs.
        detail: String,
    },
    /// Replication could not determine any target resource.
    #[error("no replication destination could be resolved")]
    MissingDestination {
        /// Logical path of the object that was to be replicated.
        object_path: String,
        /// Resource the object currently resides on.
        source_resource: String,
    },
    /// A single transfer primitive call returned a failure code.
    #[error("transfer primitive call failed")]
    Transfer {
        /// Negative code returned by the transfer primitive.
        code: i32,
        /// Composed message naming the object and the resources involved.
        message: String,
    },
    /// One or more fan-out attempts failed after every destination was tried.
    #[error("replication fan-out completed with failures")]
    AggregateFailure {
        /// Code of the last failure encountered, in destination order.
        code: i32,
        /// Every failed destination's composed message, joined in order.
        message: String,
        /// Number of destinations that failed.
        failed: usize,
        /// Number of destinations attempted.
        attempted: usize,
    },
}

impl PolicyError {
    pub(crate) fn invalid_shape(reason: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidParameterShape {
            reason,
            detail: detail.into(),
        }
    }

    pub(crate) fn missing_destination(
        object_path: impl Into<String>,
        source_resource: impl Into<String>,
    ) -> Self {
        Self::MissingDestination {
            object_path: object_path.into(),
            source_resource: source_resource.into(),
        }
    }

    pub(crate) fn transfer(code: i32, message: impl Into<String>) -> Self {
        Self::Transfer {
            code,
            message: message.into(),
        }
    }

    /// Numeric code attached to a transfer or aggregate failure.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        match self {
            Self::Transfer { code, .. } | Self::AggregateFailure { code, .. } => Some(*code),
            Self::InvalidParameterShape { .. } | Self::MissingDestination { .. } => None,
        }
    }

    /// Composed transfer message, when one was recorded.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Transfer { message, .. } | Self::AggregateFailure { message, .. } => {
                Some(message.as_str())
            }
            Self::InvalidParameterShape { .. } | Self::MissingDestination { .. } => None,
        }
    }
}

impl From<InvocationError> for PolicyError {
    fn from(err: InvocationError) -> Self {
        let InvocationError::InvalidParameterShape { reason, detail } = err;
        Self::InvalidParameterShape { reason, detail }
    }
}
