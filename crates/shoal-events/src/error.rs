//! Invocation boundary error primitives.

use std::fmt::{self, Display, Formatter};

/// Error emitted when raw boundary parameters match neither known shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    /// The parameter container could not be discriminated into a shape.
    InvalidParameterShape {
        /// Why the container was rejected.
        reason: &'static str,
        /// Offending element or container, rendered for logs.
        detail: String,
    },
}

impl InvocationError {
    /// Why the container was rejected.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidParameterShape { reason, .. } => reason,
        }
    }

    /// Offending element or container, rendered for logs.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidParameterShape { detail, .. } => detail,
        }
    }
}

impl Display for InvocationError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("invalid parameter shape")
    }
}

impl std::error::Error for InvocationError {}

/// Result wrapper for boundary parameter handling.
pub type InvocationResult<T> = Result<T, InvocationError>;
