//! Error types for handler enforcement.
//!
//! The enforcer itself only fails at construction time (configuration errors).
//! Everything a wrapped handler reports is passed through untouched, so the
//! handler-facing error type is a boxed trait object rather than an enum.

use crate::operation::Operation;

/// Main error type for the enforcer and its bundled handlers.
#[derive(Debug, thiserror::Error)]
pub enum EnforcerError {
    /// Invalid arity or malformed enforcer configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Operation name outside the five known operations
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Invocation of a table slot that holds no handler
    #[error("No handler registered for operation '{0}'")]
    UnsupportedOperation(Operation),

    /// Request missing something a handler needs before it can start
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure raised synchronously by a handler implementation.
///
/// The enforcer never inspects or translates these.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result of starting a handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

/// Result type for enforcer operations.
pub type EnforcerResult<T> = Result<T, EnforcerError>;

impl EnforcerError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Whether this error stems from a programming defect in enforcer setup.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
