//! Error types for the hooks system
//!
//! Only structural failures are errors here. A webhook that cannot be reached
//! is never an error: it is recorded as a failed `DeliveryOutcome` and retried.
//!
//! # Error Handling Patterns
//!
//! 1. **Configuration Errors**: An invalid batch size, retry count or timeout
//!    is rejected when the dispatcher is built, before any request is sent.
//!
//! 2. **Source Errors**: When the hook list cannot be read, the trigger fails
//!    with `SourceUnavailable` and no report is produced.
//!
//! 3. **Registry Errors**: Lookups of unknown hooks and lock poisoning in the
//!    in-memory registry.

use thiserror::Error;

/// Errors that can occur in the hooks system
#[derive(Debug, Error)]
pub enum HooksError {
    /// Hook not found in the registry
    #[error("Hook not found: {0}")]
    HookNotFound(String),

    /// Invalid dispatcher or loader configuration
    ///
    /// Raised at construction time. Common causes:
    /// - `batch_size` or `retry_count` of zero
    /// - zero attempt timeout
    /// - malformed configuration file
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A function was called with an argument it cannot work with
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The hook source could not produce the hook list
    ///
    /// Without the list no dispatch can happen, so this is surfaced to the
    /// trigger caller instead of being folded into a report.
    #[error("Hook source unavailable: {0}")]
    SourceUnavailable(String),

    /// Storage or registry error
    ///
    /// Common causes:
    /// - Lock poisoning (concurrent access issue)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<config::ConfigError> for HooksError {
    fn from(err: config::ConfigError) -> Self {
        HooksError::InvalidConfiguration(err.to_string())
    }
}

/// Result type for hooks operations
pub type Result<T> = std::result::Result<T, HooksError>;
