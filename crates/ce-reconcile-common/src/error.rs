//! Error types for reconciliation operations.
//!
//! This module defines the error taxonomy used throughout the manager
//! crates. All errors implement `std::error::Error` via `thiserror`.

use thiserror::Error;

/// Result type alias for reconciliation operations.
pub type CeResult<T> = Result<T, CeError>;

/// Errors that can occur while reconciling device configuration.
#[derive(Debug, Error)]
pub enum CeError {
    /// Desired state is malformed or contradictory. Raised before any
    /// device interaction; never retried.
    #[error("Invalid value for {field}: {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// Error message naming the violated rule and offending value.
        message: String,
    },

    /// A fetch or apply call failed at the transport layer.
    #[error("Transport failure during {operation}: {message}")]
    Transport {
        /// The operation that failed ("fetch", "apply").
        operation: String,
        /// The adapter's raw error text.
        message: String,
    },

    /// The device accepted the transport call but refused the change
    /// payload. Distinct from `Transport`: the request reached the device.
    #[error("Device rejected change for {entity}: {message}")]
    ApplyRejected {
        /// The entity type label.
        entity: String,
        /// Error message.
        message: String,
    },

    /// USM user with no remote engine id and no local engine id
    /// discoverable on the device.
    #[error("No engine id for USM user '{user}': the local engine id is null, declare a remote engine id")]
    EngineIdUnavailable {
        /// The USM user name.
        user: String,
    },
}

impl CeError {
    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates an apply-rejected error.
    pub fn apply_rejected(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApplyRejected {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error was raised before any device I/O.
    pub fn is_pre_io(&self) -> bool {
        matches!(self, CeError::Validation { .. })
    }
}
