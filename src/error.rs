//! Error types and handling for the map bridge

use thiserror::Error;

/// Main error type for the map bridge
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Missing or malformed request input
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Transport, HTTP status or provider status anomaly on an upstream call
    #[error("Upstream failure: {message}")]
    Upstream { message: String },

    /// Well-formed provider answer without usable entries
    #[error("Empty result: {message}")]
    EmptyResult { message: String },

    /// Anything that should not happen
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BridgeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new upstream failure
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new empty-result error
    pub fn empty_result<S: Into<String>>(message: S) -> Self {
        Self::EmptyResult {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the fallback generator should absorb this error
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// Get the message shown to API callers
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            BridgeError::Validation { message } => message.clone(),
            BridgeError::EmptyResult { .. } => "not found".to_string(),
            BridgeError::Config { .. }
            | BridgeError::Upstream { .. }
            | BridgeError::Internal { .. } => "internal error".to_string(),
        }
    }
}
