//! Error types for the lead capture service.

use std::time::Duration;

use crate::envelope::Envelope;

/// Top-level error type for running the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Failures of the notification relay. Always logged, never surfaced to
/// the submitter.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Notification to {recipient} timed out after {timeout:?}")]
    Timeout { recipient: String, timeout: Duration },

    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Notification task failed: {0}")]
    TaskFailed(String),
}

/// Client-side submission errors, as seen by the wizard.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Submission rejected with status {status}")]
    Rejected {
        status: u16,
        envelope: Option<Envelope>,
    },

    #[error("Could not decode response: {0}")]
    Decode(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
