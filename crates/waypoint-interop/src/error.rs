//! Interop error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InteropError {
    #[error("Host operation '{identifier}' failed: {message}")]
    HostFailure { identifier: String, message: String },

    #[error("Unknown host operation: {0}")]
    UnknownIdentifier(String),

    #[error("Invalid host identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("Could not decode result of '{identifier}': {source}")]
    Decode {
        identifier: String,
        #[source]
        source: serde_json::Error,
    },
}

impl InteropError {
    pub fn host_failure(identifier: &str, message: impl Into<String>) -> Self {
        Self::HostFailure {
            identifier: identifier.to_string(),
            message: message.into(),
        }
    }
}
