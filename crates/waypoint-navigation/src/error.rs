//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Navigation target URI is missing")]
    MissingUri,

    #[error("Navigation manager has not been initialized")]
    NotInitialized,

    #[error("Navigation manager is already initialized")]
    AlreadyInitialized,

    #[error("Invalid URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("URI '{uri}' is not within the base URI '{base_uri}'")]
    NotWithinBase { uri: String, base_uri: String },

    #[error(transparent)]
    Interop(#[from] waypoint_interop::InteropError),
}
