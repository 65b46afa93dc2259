//! Error types and handling for slider-callback core

use thiserror::Error;

/// Result type alias for slider-callback operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for slider-callback core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Event addressed to a slider that is not on the page
    #[error("Unknown slider: {id}")]
    UnknownSlider { id: String },

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("Duplicate slider id: {id}")]
    DuplicateSlider { id: String },

    #[error("No sliders configured")]
    NoSliders,
}

/// A failed POST to an endpoint.
///
/// Every variant takes the same handling path in the binder: it is logged
/// and the busy flag is cleared.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("server responded with status {status}")]
    Status { status: u16 },
}

impl From<reqwest::Error> for SendError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => SendError::Status {
                status: status.as_u16(),
            },
            None => SendError::Transport {
                message: err.to_string(),
            },
        }
    }
}
