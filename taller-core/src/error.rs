//! Error types for the registration service.

use thiserror::Error;

/// Errors that can occur while building registrations and tickets.
#[derive(Error, Debug)]
pub enum TallerError {
    #[error("Invalid registration: {0}")]
    InvalidRegistration(String),

    #[error("Workshop configuration error: {0}")]
    Workshop(String),

    #[error("Could not read template {path}: {source}")]
    Template {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid QR service URL: {0}")]
    QrUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for registration operations.
pub type TallerResult<T> = Result<T, TallerError>;
