//! Error types for the job board client.
//!
//! This module defines the centralized error type [`JobBoardError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Listing failures ([`JobBoardError::Fetch`]) and deletion failures
//! ([`JobBoardError::Delete`]) are separate variants so the presentation layer can
//! surface both at the same time.

use thiserror::Error;

/// The main error type for job board operations.
///
/// Backend-facing variants (`Api`, `Transport`, `Decode`, `NotFound`) are produced
/// by [`crate::api::JobsBackend`] implementations. Coordinators convert them into
/// the user-facing `Fetch`, `Delete` and `Create` variants at their boundary.
///
/// # Examples
///
/// ```
/// use jobboard::JobBoardError;
///
/// let err = JobBoardError::Api { status: 400, message: Some("title cannot be empty".into()) };
/// assert_eq!(err.server_message(), Some("title cannot be empty"));
/// ```
#[derive(Debug, Error)]
pub enum JobBoardError {
    /// Listing or single-record read failed.
    #[error("{0}")]
    Fetch(String),

    /// Deleting a job posting failed.
    #[error("{0}")]
    Delete(String),

    /// Creating or replacing a job posting failed.
    #[error("{0}")]
    Create(String),

    /// Client-side field checks rejected the input.
    #[error("{0}")]
    Validation(String),

    /// The backend has no job with this id.
    #[error("Job {0} not found")]
    NotFound(i64),

    /// The backend answered with a non-success status.
    ///
    /// `message` holds the `error` field of the JSON body when the server sent one.
    #[error("Backend returned status {status}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML.
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl JobBoardError {
    /// Returns the message supplied by the server, if any.
    ///
    /// Coordinators prefer this over their generic fallback text.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Whether the error is a missing-record response.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Api { status: 404, .. })
    }
}

impl From<reqwest::Error> for JobBoardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// A specialized `Result` type for job board operations.
pub type Result<T> = std::result::Result<T, JobBoardError>;
