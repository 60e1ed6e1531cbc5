//! Client error types.

use thiserror::Error;

/// Errors that can occur while browsing a remote route tree.
#[derive(Debug, Error)]
pub enum FsError {
    /// The server answered 404.
    #[error("{0}: no such file or directory")]
    NotFound(String),

    /// A listing was requested for something that is not a directory.
    #[error("{0}: not a directory")]
    NotADirectory(String),

    /// Any other non-success status.
    #[error("{path}: unexpected status {status}")]
    Status { path: String, status: u16 },

    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid directory listing: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for client operations.
pub type FsResult<T> = Result<T, FsError>;
