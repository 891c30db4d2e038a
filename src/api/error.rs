//! Backend API-specific error types.

use std::path::PathBuf;

/// Errors that can occur during backend API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request could not be completed
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status or `success: false`
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        code: Option<String>,
        details: Option<String>,
    },

    /// Response body did not have the expected shape
    #[error("Malformed API response: {0}")]
    Malformed(String),

    /// Configured base URL cannot carry API paths
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// File selected for upload could not be read
    #[error("Failed to read {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ApiError {
    /// Whether the response arrived but could not be interpreted.
    ///
    pub fn is_malformed(&self) -> bool {
        matches!(self, ApiError::Malformed(_))
    }
}
