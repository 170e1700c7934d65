//! Error types for Aeris API operations.

use thiserror::Error;

use crate::response::ApiResponse;

/// Errors that can occur during Aeris API operations.
///
/// [`AerisError::Api`] is the one kind raised for every unclassified vendor
/// failure. The remaining variants cover transport, parsing and local
/// configuration problems, none of which come from an Aeris response.
#[derive(Debug, Error)]
pub enum AerisError {
    /// The API answered, but not in a way the operation accepts.
    ///
    /// Carries the full response (status, headers, body) for diagnosis.
    #[error("Aeris API error: {message}")]
    Api {
        message: String,
        response: ApiResponse,
    },

    /// Configuration is missing or incomplete.
    #[error("Aeris configuration required: {0}")]
    ConfigMissing(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Reading or writing the local profile failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AerisError {
    /// The offending HTTP response, for API failures.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            AerisError::Api { response, .. } => Some(response),
            _ => None,
        }
    }

    /// HTTP status of the offending response, for API failures.
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(ApiResponse::status)
    }
}

/// Result type alias for Aeris operations.
pub type Result<T> = core::result::Result<T, AerisError>;
