//! Error types for Airsense API operations.

use thiserror::Error;

/// Main error type for backend requests.
///
/// Every failure mode surfaces here and is recovered at the UI boundary:
/// a transient status message plus an inline error entry in the affected
/// selector. Nothing is retried; the user re-triggers the action.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (DNS, refused connection, fetch abort)
    #[error("fallo de red: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; message extracted from the JSON error body when
    /// present, otherwise `"HTTP <status>: <statusText>"`
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 404 mapped to an endpoint-specific user message
    #[error("{message}")]
    NotFound { message: String },

    /// 2xx response whose payload is logically empty
    #[error("{message}")]
    EmptyResult { message: String },

    /// Body was not valid JSON for the expected shape
    #[error("respuesta inválida del servidor: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// User-facing message for the status bar and selector error entries.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Type alias for Results using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
