//! Error types for schema parsing and test data generation.

use thiserror::Error;

/// Errors surfaced by the generation pipeline.
///
/// `InvalidSchema` and `NoFieldsFound` are distinct on purpose: the first
/// means the document is not a form schema at all, the second means the
/// document parsed but contained nothing usable, and callers word the two
/// differently.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Root document is missing a `components` array or it is not an array.
    #[error("invalid form schema: missing or malformed components array")]
    InvalidSchema,

    /// Parse succeeded but no input fields were discovered.
    #[error("no usable input fields found in the schema")]
    NoFieldsFound,

    /// A descriptor invariant was violated during synthesis. Indicates a
    /// programming bug, not a recoverable runtime condition.
    #[error("synthesis contract violation: {0}")]
    Synthesis(String),

    /// The external generation backend returned something other than a
    /// JSON array of records.
    #[error("malformed generation result: {0}")]
    MalformedGenerationResult(String),

    /// Failure in the external generation backend itself.
    #[error("generation backend error: {0}")]
    Backend(#[from] BackendError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GenerationError {
    /// HTTP status code for API responses.
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::InvalidSchema => StatusCode::BAD_REQUEST,
            Self::NoFieldsFound => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MalformedGenerationResult(_) => StatusCode::BAD_GATEWAY,
            Self::Backend(e) => e.status_code(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Errors specific to the external generation backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// API error
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Authentication error
    #[error("authentication error: {0}")]
    Authentication(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// Reply could not be read or decoded
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out
    #[error("request timed out")]
    Timeout,
}

impl BackendError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::Authentication(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_connect() {
            BackendError::Network(format!("connection error: {}", err))
        } else {
            BackendError::Network(err.to_string())
        }
    }
}

/// Result type alias for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
