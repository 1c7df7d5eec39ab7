//! # Error Types
//!
//! Typed error handling for the kassa client.
//! All facade operations return `Result<T, KassaError>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Core error type for all client operations
#[derive(Debug, Error)]
pub enum KassaError {
    /// Configuration errors (missing credentials, invalid endpoint)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request could not be built (bad path, bad header value)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered with a structured error body
    #[error("API error [{}]: {}", .0.code, .0.description)]
    Api(ApiError),

    /// Failure status without a structured error body
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Network/transport fault, nothing was received
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl KassaError {
    /// Returns true if repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            KassaError::Network(_) => true,
            KassaError::Http { status, .. } => *status == 429 || *status >= 500,
            KassaError::Api(err) => matches!(
                err.code,
                ErrorCode::InternalServerError | ErrorCode::TooManyRequests
            ),
            _ => false,
        }
    }

    /// Provider error code, present only for structured API errors
    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            KassaError::Api(err) => Some(&err.code),
            _ => None,
        }
    }
}

impl From<ApiError> for KassaError {
    fn from(err: ApiError) -> Self {
        KassaError::Api(err)
    }
}

/// Result type alias for client operations
pub type KassaResult<T> = Result<T, KassaError>;

/// Error codes documented by the provider.
///
/// Unknown codes are kept verbatim in [`ErrorCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    InvalidRequest,
    InvalidCredentials,
    Forbidden,
    NotFound,
    Gone,
    TooManyRequests,
    InternalServerError,
    NotSupported,
    Other(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::InvalidRequest => "invalid_request",
            ErrorCode::InvalidCredentials => "invalid_credentials",
            ErrorCode::Forbidden => "forbidden",
            ErrorCode::NotFound => "not_found",
            ErrorCode::Gone => "gone",
            ErrorCode::TooManyRequests => "too_many_requests",
            ErrorCode::InternalServerError => "internal_server_error",
            ErrorCode::NotSupported => "not_supported",
            ErrorCode::Other(code) => code,
        }
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "invalid_request" => ErrorCode::InvalidRequest,
            "invalid_credentials" => ErrorCode::InvalidCredentials,
            "forbidden" => ErrorCode::Forbidden,
            "not_found" => ErrorCode::NotFound,
            "gone" => ErrorCode::Gone,
            "too_many_requests" => ErrorCode::TooManyRequests,
            "internal_server_error" => ErrorCode::InternalServerError,
            "not_supported" => ErrorCode::NotSupported,
            _ => ErrorCode::Other(code),
        }
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error body returned by the provider on failed requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Always `"error"`
    #[serde(rename = "type", default = "error_kind")]
    pub kind: String,

    /// Provider-side error id (quote it to support)
    pub id: String,

    pub code: ErrorCode,

    #[serde(default)]
    pub description: String,

    /// Name of the offending request parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,

    /// Suggested wait before retrying, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

fn error_kind() -> String {
    "error".to_string()
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)
    }
}
