//! # API Results
//!
//! Normalized outcome of one HTTP exchange. The connector returns these
//! without raising on provider errors; the facade unwraps them.

use crate::error::{ApiError, KassaError, KassaResult};
use serde::{Deserialize, Serialize};

/// Tagged outcome of a request, keyed by the correlation id that was sent
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Success { request_id: String, data: T },
    Failure { request_id: String, error: ApiError },
}

impl<T> ApiResult<T> {
    /// Correlation id carried by the outbound `Idempotence-Key` header
    pub fn request_id(&self) -> &str {
        match self {
            ApiResult::Success { request_id, .. } | ApiResult::Failure { request_id, .. } => {
                request_id
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success { .. })
    }

    /// Unwrap into the payload, turning a failure into [`KassaError::Api`]
    pub fn into_result(self) -> KassaResult<T> {
        match self {
            ApiResult::Success { data, .. } => Ok(data),
            ApiResult::Failure { error, .. } => Err(KassaError::Api(error)),
        }
    }

    /// Transform the success payload, keeping the request id
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            ApiResult::Success { request_id, data } => ApiResult::Success {
                request_id,
                data: f(data),
            },
            ApiResult::Failure { request_id, error } => ApiResult::Failure { request_id, error },
        }
    }
}

/// One page of a list endpoint (`{"type": "list", "items": [...], "next_cursor": "..."}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> PagedResult<T> {
    /// True when there is no continuation page
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}
