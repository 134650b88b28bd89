//! Error types for client operations.

use thiserror::Error;

/// Error raised by the synchronization layer.
///
/// Mutation errors always propagate to the caller; presentation (toast,
/// table footer, exit code) is the caller's job. The cache is never
/// touched on a failed mutation, so "nothing happened" is observable.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A client-side precondition failed; nothing was sent.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The request could not be completed (connectivity, timeout).
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// A 2xx response body did not decode as the expected entity.
    #[error("could not decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    pub fn missing_field(field: &str) -> Self {
        ApiError::Validation {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        }
    }

    pub fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn request_failed(status: u16, body: impl Into<String>) -> Self {
        ApiError::RequestFailed {
            status,
            body: body.into(),
        }
    }

    /// HTTP status of a failed request, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
