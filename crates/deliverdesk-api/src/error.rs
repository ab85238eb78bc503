use reqwest::StatusCode;
use thiserror::Error;

use crate::retry::is_retryable_status;

/// Everything that can go wrong between us and the backend
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication required (401)")]
    Unauthorized,

    #[error("Request failed with status {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// 2xx response whose envelope carried `error: true`
    #[error("Request rejected by backend: {0}")]
    Rejected(String),

    #[error("Response envelope carried no data")]
    MissingData,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Transport hiccups and overloaded-server statuses are worth another try
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            ApiError::Status { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(err) => err.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_errors_retry_only_on_server_side() {
        let overloaded = ApiError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "busy".into(),
        };
        let bad_input = ApiError::Status {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "amount must be positive".into(),
        };

        assert!(overloaded.is_retryable());
        assert!(!bad_input.is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(!ApiError::Rejected("nope".into()).is_retryable());
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(ApiError::Unauthorized.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(ApiError::MissingData.status(), None);
    }
}
