use super::{ApiError, BoxError};
use thiserror::Error;

/// Failure raised by an [`HttpTransport`](crate::external::HttpTransport).
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request never produced a response (connect, timeout, TLS, bad URL)
    #[error("Request to {path} failed")]
    Request {
        path: String,
        #[source]
        source: BoxError,
    },

    /// The remote answered with a non-success status
    #[error("HTTP {status} from {path}")]
    Status {
        path: String,
        status: u16,
        body: String,
        /// Seconds from an integer `Retry-After` header, if one was sent
        retry_after: Option<u64>,
    },

    /// The response body could not be parsed as JSON
    #[error("Invalid JSON from {path}: {detail}")]
    InvalidJson { path: String, detail: String },
}

impl TransportError {
    /// A call that failed before any response arrived.
    pub fn request(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        TransportError::Request {
            path: path.into(),
            source: source.into(),
        }
    }

    /// HTTP status of the failed call, when the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request { source, .. } => source
                .downcast_ref::<reqwest::Error>()
                .and_then(reqwest::Error::status)
                .map(|s| s.as_u16()),
            TransportError::InvalidJson { .. } => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Maps the fault onto the structured error taxonomy.
    ///
    /// This only classifies; nothing here waits or retries.
    pub fn classify(&self) -> ApiError {
        match self {
            TransportError::Status {
                status: 429,
                retry_after,
                ..
            } => ApiError::for_rate_limit_exceeded(retry_after.unwrap_or(0)),
            TransportError::Status { path, status, .. } => {
                ApiError::new(format!("HTTP {} from {}", status, path), *status)
                    .with_context("path", path.as_str())
            }
            TransportError::InvalidJson { path, detail } => {
                ApiError::for_invalid_json(detail).with_context("path", path.as_str())
            }
            TransportError::Request { path, source } => {
                ApiError::new(format!("Request to {} failed: {}", path, source), 0)
                    .with_context("path", path.as_str())
            }
        }
    }
}
