//! Shared error type across metricdump crates.

use serde_json::Value;
use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input (missing or unusable project key).
    BadRequest,
    /// Upstream analysis service failed or answered with a non-success status.
    UpstreamFailed,
    /// Upstream call exceeded its time budget.
    UpstreamTimeout,
    /// Report could not be serialized or written.
    StorageFailed,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UpstreamFailed => "UPSTREAM_FAILED",
            ClientCode::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            ClientCode::StorageFailed => "STORAGE_FAILED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// Client errors are the caller's fault; everything else is operational.
    pub fn is_client_error(self) -> bool {
        matches!(self, ClientCode::BadRequest)
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricDumpError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MetricDumpError {
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Upstream answered with a non-success status. `details` is the upstream
    /// error body (JSON when it parsed, a string otherwise).
    #[error("upstream {endpoint} returned status {status}")]
    UpstreamStatus {
        endpoint: &'static str,
        status: u16,
        details: Value,
    },
    #[error("upstream {endpoint} unreachable: {message}")]
    UpstreamUnreachable {
        endpoint: &'static str,
        message: String,
    },
    #[error("upstream {endpoint} timed out")]
    UpstreamTimeout { endpoint: &'static str },
    #[error("upstream {endpoint} sent an invalid payload: {message}")]
    InvalidPayload {
        endpoint: &'static str,
        message: String,
    },
    #[error("storage: {0}")]
    Storage(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricDumpError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricDumpError::BadRequest(_) => ClientCode::BadRequest,
            MetricDumpError::UpstreamStatus { .. }
            | MetricDumpError::UpstreamUnreachable { .. }
            | MetricDumpError::InvalidPayload { .. } => ClientCode::UpstreamFailed,
            MetricDumpError::UpstreamTimeout { .. } => ClientCode::UpstreamTimeout,
            MetricDumpError::Storage(_) => ClientCode::StorageFailed,
            MetricDumpError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MetricDumpError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Best-effort detail for the caller: the upstream error body when there
    /// is one, the error message otherwise.
    pub fn details(&self) -> Value {
        match self {
            MetricDumpError::UpstreamStatus { details, .. } => details.clone(),
            other => Value::String(other.to_string()),
        }
    }

    /// Upstream endpoint the error came from, if any.
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            MetricDumpError::UpstreamStatus { endpoint, .. }
            | MetricDumpError::UpstreamUnreachable { endpoint, .. }
            | MetricDumpError::UpstreamTimeout { endpoint }
            | MetricDumpError::InvalidPayload { endpoint, .. } => Some(*endpoint),
            _ => None,
        }
    }
}
