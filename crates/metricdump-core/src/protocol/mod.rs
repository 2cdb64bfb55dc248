//! Upstream wire contracts (SonarQube-compatible web API).
//!
//! Two endpoints are consumed:
//! - `GET /api/metrics/search`: paginated metric catalog.
//! - `GET /api/measures/component`: current measures of one component.
//!
//! Decoders take the raw response body and never panic: malformed payloads
//! are reported as `MetricDumpError::InvalidPayload` tagged with the endpoint
//! label so the caller can tell which call went wrong.

pub mod catalog;
pub mod measures;

use bytes::Bytes;
use serde_json::Value;

/// Label used in errors and metrics for the catalog call.
pub const CATALOG_ENDPOINT: &str = "catalog";
/// Label used in errors and metrics for the measures call.
pub const MEASURES_ENDPOINT: &str = "measures";

/// Path of the catalog endpoint, relative to the service base URL.
pub const CATALOG_PATH: &str = "/api/metrics/search";
/// Path of the measures endpoint, relative to the service base URL.
pub const MEASURES_PATH: &str = "/api/measures/component";

/// Upper bound of the catalog page size accepted upstream.
pub const MAX_CATALOG_PAGE_SIZE: u32 = 500;

/// Turn a non-success response body into caller-facing details.
///
/// JSON bodies (e.g. `{"errors":[{"msg":"..."}]}`) pass through as-is, other
/// bodies become a string. An empty body yields `null`.
pub fn error_details(body: &Bytes) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(v) => v,
        Err(_) => Value::String(String::from_utf8_lossy(body).into_owned()),
    }
}
