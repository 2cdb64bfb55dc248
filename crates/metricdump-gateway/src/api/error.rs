//! HTTP mapping of `MetricDumpError`.
//!
//! - client errors: 400 `{ "error": ... }`
//! - everything else: 500 `{ "error": ..., "details": ... }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use metricdump_core::MetricDumpError;

#[derive(Debug)]
pub struct ApiError(pub MetricDumpError);

impl From<MetricDumpError> for ApiError {
    fn from(e: MetricDumpError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        if code.is_client_error() {
            let msg = match &self.0 {
                MetricDumpError::BadRequest(m) => m.clone(),
                other => other.to_string(),
            };
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response();
        }

        let body = Json(json!({
            "error": self.0.to_string(),
            "details": self.0.details(),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
