//! `GET /fetch-all-metrics?projectKey=<key>`
//!
//! Validates the key before any upstream traffic, runs the exporter, answers
//! with the written file path.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use metricdump_core::error::{MetricDumpError, Result};
use metricdump_core::ProjectKey;

use crate::api::error::ApiError;
use crate::app_state::AppState;
use crate::obs::metrics::Gauge;

#[derive(Debug, Deserialize)]
pub struct FetchQuery {
    #[serde(rename = "projectKey", default)]
    pub project_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    pub message: String,
    pub file_path: String,
}

// Keeps the in-flight gauge right when the client goes away mid-request.
struct Inflight<'a>(&'a Gauge);

impl<'a> Inflight<'a> {
    fn enter(g: &'a Gauge) -> Self {
        g.inc();
        Self(g)
    }
}

impl Drop for Inflight<'_> {
    fn drop(&mut self) {
        self.0.dec();
    }
}

pub async fn fetch_all_metrics(
    State(app): State<AppState>,
    query: std::result::Result<Query<FetchQuery>, QueryRejection>,
) -> std::result::Result<Json<FetchResponse>, ApiError> {
    let _inflight = Inflight::enter(&app.metrics().requests_inflight);

    let res = match query {
        Ok(Query(q)) => run(&app, q).await,
        // Unparsable query strings still answer with the JSON error body.
        Err(rejection) => Err(MetricDumpError::BadRequest(format!(
            "invalid query string: {}",
            rejection.body_text()
        ))),
    };
    match &res {
        Ok(_) => app.metrics().requests.inc(&[("outcome", "ok")]),
        Err(e) => {
            let code = e.client_code();
            let outcome = code.as_str().to_ascii_lowercase();
            app.metrics().requests.inc(&[("outcome", &outcome)]);
            if code.is_client_error() {
                tracing::warn!(code = code.as_str(), error = %e, "fetch-all-metrics rejected");
            } else {
                tracing::error!(code = code.as_str(), endpoint = ?e.endpoint(), error = %e, "fetch-all-metrics failed");
            }
        }
    }
    res.map(Json).map_err(ApiError)
}

async fn run(app: &AppState, q: FetchQuery) -> Result<FetchResponse> {
    let raw = q
        .project_key
        .ok_or_else(|| MetricDumpError::BadRequest("projectKey is required".into()))?;
    let project = ProjectKey::parse(&raw)?;

    let span = tracing::info_span!("fetch_all_metrics", project = %project);
    let exported = app.exporter().export(&project).instrument(span).await?;

    Ok(FetchResponse {
        message: format!(
            "Metrics for {} saved ({} values)",
            project,
            exported.report.metrics.len()
        ),
        file_path: exported.path.display().to_string(),
    })
}
