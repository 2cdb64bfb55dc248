//! Axum router wiring.
//!
//! `/fetch-all-metrics` plus the operational endpoints.

use axum::{routing::get, Router};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/fetch-all-metrics", get(api::fetch_all_metrics))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
