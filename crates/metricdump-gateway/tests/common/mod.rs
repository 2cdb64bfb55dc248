//! Shared helpers for gateway integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use metricdump_core::error::{MetricDumpError, Result};
use metricdump_core::protocol::catalog::MetricDefinition;
use metricdump_core::protocol::measures::MeasureEntry;
use metricdump_core::ProjectKey;
use metricdump_gateway::config::{self, GatewayConfig};
use metricdump_gateway::upstream::MetricsSource;

/// Config pointing at `base_url`, writing reports into `dir`.
pub fn test_config(base_url: &str, dir: &Path) -> GatewayConfig {
    let doc = format!(
        r#"
version: 1
server:
  listen: "127.0.0.1:0"
upstream:
  base_url: "{base_url}"
  token: "secret"
  timeout_ms: 2000
  catalog_page_size: 2
output:
  dir: "{}"
"#,
        dir.display()
    );
    config::load_from_str(&doc).unwrap()
}

/// How a fake upstream call should answer.
#[derive(Clone)]
pub enum Reply<T> {
    Ok(T),
    Status(u16, Value),
}

/// In-memory `MetricsSource` counting its calls.
pub struct FakeSource {
    catalog: Mutex<Reply<Vec<&'static str>>>,
    measures: Mutex<Reply<Vec<(&'static str, &'static str)>>>,
    pub catalog_calls: AtomicUsize,
    pub measures_calls: AtomicUsize,
    pub last_filter: Mutex<Option<String>>,
}

impl FakeSource {
    pub fn new(
        catalog: Reply<Vec<&'static str>>,
        measures: Reply<Vec<(&'static str, &'static str)>>,
    ) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            measures: Mutex::new(measures),
            catalog_calls: AtomicUsize::new(0),
            measures_calls: AtomicUsize::new(0),
            last_filter: Mutex::new(None),
        }
    }

    pub fn set_measures(&self, reply: Reply<Vec<(&'static str, &'static str)>>) {
        *self.measures.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.catalog_calls.load(Ordering::SeqCst),
            self.measures_calls.load(Ordering::SeqCst),
        )
    }
}

fn status_error(endpoint: &'static str, status: u16, details: Value) -> MetricDumpError {
    MetricDumpError::UpstreamStatus {
        endpoint,
        status,
        details,
    }
}

#[async_trait]
impl MetricsSource for FakeSource {
    async fn metric_catalog(&self) -> Result<Vec<MetricDefinition>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        match self.catalog.lock().unwrap().clone() {
            Reply::Ok(keys) => Ok(keys.into_iter().map(MetricDefinition::new).collect()),
            Reply::Status(s, d) => Err(status_error("catalog", s, d)),
        }
    }

    async fn component_measures(
        &self,
        _project: &ProjectKey,
        metric_keys: &str,
    ) -> Result<Vec<MeasureEntry>> {
        self.measures_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_filter.lock().unwrap() = Some(metric_keys.to_string());
        match self.measures.lock().unwrap().clone() {
            Reply::Ok(pairs) => Ok(pairs
                .into_iter()
                .map(|(k, v)| MeasureEntry::new(k, v))
                .collect()),
            Reply::Status(s, d) => Err(status_error("measures", s, d)),
        }
    }
}

/// GET `uri` through the router; body parsed as JSON when possible, else a string.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body)
        .unwrap_or_else(|_| json!(String::from_utf8_lossy(&body).into_owned()));
    (status, value)
}

pub fn read_report(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}
