//! HTTP client for the analysis service (reqwest).
//!
//! - Static bearer credential on every call.
//! - Per-call timeout from `upstream.timeout_ms`.
//! - Non-success statuses keep the upstream error body as details.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use metricdump_core::error::{MetricDumpError, Result};
use metricdump_core::protocol::catalog::{decode_catalog_page, MetricDefinition};
use metricdump_core::protocol::measures::{decode_measures, MeasureEntry};
use metricdump_core::protocol::{
    error_details, CATALOG_ENDPOINT, CATALOG_PATH, MEASURES_ENDPOINT, MEASURES_PATH,
};
use metricdump_core::ProjectKey;

use crate::config::UpstreamSection;
use crate::upstream::MetricsSource;

/// Hard stop for catalog paging when upstream keeps reporting a larger total.
const MAX_CATALOG_PAGES: u32 = 1000;

pub struct AnalysisClient {
    http: reqwest::Client,
    base: String,
    token: String,
    page_size: u32,
}

impl AnalysisClient {
    pub fn new(cfg: &UpstreamSection) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| MetricDumpError::Internal(format!("http client build failed: {e}")))?;

        Ok(Self {
            http,
            base: cfg.base().to_string(),
            token: cfg.token.clone(),
            page_size: cfg.catalog_page_size,
        })
    }

    async fn get(&self, endpoint: &'static str, path: &str, query: &[(&str, &str)]) -> Result<Bytes> {
        let url = format!("{}{}", self.base, path);
        tracing::debug!(%endpoint, %url, "upstream request");

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| transport_error(endpoint, e))?;

        if !status.is_success() {
            return Err(MetricDumpError::UpstreamStatus {
                endpoint,
                status: status.as_u16(),
                details: error_details(&body),
            });
        }
        Ok(body)
    }
}

fn transport_error(endpoint: &'static str, e: reqwest::Error) -> MetricDumpError {
    if e.is_timeout() {
        MetricDumpError::UpstreamTimeout { endpoint }
    } else {
        MetricDumpError::UpstreamUnreachable {
            endpoint,
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl MetricsSource for AnalysisClient {
    async fn metric_catalog(&self) -> Result<Vec<MetricDefinition>> {
        let page_size = self.page_size.to_string();
        let mut out = Vec::new();

        for page_no in 1..=MAX_CATALOG_PAGES {
            let p = page_no.to_string();
            let body = self
                .get(CATALOG_ENDPOINT, CATALOG_PATH, &[("ps", page_size.as_str()), ("p", p.as_str())])
                .await?;
            let page = decode_catalog_page(body)?;

            let received = page.metrics.len();
            let more = page.has_more(out.len() + received);
            out.extend(page.metrics);

            if !more {
                return Ok(out);
            }
        }

        tracing::warn!(pages = MAX_CATALOG_PAGES, collected = out.len(), "catalog paging stopped at page limit");
        Ok(out)
    }

    async fn component_measures(
        &self,
        project: &ProjectKey,
        metric_keys: &str,
    ) -> Result<Vec<MeasureEntry>> {
        let body = self
            .get(
                MEASURES_ENDPOINT,
                MEASURES_PATH,
                &[("component", project.as_str()), ("metricKeys", metric_keys)],
            )
            .await?;
        decode_measures(body)
    }
}
