//! Metric catalog page (`/api/metrics/search`).

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{MetricDumpError, Result};
use crate::protocol::CATALOG_ENDPOINT;

/// A measurable attribute known to the upstream service.
///
/// Only `key` is required; the descriptive fields are kept when present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricDefinition {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl MetricDefinition {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            value_type: None,
            domain: None,
        }
    }
}

/// One page of the catalog.
#[derive(Debug, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub metrics: Vec<MetricDefinition>,
    /// Total number of metrics across all pages, when reported.
    #[serde(default)]
    pub total: Option<u64>,
    /// 1-based page index, when reported.
    #[serde(default, rename = "p")]
    pub page: Option<u32>,
}

impl CatalogPage {
    /// Whether another page should be requested after this one, given how
    /// many definitions have been collected so far (this page included).
    pub fn has_more(&self, collected: usize) -> bool {
        if self.metrics.is_empty() {
            return false;
        }
        match self.total {
            Some(total) => (collected as u64) < total,
            None => false,
        }
    }
}

/// Decode a catalog page from a response body.
pub fn decode_catalog_page(body: Bytes) -> Result<CatalogPage> {
    serde_json::from_slice(&body).map_err(|e| MetricDumpError::InvalidPayload {
        endpoint: CATALOG_ENDPOINT,
        message: e.to_string(),
    })
}
