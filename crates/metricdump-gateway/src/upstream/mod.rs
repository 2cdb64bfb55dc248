//! Upstream analysis service access.
//!
//! The exporter only talks to [`MetricsSource`]; the HTTP implementation is
//! [`AnalysisClient`]. Tests plug in their own source.

pub mod client;

use async_trait::async_trait;

use metricdump_core::error::Result;
use metricdump_core::protocol::catalog::MetricDefinition;
use metricdump_core::protocol::measures::MeasureEntry;
use metricdump_core::ProjectKey;

pub use client::AnalysisClient;

/// Remote source of metric definitions and project measures.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Full metric catalog, every page collected, in upstream order.
    async fn metric_catalog(&self) -> Result<Vec<MetricDefinition>>;

    /// Current measures of `project`, restricted to the comma-separated
    /// `metric_keys` filter list.
    async fn component_measures(
        &self,
        project: &ProjectKey,
        metric_keys: &str,
    ) -> Result<Vec<MeasureEntry>>;
}
