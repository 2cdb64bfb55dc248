//! Shared application state for the metricdump gateway.
//!
//! Configuration is handed in at construction and owned here; handlers reach
//! the exporter and metrics through cheap `Arc` clones.

use std::sync::Arc;
use std::time::{Duration, Instant};

use metricdump_core::error::Result;

use crate::config::GatewayConfig;
use crate::exporter::MetricsExporter;
use crate::obs::ExporterMetrics;
use crate::storage::ReportWriter;
use crate::upstream::{AnalysisClient, MetricsSource};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    exporter: MetricsExporter,
    metrics: Arc<ExporterMetrics>,
    started: Instant,
}

impl AppState {
    /// Build application state backed by the HTTP analysis client.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let client = AnalysisClient::new(&cfg.upstream)?;
        Self::with_source(cfg, Arc::new(client))
    }

    /// Build application state around any metrics source.
    pub fn with_source(cfg: GatewayConfig, source: Arc<dyn MetricsSource>) -> Result<Self> {
        let writer = ReportWriter::new(&cfg.output.dir)?;
        let metrics = Arc::new(ExporterMetrics::default());
        let exporter = MetricsExporter::new(source, writer, Arc::clone(&metrics));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                exporter,
                metrics,
                started: Instant::now(),
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn exporter(&self) -> &MetricsExporter {
        &self.inner.exporter
    }

    pub fn metrics(&self) -> &ExporterMetrics {
        &self.inner.metrics
    }

    pub fn uptime(&self) -> Duration {
        self.inner.started.elapsed()
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }
}
