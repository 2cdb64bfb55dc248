//! Fetch-and-persist pipeline.
//!
//! catalog -> measures -> reduce -> write. The two upstream calls are
//! sequential (the measures filter is built from the catalog) and the first
//! failure aborts the export; nothing is written unless both calls succeeded.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use metricdump_core::error::Result;
use metricdump_core::protocol::{CATALOG_ENDPOINT, MEASURES_ENDPOINT};
use metricdump_core::report::metric_filter;
use metricdump_core::{ProjectKey, ProjectMetricsReport};

use crate::obs::ExporterMetrics;
use crate::storage::ReportWriter;
use crate::upstream::MetricsSource;

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct Exported {
    pub path: PathBuf,
    pub report: ProjectMetricsReport,
}

pub struct MetricsExporter {
    source: Arc<dyn MetricsSource>,
    writer: ReportWriter,
    metrics: Arc<ExporterMetrics>,
}

impl MetricsExporter {
    pub fn new(
        source: Arc<dyn MetricsSource>,
        writer: ReportWriter,
        metrics: Arc<ExporterMetrics>,
    ) -> Self {
        Self {
            source,
            writer,
            metrics,
        }
    }

    pub async fn export(&self, project: &ProjectKey) -> Result<Exported> {
        let catalog = self
            .timed(CATALOG_ENDPOINT, self.source.metric_catalog())
            .await?;
        let filter = metric_filter(&catalog);
        tracing::debug!(metrics = catalog.len(), "catalog fetched");

        let measures = self
            .timed(MEASURES_ENDPOINT, self.source.component_measures(project, &filter))
            .await?;
        tracing::debug!(measures = measures.len(), "measures fetched");

        let report = ProjectMetricsReport::from_measures(project, &catalog, measures);
        let path = self.writer.write(project, &report).await?;
        self.metrics.reports_written.inc(&[]);

        tracing::info!(path = %path.display(), metrics = report.metrics.len(), "report written");
        Ok(Exported { path, report })
    }

    async fn timed<T>(
        &self,
        endpoint: &'static str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let start = Instant::now();
        let res = call.await;
        self.metrics
            .observe_upstream(endpoint, res.is_ok(), start.elapsed());
        res
    }
}
