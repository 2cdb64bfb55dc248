//! Report persistence on the local filesystem.
//!
//! One file per project key, replaced on every export. Each report is written
//! to a temporary file in the output directory and renamed over the target,
//! so readers see either the previous report or the new one, never a partial
//! file. No locking: concurrent exports of the same key race and the last
//! rename wins.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use metricdump_core::error::{MetricDumpError, Result};
use metricdump_core::{ProjectKey, ProjectMetricsReport};

/// Distinguishes temp files of concurrent writes within one process.
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Create the writer, making sure the output directory exists.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            MetricDumpError::Storage(format!("create output dir failed ({}): {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    /// `<dir>/<projectKey>-metrics.json`
    pub fn path_for(&self, project: &ProjectKey) -> PathBuf {
        self.dir.join(project.report_file_name())
    }

    fn tmp_path_for(&self, project: &ProjectKey) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(
            ".{}.{}.{}.tmp",
            project.report_file_name(),
            std::process::id(),
            seq
        ))
    }

    pub async fn write(&self, project: &ProjectKey, report: &ProjectMetricsReport) -> Result<PathBuf> {
        let body = report.to_pretty_json()?;
        let path = self.path_for(project);
        let tmp = self.tmp_path_for(project);

        if let Err(e) = write_then_rename(&tmp, &path, body).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(MetricDumpError::Storage(format!(
                "write report failed ({}): {e}",
                path.display()
            )));
        }

        Ok(path)
    }
}

async fn write_then_rename(tmp: &Path, path: &Path, body: Vec<u8>) -> std::io::Result<()> {
    tokio::fs::write(tmp, body).await?;
    tokio::fs::rename(tmp, path).await
}
