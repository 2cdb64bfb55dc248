//! Flattened per-project report and the reduction that builds it.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{MetricDumpError, Result};
use crate::protocol::catalog::MetricDefinition;
use crate::protocol::measures::MeasureEntry;

/// Suffix appended to the project key to form the report file name.
pub const REPORT_FILE_SUFFIX: &str = "-metrics.json";

/// Validated project identifier.
///
/// The key is used verbatim upstream and in the file name. Path separators,
/// NUL, U+FFFD (left behind by lossy percent-decoding) and surrounding
/// whitespace are refused rather than rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectKey(String);

/// Characters a project key must not contain.
const FORBIDDEN_CHARS: [char; 4] = ['/', '\\', '\0', char::REPLACEMENT_CHARACTER];

impl ProjectKey {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(MetricDumpError::BadRequest("projectKey is required".into()));
        }
        if raw.trim() != raw {
            return Err(MetricDumpError::BadRequest(format!(
                "projectKey must not start or end with whitespace: {raw:?}"
            )));
        }
        if raw.contains(&FORBIDDEN_CHARS[..]) {
            return Err(MetricDumpError::BadRequest(format!(
                "projectKey contains a forbidden character: {raw:?}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<projectKey>-metrics.json`
    pub fn report_file_name(&self) -> String {
        format!("{}{}", self.0, REPORT_FILE_SUFFIX)
    }
}

impl std::fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Comma-separated filter list of catalog keys, in catalog order, each key once.
pub fn metric_filter(catalog: &[MetricDefinition]) -> String {
    let mut seen = HashSet::with_capacity(catalog.len());
    catalog
        .iter()
        .map(|m| m.key.as_str())
        .filter(|k| seen.insert(*k))
        .collect::<Vec<_>>()
        .join(",")
}

/// Flatten measures into `metric key -> value`.
///
/// Last value wins on duplicate keys. Entries without a value, or whose key is
/// not part of `catalog`, are skipped.
pub fn reduce_measures(
    catalog: &[MetricDefinition],
    measures: Vec<MeasureEntry>,
) -> BTreeMap<String, String> {
    let known: HashSet<&str> = catalog.iter().map(|m| m.key.as_str()).collect();
    let mut out = BTreeMap::new();

    for entry in measures {
        if !known.contains(entry.metric.as_str()) {
            tracing::debug!(metric = %entry.metric, "measure outside catalog dropped");
            continue;
        }
        let Some(value) = entry.value else {
            continue;
        };
        if let Some(prev) = out.insert(entry.metric, value) {
            tracing::debug!(previous = %prev, "duplicate measure overwritten");
        }
    }
    out
}

/// Report persisted for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetricsReport {
    pub project: String,
    pub metrics: BTreeMap<String, String>,
}

impl ProjectMetricsReport {
    pub fn new(project: &ProjectKey, metrics: BTreeMap<String, String>) -> Self {
        Self {
            project: project.as_str().to_string(),
            metrics,
        }
    }

    /// Build the report from one catalog fetch and one measures fetch.
    pub fn from_measures(
        project: &ProjectKey,
        catalog: &[MetricDefinition],
        measures: Vec<MeasureEntry>,
    ) -> Self {
        Self::new(project, reduce_measures(catalog, measures))
    }

    /// Pretty JSON (2-space indentation).
    pub fn to_pretty_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| MetricDumpError::Storage(format!("serialize report failed: {e}")))
    }
}
