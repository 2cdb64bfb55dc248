//! Component measures (`/api/measures/component`).

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{MetricDumpError, Result};
use crate::protocol::MEASURES_ENDPOINT;

/// One (metric key, value) observation.
///
/// `value` is absent for measures that only carry period data upstream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MeasureEntry {
    pub metric: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl MeasureEntry {
    pub fn new(metric: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MeasuresResponse {
    pub component: ComponentMeasures,
}

#[derive(Debug, Deserialize)]
pub struct ComponentMeasures {
    #[serde(default)]
    pub measures: Vec<MeasureEntry>,
}

/// Decode a measures response body into its entries.
pub fn decode_measures(body: Bytes) -> Result<Vec<MeasureEntry>> {
    let resp: MeasuresResponse =
        serde_json::from_slice(&body).map_err(|e| MetricDumpError::InvalidPayload {
            endpoint: MEASURES_ENDPOINT,
            message: e.to_string(),
        })?;
    Ok(resp.component.measures)
}
