//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use metricdump_core::error::{MetricDumpError, Result};

pub use schema::{GatewayConfig, OutputSection, ServerSection, UpstreamSection};

/// Default config path when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "metricdump.yaml";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricDumpError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricDumpError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
