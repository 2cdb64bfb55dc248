use std::net::SocketAddr;

use serde::Deserialize;
use metricdump_core::error::{MetricDumpError, Result};
use metricdump_core::protocol::MAX_CATALOG_PAGE_SIZE;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    pub upstream: UpstreamSection,

    #[serde(default)]
    pub output: OutputSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricDumpError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.upstream.validate()?;
        self.output.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MetricDumpError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}

/// Remote analysis service.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamSection {
    pub base_url: String,

    /// Static bearer credential sent on every upstream call.
    pub token: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_catalog_page_size")]
    pub catalog_page_size: u32,
}

// The token must never end up in logs.
impl std::fmt::Debug for UpstreamSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamSection")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .field("catalog_page_size", &self.catalog_page_size)
            .finish()
    }
}

impl UpstreamSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(MetricDumpError::BadRequest(
                "upstream.base_url must start with http:// or https://".into(),
            ));
        }
        if self.token.trim().is_empty() {
            return Err(MetricDumpError::BadRequest("upstream.token must not be empty".into()));
        }
        if !(100..=120000).contains(&self.timeout_ms) {
            return Err(MetricDumpError::BadRequest(
                "upstream.timeout_ms must be between 100 and 120000".into(),
            ));
        }
        if !(1..=MAX_CATALOG_PAGE_SIZE).contains(&self.catalog_page_size) {
            return Err(MetricDumpError::BadRequest(format!(
                "upstream.catalog_page_size must be between 1 and {MAX_CATALOG_PAGE_SIZE}"
            )));
        }
        Ok(())
    }

    /// Base URL without trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_timeout_ms() -> u64 {
    10000
}
fn default_catalog_page_size() -> u32 {
    MAX_CATALOG_PAGE_SIZE
}

/// Where reports are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl OutputSection {
    pub fn validate(&self) -> Result<()> {
        if self.dir.trim().is_empty() {
            return Err(MetricDumpError::BadRequest("output.dir must not be empty".into()));
        }
        Ok(())
    }
}

fn default_output_dir() -> String {
    ".".into()
}
