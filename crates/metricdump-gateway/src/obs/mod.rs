//! Lightweight in-process metrics.
//!
//! Counters, gauges and histograms stored as atomics and rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::ExporterMetrics;
