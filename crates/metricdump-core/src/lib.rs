//! metricdump core: upstream wire contracts, the report model, and error types.
//!
//! This crate defines the data shapes exchanged with the remote analysis
//! service and the flattened report written to disk. It carries no transport
//! or runtime dependencies so the reduction logic can be tested on its own.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MetricDumpError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod report;

/// Shared result type.
pub use error::{Result, MetricDumpError};
pub use report::{ProjectKey, ProjectMetricsReport};
