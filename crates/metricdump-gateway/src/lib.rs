//! metricdump gateway library entry.
//!
//! This crate wires config, the upstream analysis client, the export
//! pipeline, report storage, and the HTTP surface into one service. It is
//! intended to be consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod exporter;
pub mod obs;
pub mod ops;
pub mod router;
pub mod storage;
pub mod upstream;
