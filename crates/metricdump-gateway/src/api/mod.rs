//! Public HTTP API.

pub mod error;
pub mod fetch_all;

pub use error::ApiError;
pub use fetch_all::{fetch_all_metrics, FetchQuery, FetchResponse};
