//! Top-level facade crate for metricdump.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use metricdump_core::*;
}

pub mod gateway {
    pub use metricdump_gateway::*;
}
