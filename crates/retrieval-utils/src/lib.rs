//! Shared utilities for the data-retrieval workspace
//!
//! Currently only tracing subscriber setup, shared by the binaries.

pub mod logging;

pub use logging::{DEFAULT_FILTER, LogFormat, init_tracing};
