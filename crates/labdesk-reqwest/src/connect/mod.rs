//! Lab API client module.
//!
//! This module provides the client handle and its configuration. The
//! per-resource operations live in the `service` module.

mod client;
mod config;

pub use client::{LabClient, TRACING_TARGET};
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, LabConfig};
