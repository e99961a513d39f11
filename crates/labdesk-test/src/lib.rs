#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod mock;

pub mod fixtures;

pub use axum::http::{Method, StatusCode};
pub use mock::{MockLabApi, MockResponse, MockServer, RecordedRequest, closed_port_url};

/// Tracing target for the mock lab API.
pub const TRACING_TARGET: &str = "labdesk_test::mock";
