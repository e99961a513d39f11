#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod connect;
mod error;
mod policy;
mod service;

pub use labdesk_core::{Error, ErrorKind, Result};

pub use crate::connect::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, LabClient, LabConfig, TRACING_TARGET};
pub use crate::policy::FetchPolicy;
