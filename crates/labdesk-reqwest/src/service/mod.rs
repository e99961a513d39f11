//! Lab API operations implemented on [`LabClient`].
//!
//! [`LabClient`]: crate::LabClient

mod dashboard;
mod health;
mod request;
mod workflow;
