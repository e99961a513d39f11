//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── lab: LabConfig   # API base URL, timeout, user agent, API key
//! └── command: Command # Operation to run
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! labdesk --api-base-url "https://lab.example.com/api" equipment
//!
//! # Or via environment variables
//! API_BASE_URL="https://lab.example.com/api" labdesk equipment
//! ```

use std::process;

use clap::Parser;
use labdesk_reqwest::LabConfig;

use crate::command::Command;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "labdesk")]
#[command(about = "Laboratory dashboard client for the lab API")]
#[command(version)]
pub struct Cli {
    /// Lab API connection configuration.
    #[clap(flatten)]
    pub lab: LabConfig,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments, so its values act
    /// as environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            api_base_url = %self.lab.api_base_url,
            timeout_secs = self.lab.effective_timeout().as_secs(),
            user_agent = %self.lab.effective_user_agent(),
            api_key = self.lab.api_key.is_some(),
            command = self.command.name(),
            "Lab API configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
