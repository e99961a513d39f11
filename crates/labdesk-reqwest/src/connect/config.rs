//! Configuration for the lab API client.

use std::collections::BTreeMap;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default base URL of the lab API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`LabClient`].
///
/// [`LabClient`]: crate::LabClient
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct LabConfig {
    /// Base URL of the lab API (e.g., "http://localhost:8000" or "https://lab.example.com/api")
    #[cfg_attr(
        feature = "config",
        arg(long = "api-base-url", env = "API_BASE_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds (0 uses the default of 30)
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent header sent with every request
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Bearer token sent in the Authorization header
    #[cfg_attr(
        feature = "config",
        arg(long = "api-key", env = "API_KEY", hide_env_values = true)
    )]
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Extra headers sent with every request.
    #[cfg_attr(feature = "config", arg(skip))]
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            http_timeout: default_timeout_secs(),
            user_agent: None,
            api_key: None,
            default_headers: BTreeMap::new(),
        }
    }
}

impl std::fmt::Debug for LabConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabConfig")
            .field("api_base_url", &self.api_base_url)
            .field("http_timeout", &self.http_timeout)
            .field("user_agent", &self.user_agent)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("default_headers", &self.default_headers.keys())
            .finish()
    }
}

impl LabConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("labdesk/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout.as_secs();
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            DEFAULT_TIMEOUT
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if unset or empty.
    pub fn effective_user_agent(&self) -> String {
        match self.user_agent.as_deref() {
            Some(user_agent) if !user_agent.trim().is_empty() => user_agent.to_string(),
            _ => Self::default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = LabConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
        assert!(config.effective_user_agent().starts_with("labdesk/"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = LabConfig {
            http_timeout: 0,
            ..Default::default()
        };
        assert_eq!(config.effective_timeout(), DEFAULT_TIMEOUT);

        let config = config.with_timeout(Duration::from_secs(5));
        assert_eq!(config.effective_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_effective_user_agent_uses_default_when_empty() {
        let config = LabConfig::default().with_user_agent("");
        assert!(config.effective_user_agent().starts_with("labdesk/"));

        let config = config.with_user_agent("dashboard/2.0");
        assert_eq!(config.effective_user_agent(), "dashboard/2.0");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = LabConfig::default().with_api_key("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: LabConfig =
            serde_json::from_str(r#"{"api_base_url": "https://lab.example.com/api"}"#).unwrap();
        assert_eq!(config.api_base_url, "https://lab.example.com/api");
        assert_eq!(config.http_timeout, 30);
        assert!(config.default_headers.is_empty());
    }
}
