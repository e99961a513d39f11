//! Reqwest-based HTTP client for the lab API.

use std::sync::Arc;

use labdesk_core::{Error, Result};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::LabConfig;

/// Tracing target for lab API client operations.
pub const TRACING_TARGET: &str = "labdesk_reqwest::client";

/// Inner client that holds the HTTP client and configuration.
struct LabClientInner {
    http: Client,
    base_url: Url,
    config: LabConfig,
}

/// Client for the lab API.
///
/// Cloning is cheap: clones share one connection pool. The base URL is carried
/// by the client, so independent clients can talk to different servers.
///
/// # Examples
///
/// ```rust,ignore
/// use labdesk_reqwest::{LabClient, LabConfig};
///
/// let config = LabConfig::new("http://localhost:8000").with_api_key("secret");
/// let client = LabClient::new(config)?;
///
/// let experiments = client.fetch_experiments().await;
/// ```
#[derive(Clone)]
pub struct LabClient {
    inner: Arc<LabClientInner>,
}

impl std::fmt::Debug for LabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl LabClient {
    /// Creates a new lab API client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`] error if the base URL is not an absolute
    /// `http`/`https` URL, if a header name or value is invalid, or if the HTTP
    /// client cannot be created.
    ///
    /// [`Configuration`]: labdesk_core::ErrorKind::Configuration
    pub fn new(config: LabConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.api_base_url)?;
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_ms = timeout.as_millis(),
            "Creating lab API client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .default_headers(default_headers(&config)?)
            .build()
            .map_err(|e| {
                Error::configuration()
                    .with_message("failed to build HTTP client")
                    .with_source(e)
            })?;

        let inner = LabClientInner {
            http,
            base_url,
            config,
        };

        tracing::info!(
            target: TRACING_TARGET,
            base_url = %inner.base_url,
            "Lab API client created successfully"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &LabConfig {
        &self.inner.config
    }

    /// Gets the parsed base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolves an API path against the base URL.
    ///
    /// Any path prefix of the base URL is kept, and slashes at the seam are
    /// collapsed, so `http://host/api/` joined with `/equipment` gives
    /// `http://host/api/equipment`.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`] error if the result is not a valid URL.
    ///
    /// [`Configuration`]: labdesk_core::ErrorKind::Configuration
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let url = Url::parse(&format!("{base}/{path}")).map_err(crate::error::Error::from)?;
        Ok(url)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(crate::error::Error::from)?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::configuration()
            .with_message(format!("base URL must be an http(s) URL, got '{raw}'")));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::configuration()
            .with_message(format!("base URL must not carry a query or fragment, got '{raw}'")));
    }

    Ok(url)
}

fn default_headers(config: &LabConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (key, value) in &config.default_headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            Error::configuration()
                .with_message(format!("invalid header name '{key}'"))
                .with_source(e)
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            Error::configuration()
                .with_message(format!("invalid value for header '{key}'"))
                .with_source(e)
        })?;
        headers.insert(name, value);
    }

    if let Some(api_key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            Error::configuration()
                .with_message("invalid API key")
                .with_source(e)
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use labdesk_core::ErrorKind;

    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LabClient::new(LabConfig::default()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/");
        assert!(client.config().api_key.is_none());
    }

    #[test]
    fn test_endpoint_joins_path() {
        let client = LabClient::new(LabConfig::new("http://localhost:8000")).unwrap();
        assert_eq!(
            client.endpoint("/equipment").unwrap().as_str(),
            "http://localhost:8000/equipment"
        );
        assert_eq!(
            client.endpoint("workflows/deploy").unwrap().as_str(),
            "http://localhost:8000/workflows/deploy"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = LabClient::new(LabConfig::new("https://lab.example.com/api/v1/")).unwrap();
        assert_eq!(
            client.endpoint("/analysis").unwrap().as_str(),
            "https://lab.example.com/api/v1/analysis"
        );
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        for raw in ["not a url", "ftp://lab.example.com", "mailto:lab@example.com"] {
            let error = LabClient::new(LabConfig::new(raw)).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Configuration, "{raw}");
        }
    }

    #[test]
    fn test_invalid_header_is_configuration_error() {
        let config = LabConfig::default().with_header("bad header", "value");
        let error = LabClient::new(config).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = LabClient::new(LabConfig::default().with_api_key("token-123")).unwrap();
        assert!(!format!("{client:?}").contains("token-123"));
    }
}
