//! Shared request helpers.

use std::time::Instant;

use labdesk_core::Result;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::connect::{LabClient, TRACING_TARGET};
use crate::error::Error;
use crate::policy::FetchPolicy;

impl LabClient {
    /// Issues `GET path` and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Fails only under [`FetchPolicy::Propagate`]; see [`LabClient::request`].
    pub async fn get_json<T>(&self, policy: FetchPolicy, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.request(policy, Method::GET, path, None).await
    }

    /// Issues `POST path` with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Fails only under [`FetchPolicy::Propagate`]; see [`LabClient::request`].
    /// A body that cannot be encoded is a `Serialization` error.
    pub async fn post_json<B, T>(&self, policy: FetchPolicy, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        match serde_json::to_vec(body) {
            Ok(bytes) => self.request(policy, Method::POST, path, Some(bytes)).await,
            Err(e) => policy.resolve(&format!("POST {path}"), Err(Error::Serde(e).into())),
        }
    }

    /// Sends one request and applies `policy` to the outcome.
    ///
    /// A JSON body is sent with `Content-Type: application/json`. The call
    /// fails when the transport fails, when the status is not 2xx, or when the
    /// body does not decode as `T`.
    ///
    /// # Errors
    ///
    /// Under [`FetchPolicy::Propagate`], returns a `Transport`,
    /// `RequestFailed` or `MalformedResponse` error. Under
    /// [`FetchPolicy::EmptyDefault`], never fails.
    pub async fn request<T>(
        &self,
        policy: FetchPolicy,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let operation = format!("{method} {path}");
        let result = self.send(method, path, body).await;
        policy.resolve(&operation, result)
    }

    async fn send<T>(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            url = %url,
            "Sending request"
        );

        let mut request = self.http().request(method, url.clone());
        if let Some(bytes) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        let response = request.send().await.map_err(Error::from)?;
        let status = response.status();

        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Received response"
        );

        if !status.is_success() {
            return Err(labdesk_core::Error::request_failed(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(Error::from)?;
        let value = serde_json::from_slice(&bytes).map_err(Error::Decode)?;
        Ok(value)
    }
}
