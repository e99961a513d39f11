//! Lab API health check.

use std::time::Instant;

use labdesk_core::{Result, ServiceHealth};

use crate::connect::{LabClient, TRACING_TARGET};
use crate::error::Error;

impl LabClient {
    /// Probes `GET /health` and reports whether the API answered with 2xx.
    ///
    /// The response body is ignored. Transport failures produce an unhealthy
    /// report rather than an error.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error only if the health URL cannot be built.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        let url = self.endpoint("/health")?;
        let started_at = Instant::now();

        let health = match self.http().get(url.clone()).send().await {
            Ok(response) if response.status().is_success() => ServiceHealth::healthy(),
            Ok(response) => ServiceHealth::unhealthy(format!(
                "health endpoint returned HTTP {}",
                response.status().as_u16()
            )),
            Err(e) => ServiceHealth::unhealthy(labdesk_core::Error::from(Error::from(e)).to_string()),
        };
        let health = health.with_response_time(started_at.elapsed());

        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            healthy = health.is_healthy(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Health check completed"
        );

        Ok(health)
    }
}
