//! Equipment, experiment and analysis endpoints.

use labdesk_core::{
    AnalysisQuery, DashboardSummary, EquipmentRecord, ExperimentRecord, Result,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::connect::{LabClient, TRACING_TARGET};
use crate::policy::FetchPolicy;

impl LabClient {
    /// Fetches the equipment list from `GET /equipment`.
    ///
    /// Returns an empty list if the request fails, the status is not 2xx, or
    /// the body is not a JSON array. Array items that are not valid equipment
    /// records are logged and skipped; the rest are returned in order.
    pub async fn fetch_equipment(&self) -> Vec<EquipmentRecord> {
        self.fetch_records("/equipment").await
    }

    /// Fetches the experiment list from `GET /experiments`.
    ///
    /// Same failure contract as [`LabClient::fetch_equipment`].
    pub async fn fetch_experiments(&self) -> Vec<ExperimentRecord> {
        self.fetch_records("/experiments").await
    }

    async fn fetch_records<T: DeserializeOwned>(&self, path: &str) -> Vec<T> {
        let items: Vec<Value> = self
            .get_json(FetchPolicy::EmptyDefault, path)
            .await
            .unwrap_or_default();

        decode_records(path, items)
    }

    /// Creates an experiment with `POST /experiments`.
    ///
    /// The payload is sent as-is; the server validates it. Returns the
    /// server's representation of the created record.
    ///
    /// # Errors
    ///
    /// Returns a `RequestFailed` error on a non-2xx status, a `Transport`
    /// error if the request could not complete, and a `MalformedResponse`
    /// error if the body is not JSON.
    pub async fn create_experiment<P>(&self, payload: &P) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        self.post_json(FetchPolicy::Propagate, "/experiments", payload)
            .await
    }

    /// Runs an analysis with `POST /analysis`.
    ///
    /// # Errors
    ///
    /// Same failure contract as [`LabClient::create_experiment`].
    pub async fn fetch_analysis_data(&self, params: &AnalysisQuery) -> Result<Value> {
        self.post_json(FetchPolicy::Propagate, "/analysis", params)
            .await
    }

    /// Fetches equipment and experiments concurrently and summarizes them.
    ///
    /// Inherits the read endpoints' contract: a failed fetch counts as an
    /// empty list.
    pub async fn dashboard_summary(&self) -> DashboardSummary {
        let (equipment, experiments) =
            tokio::join!(self.fetch_equipment(), self.fetch_experiments());

        let summary = DashboardSummary::from_records(&equipment, &experiments);

        tracing::debug!(
            target: TRACING_TARGET,
            equipment = equipment.len(),
            experiments = experiments.len(),
            active_experiments = summary.active_experiments,
            "Computed dashboard summary"
        );

        summary
    }
}

/// Decodes each item on its own so one bad record does not hide the others.
fn decode_records<T: DeserializeOwned>(path: &str, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    path,
                    index,
                    error = %err,
                    "Skipping record that does not decode"
                );
                None
            }
        })
        .collect()
}
