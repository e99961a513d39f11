//! Workflow deployment endpoint.

use labdesk_core::Result;
use labdesk_flow::FlowGraph;
use serde_json::Value;

use crate::connect::{LabClient, TRACING_TARGET};
use crate::policy::FetchPolicy;

impl LabClient {
    /// Deploys a flow with `POST /workflows/deploy`.
    ///
    /// The flow is converted into the runner's task list first. Edges that
    /// reference unknown nodes are logged and left out of the task list.
    ///
    /// # Errors
    ///
    /// Returns a `RequestFailed` error on a non-2xx status, a `Transport`
    /// error if the request could not complete, and a `MalformedResponse`
    /// error if the body is not JSON.
    pub async fn deploy_workflow(&self, flow: &FlowGraph) -> Result<Value> {
        let dangling = flow.dangling_edges();
        if !dangling.is_empty() {
            tracing::warn!(
                target: TRACING_TARGET,
                flow = %flow.name,
                dangling_edges = dangling.len(),
                "Flow has edges referencing unknown nodes, ignoring them"
            );
        }

        let payload = flow.to_deploy_payload();

        tracing::info!(
            target: TRACING_TARGET,
            flow = %payload.flow_name,
            tasks = payload.tasks.len(),
            "Deploying workflow"
        );

        self.post_json(FetchPolicy::Propagate, "/workflows/deploy", &payload)
            .await
    }
}
