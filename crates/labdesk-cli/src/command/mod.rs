//! Subcommands and their handlers.

mod input;

use anyhow::Context;
use clap::{Args, Subcommand};
use labdesk_core::AnalysisQuery;
use labdesk_flow::FlowGraph;
use labdesk_reqwest::LabClient;
use serde::Serialize;
use serde_json::Value;

pub use self::input::Input;
use crate::TRACING_TARGET_COMMAND;

/// Operation to run against the lab API.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List equipment (empty if the API is unavailable).
    Equipment,
    /// List experiments (empty if the API is unavailable).
    Experiments,
    /// Create an experiment from a JSON document.
    CreateExperiment(DocumentArgs),
    /// Run an analysis with the JSON parameters in a document.
    Analysis(DocumentArgs),
    /// Deploy a workflow editor graph to the workflow runner.
    Deploy(DeployArgs),
    /// Print dashboard statistics.
    Summary,
    /// Check whether the lab API is reachable.
    Health,
}

/// Arguments for commands that take one JSON document.
#[derive(Debug, Clone, Args)]
pub struct DocumentArgs {
    /// Path to a JSON file, or `-` to read stdin.
    pub input: Input,
}

/// Arguments for `deploy`.
#[derive(Debug, Clone, Args)]
pub struct DeployArgs {
    /// Path to a flow graph JSON file, or `-` to read stdin.
    pub input: Input,

    /// Reject flows with duplicate nodes, dangling edges or cycles.
    #[arg(long)]
    pub strict: bool,

    /// Print the deploy payload instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
}

impl Command {
    /// Returns the subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equipment => "equipment",
            Self::Experiments => "experiments",
            Self::CreateExperiment(_) => "create-experiment",
            Self::Analysis(_) => "analysis",
            Self::Deploy(_) => "deploy",
            Self::Summary => "summary",
            Self::Health => "health",
        }
    }

    /// Runs the command and prints its result to stdout.
    pub async fn run(self, client: &LabClient) -> anyhow::Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_COMMAND,
            command = self.name(),
            "Running command"
        );

        match self {
            Self::Equipment => print_json(&client.fetch_equipment().await),
            Self::Experiments => print_json(&client.fetch_experiments().await),
            Self::CreateExperiment(args) => {
                let payload: Value = args.input.read_json().await?;
                let created = client
                    .create_experiment(&payload)
                    .await
                    .context("failed to create experiment")?;
                print_json(&created)
            }
            Self::Analysis(args) => {
                let query = analysis_query(&args.input).await?;
                let result = client
                    .fetch_analysis_data(&query)
                    .await
                    .context("failed to fetch analysis data")?;
                print_json(&result)
            }
            Self::Deploy(args) => deploy(client, args).await,
            Self::Summary => print_json(&client.dashboard_summary().await),
            Self::Health => {
                let health = client.health_check().await?;
                print_json(&health)?;
                if !health.is_healthy() {
                    anyhow::bail!("lab API at {} is unhealthy", client.base_url());
                }
                Ok(())
            }
        }
    }
}

async fn analysis_query(input: &Input) -> anyhow::Result<AnalysisQuery> {
    let value: Value = input.read_json().await?;
    AnalysisQuery::from_json(value)
        .with_context(|| format!("invalid analysis parameters in '{input}'"))
}

async fn deploy(client: &LabClient, args: DeployArgs) -> anyhow::Result<()> {
    let flow: FlowGraph = args.input.read_json().await?;

    if args.strict {
        flow.validate()
            .with_context(|| format!("flow '{}' failed validation", flow.name))?;
    }

    if args.dry_run {
        tracing::info!(
            target: TRACING_TARGET_COMMAND,
            flow = %flow.name,
            "Dry run, not deploying"
        );
        return print_json(&flow.to_deploy_payload());
    }

    let response = client
        .deploy_workflow(&flow)
        .await
        .with_context(|| format!("failed to deploy flow '{}'", flow.name))?;
    print_json(&response)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use labdesk_reqwest::LabConfig;
    use serde_json::json;

    use super::*;

    fn offline_client() -> LabClient {
        LabClient::new(LabConfig::new("http://127.0.0.1:9")).unwrap()
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::Equipment.name(), "equipment");
        assert_eq!(
            Command::CreateExperiment(DocumentArgs { input: Input::Stdin }).name(),
            "create-experiment"
        );
    }

    fn write_flow(flow: Value) -> (tempfile::TempDir, Input) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flow.json");
        std::fs::write(&path, flow.to_string()).unwrap();
        (dir, Input::File(path))
    }

    #[tokio::test]
    async fn test_analysis_parameters_must_be_an_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let error = analysis_query(&Input::File(path)).await.unwrap_err();
        let core = error.downcast_ref::<labdesk_core::Error>().unwrap();
        assert_eq!(core.kind(), labdesk_core::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_strict_deploy_rejects_cycle_before_sending() {
        let (_dir, input) = write_flow(json!({
            "name": "loop",
            "nodes": [{"id": "a", "type": "t1"}, {"id": "b", "type": "t2"}],
            "edges": [{"source": "a", "target": "b"}, {"source": "b", "target": "a"}]
        }));

        let args = DeployArgs {
            input,
            strict: true,
            dry_run: false,
        };
        let error = deploy(&offline_client(), args).await.unwrap_err();
        assert!(format!("{error:#}").contains("failed validation"));
    }

    #[tokio::test]
    async fn test_dry_run_does_not_send() {
        let (_dir, input) = write_flow(json!({
            "name": "F",
            "nodes": [{"id": "a", "type": "t1"}],
            "edges": [{"source": "ghost", "target": "a"}]
        }));

        let args = DeployArgs {
            input,
            strict: false,
            dry_run: true,
        };
        deploy(&offline_client(), args).await.unwrap();
    }
}
