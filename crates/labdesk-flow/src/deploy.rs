//! Deployment payload for the workflow runner.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{FlowGraph, NodeId};

/// One task of a deployed flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Task name, taken from the node ID.
    pub task_name: NodeId,
    /// Task type, taken from the node type tag.
    pub task_type: String,
    /// Node parameters, unmodified.
    pub parameters: Map<String, Value>,
    /// Names of the tasks this task depends on, in edge order.
    pub upstream_tasks: Vec<NodeId>,
}

/// Body of a `POST /workflows/deploy` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployPayload {
    /// Name of the flow to deploy.
    pub flow_name: String,
    /// Tasks in node order.
    pub tasks: Vec<TaskSpec>,
}

impl DeployPayload {
    /// Converts a flow graph into the runner's task list.
    ///
    /// Produces exactly one task per node, in node order. A task's upstream
    /// list holds the source of every edge targeting that node, preserving
    /// the order of `flow.edges`. Edges that point at an unknown node match no
    /// task, and edges that start at an unknown node are dropped, so unknown
    /// IDs never show up as dependencies.
    pub fn from_flow(flow: &FlowGraph) -> Self {
        let known: HashSet<&str> = flow.node_ids();

        let mut upstream: HashMap<&str, Vec<NodeId>> = HashMap::new();
        for edge in flow
            .edges
            .iter()
            .filter(|e| known.contains(e.source.as_str()))
        {
            upstream
                .entry(edge.target.as_str())
                .or_default()
                .push(edge.source.clone());
        }

        let tasks = flow
            .nodes
            .iter()
            .map(|node| TaskSpec {
                task_name: node.id.clone(),
                task_type: node.kind.clone(),
                parameters: node.data.parameters.clone(),
                upstream_tasks: upstream.get(node.id.as_str()).cloned().unwrap_or_default(),
            })
            .collect();

        Self {
            flow_name: flow.name.clone(),
            tasks,
        }
    }

    /// Returns the task with the given name.
    pub fn task(&self, name: &str) -> Option<&TaskSpec> {
        self.tasks.iter().find(|t| t.task_name.as_str() == name)
    }
}

impl From<&FlowGraph> for DeployPayload {
    fn from(flow: &FlowGraph) -> Self {
        Self::from_flow(flow)
    }
}
