//! Flow graph definition.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::{DeployPayload, Edge, FlowError, FlowResult, Node, NodeId};

/// A named graph of tasks connected by directed dependency edges.
///
/// This is the JSON shape produced by the workflow editor. Nodes keep their
/// insertion order, which is also the order of tasks in the deploy payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    /// Flow name, used as the deployed flow's name.
    pub name: String,
    /// Nodes in editor order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Dependency edges.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl FlowGraph {
    /// Creates an empty flow with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Appends a node.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Appends an edge.
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Returns the first node with the given ID.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// Returns whether a node with the given ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Returns the set of node IDs.
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Returns the sources of edges ending at `id`, in edge order.
    ///
    /// Edges whose source is not a node of this flow are skipped.
    pub fn upstream_of(&self, id: &str) -> Vec<&NodeId> {
        let known = self.node_ids();
        self.edges
            .iter()
            .filter(|e| e.target.as_str() == id && known.contains(e.source.as_str()))
            .map(|e| &e.source)
            .collect()
    }

    /// Returns edges that reference a node ID not present in the flow.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        let known = self.node_ids();
        self.edges
            .iter()
            .filter(|e| !known.contains(e.source.as_str()) || !known.contains(e.target.as_str()))
            .collect()
    }

    /// Returns node IDs that occur more than once, each reported once.
    pub fn duplicate_node_ids(&self) -> Vec<&NodeId> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.nodes
            .iter()
            .map(|n| &n.id)
            .filter(|id| !seen.insert(id.as_str()) && reported.insert(id.as_str()))
            .collect()
    }

    /// Returns node IDs ordered so that every node follows its upstream nodes.
    ///
    /// Dangling edges are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Cycle`] if the dependencies are cyclic.
    pub fn topological_order(&self) -> FlowResult<Vec<NodeId>> {
        let mut graph = DiGraph::<&NodeId, ()>::with_capacity(self.nodes.len(), self.edges.len());
        let mut indices: HashMap<&str, NodeIndex> = HashMap::with_capacity(self.nodes.len());

        for node in &self.nodes {
            indices
                .entry(node.id.as_str())
                .or_insert_with(|| graph.add_node(&node.id));
        }

        for edge in &self.edges {
            if let (Some(&from), Some(&to)) = (
                indices.get(edge.source.as_str()),
                indices.get(edge.target.as_str()),
            ) {
                graph.add_edge(from, to, ());
            }
        }

        petgraph::algo::toposort(&graph, None)
            .map(|order| order.into_iter().map(|idx| graph[idx].clone()).collect())
            .map_err(|cycle| FlowError::Cycle(graph[cycle.node_id()].clone()))
    }

    /// Checks the flow for structural problems.
    ///
    /// The deploy transformation does not require a valid flow; this is for
    /// callers that want to reject questionable graphs before deploying.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checked in this order: empty name,
    /// duplicate node IDs, dangling edges, dependency cycles.
    pub fn validate(&self) -> FlowResult<()> {
        if self.name.trim().is_empty() {
            return Err(FlowError::EmptyName);
        }

        if let Some(id) = self.duplicate_node_ids().into_iter().next() {
            return Err(FlowError::DuplicateNode(id.clone()));
        }

        let known = self.node_ids();
        if let Some(edge) = self.dangling_edges().into_iter().next() {
            let missing = if known.contains(edge.source.as_str()) {
                edge.target.clone()
            } else {
                edge.source.clone()
            };
            return Err(FlowError::DanglingEdge {
                from: edge.source.clone(),
                to: edge.target.clone(),
                missing,
            });
        }

        self.topological_order().map(|_| ())
    }

    /// Builds the deployment payload for this flow.
    pub fn to_deploy_payload(&self) -> DeployPayload {
        DeployPayload::from_flow(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pipeline() -> FlowGraph {
        FlowGraph::new("main_data_pipeline")
            .with_node(Node::new("extract", "extract_from_postgres"))
            .with_node(Node::new("clean", "clean_data"))
            .with_node(Node::new("transform", "transform_data"))
            .with_node(Node::new("validate", "validate_data_quality"))
            .with_edge(Edge::new("extract", "clean"))
            .with_edge(Edge::new("clean", "transform"))
            .with_edge(Edge::new("transform", "validate"))
    }

    fn position(order: &[NodeId], id: &str) -> usize {
        order.iter().position(|n| n.as_str() == id).unwrap()
    }

    #[test]
    fn test_deserialize_flow() {
        let flow: FlowGraph = serde_json::from_value(json!({
            "name": "F",
            "nodes": [{"id": "a", "type": "t1", "data": {"parameters": {}}}],
            "edges": []
        }))
        .unwrap();

        assert_eq!(flow.name, "F");
        assert_eq!(flow.nodes.len(), 1);
        assert!(flow.contains("a"));
        assert!(!flow.contains("b"));
    }

    #[test]
    fn test_valid_pipeline() {
        let flow = pipeline();
        assert_eq!(flow.validate(), Ok(()));

        let order = flow.topological_order().unwrap();
        assert_eq!(order.len(), 4);
        assert!(position(&order, "extract") < position(&order, "clean"));
        assert!(position(&order, "clean") < position(&order, "transform"));
        assert!(position(&order, "transform") < position(&order, "validate"));
    }

    #[test]
    fn test_upstream_of_skips_unknown_sources() {
        let flow = pipeline()
            .with_edge(Edge::new("ghost", "validate"))
            .with_edge(Edge::new("extract", "validate"));

        let upstream: Vec<&str> = flow
            .upstream_of("validate")
            .into_iter()
            .map(NodeId::as_str)
            .collect();
        assert_eq!(upstream, ["transform", "extract"]);
    }

    #[test]
    fn test_dangling_edges() {
        let flow = pipeline()
            .with_edge(Edge::new("extract", "nowhere"))
            .with_edge(Edge::new("ghost", "clean"));

        assert_eq!(flow.dangling_edges().len(), 2);
        assert_eq!(
            flow.validate(),
            Err(FlowError::DanglingEdge {
                from: "extract".into(),
                to: "nowhere".into(),
                missing: "nowhere".into(),
            })
        );
    }

    #[test]
    fn test_duplicate_nodes() {
        let flow = pipeline()
            .with_node(Node::new("clean", "clean_data"))
            .with_node(Node::new("clean", "clean_data"));

        assert_eq!(flow.duplicate_node_ids().len(), 1);
        assert_eq!(
            flow.validate(),
            Err(FlowError::DuplicateNode("clean".into()))
        );
    }

    #[test]
    fn test_cycle_detection() {
        let flow = pipeline().with_edge(Edge::new("validate", "extract"));

        assert!(matches!(
            flow.topological_order(),
            Err(FlowError::Cycle(_))
        ));
        assert!(matches!(flow.validate(), Err(FlowError::Cycle(_))));
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(FlowGraph::new("  ").validate(), Err(FlowError::EmptyName));
    }
}
