//! Node definition types.

use std::borrow::Borrow;

use derive_builder::Builder;
use derive_more::{Debug, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a node within a flow graph.
///
/// Node identifiers double as task names in the deployment payload.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("{_0}")]
#[display("{_0}")]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node ID from any string-like value.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Editor-side payload attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Task parameters, forwarded verbatim to the workflow runner.
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// A node of the flow graph.
///
/// Editor-only fields such as canvas positions are ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    name = "NodeBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with")
)]
pub struct Node {
    /// Unique node identifier.
    pub id: NodeId,
    /// Task type tag understood by the workflow runner.
    #[serde(rename = "type")]
    pub kind: String,
    /// Editor payload carrying the task parameters.
    #[serde(default)]
    #[builder(default)]
    pub data: NodeData,
}

impl Node {
    /// Creates a node without parameters.
    pub fn new(id: impl Into<NodeId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            data: NodeData::default(),
        }
    }

    /// Returns a builder for creating a node.
    pub fn builder() -> NodeBuilder {
        NodeBuilder::default()
    }

    /// Replaces the node's task parameters.
    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.data.parameters = parameters;
        self
    }

    /// Returns the task parameters.
    pub fn parameters(&self) -> &Map<String, Value> {
        &self.data.parameters
    }
}
