//! Flow validation error types.

use thiserror::Error;

use crate::NodeId;

/// Result type for flow validation.
pub type FlowResult<T> = Result<T, FlowError>;

/// Structural problems detected in a flow graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The flow has no name.
    #[error("flow name is empty")]
    EmptyName,

    /// Two nodes share the same identifier.
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),

    /// An edge references a node that is not part of the flow.
    #[error("edge {from} -> {to} references unknown node {missing}")]
    DanglingEdge {
        /// Source of the offending edge.
        from: NodeId,
        /// Target of the offending edge.
        to: NodeId,
        /// The endpoint that does not exist.
        missing: NodeId,
    },

    /// The dependency graph contains a cycle through this node.
    #[error("dependency cycle through node {0}")]
    Cycle(NodeId),
}
