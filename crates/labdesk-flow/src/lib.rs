#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod deploy;
mod edge;
mod error;
mod graph;
mod node;

pub use deploy::{DeployPayload, TaskSpec};
pub use edge::{Edge, EdgeBuilder};
pub use error::{FlowError, FlowResult};
pub use graph::FlowGraph;
pub use node::{Node, NodeBuilder, NodeData, NodeId};
