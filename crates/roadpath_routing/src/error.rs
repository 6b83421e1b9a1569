use thiserror::Error;

use crate::types::{NodeId, Weight};

/// Reasons a graph cannot be built. All of them are fatal at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} is defined more than once")]
    DuplicateNode(NodeId),
    #[error("Edge #{edge_index} references unknown node {node}")]
    MalformedGraph { edge_index: usize, node: NodeId },
    #[error("Edge #{edge_index} has invalid weight {weight}, weights must be non-negative")]
    InvalidWeight { edge_index: usize, weight: Weight },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("Node {0} does not exist in the graph")]
    UnknownNode(NodeId),
    #[error("No path from {start} to {end}")]
    NoPathFound { start: NodeId, end: NodeId },
}

#[derive(Error, Debug)]
pub enum GraphFileError {
    #[error("Failed to read graph file")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse graph file")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid graph")]
    Graph(#[from] GraphError),
}

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Failed to start the path search worker")]
    Worker(#[from] std::io::Error),
}
