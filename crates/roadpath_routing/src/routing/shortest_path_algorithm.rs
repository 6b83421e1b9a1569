use crate::{error::RoutingError, graph::Graph, types::NodeId};

use super::routing_path::RoutingPath;

pub trait ShortestPathAlgorithm {
    /// Computes the shortest path from `start` to `end`.
    ///
    /// An unreachable `end` yields [`RoutingError::NoPathFound`], never a partial path.
    fn calc_path(
        &mut self,
        graph: &impl Graph,
        start: NodeId,
        end: NodeId,
    ) -> Result<RoutingPath, RoutingError>;
}
