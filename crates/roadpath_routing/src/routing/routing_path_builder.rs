use crate::{
    graph::Graph,
    types::{EdgeId, NodeIndex, Weight},
};

use super::routing_path::{RoutingPath, RoutingPathLeg};

/// Builds a path from the edges it follows, in travel order.
pub fn build_routing_path(
    graph: &impl Graph,
    start: NodeIndex,
    edges: &[EdgeId],
    distance: Weight,
) -> RoutingPath {
    let mut nodes = Vec::with_capacity(edges.len() + 1);
    let mut legs: Vec<RoutingPathLeg> = Vec::with_capacity(edges.len());

    nodes.push(graph.node_id(start));

    for &edge_id in edges {
        let edge = graph.edge(edge_id);
        let from = graph.node_id(edge.start_node());
        let to = graph.node_id(edge.end_node());

        legs.push(RoutingPathLeg::new(from, to, edge.weight()));
        nodes.push(to);
    }

    RoutingPath::new(nodes, legs, distance)
}
