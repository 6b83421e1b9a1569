use crate::{
    graph::Graph,
    point::Point,
    types::{NodeId, Weight},
};

/// One hop of a path, following a single directed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingPathLeg {
    from: NodeId,
    to: NodeId,
    weight: Weight,
}

impl RoutingPathLeg {
    pub fn new(from: NodeId, to: NodeId, weight: Weight) -> RoutingPathLeg {
        RoutingPathLeg { from, to, weight }
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }
}

/// Shortest path from its first node to its last node, both included.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingPath {
    nodes: Vec<NodeId>,
    legs: Vec<RoutingPathLeg>,
    distance: Weight,
}

impl RoutingPath {
    pub fn new(nodes: Vec<NodeId>, legs: Vec<RoutingPathLeg>, distance: Weight) -> RoutingPath {
        RoutingPath {
            nodes,
            legs,
            distance,
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn legs(&self) -> &[RoutingPathLeg] {
        &self.legs
    }

    pub fn distance(&self) -> Weight {
        self.distance
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Coordinates along the path, for drawing.
    pub fn points(&self, graph: &impl Graph) -> Vec<Point> {
        self.nodes
            .iter()
            .filter_map(|&node_id| graph.node_index(node_id))
            .map(|node| *graph.node_point(node))
            .collect()
    }
}
