use crate::{point::Point, types::NodeId};

/// Result of resolving an arbitrary point to the closest node of the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    node_id: NodeId,
    coordinates: Point,
    distance: f64,
}

impl Snap {
    pub fn new(node_id: NodeId, coordinates: Point, distance: f64) -> Self {
        Snap {
            node_id,
            coordinates,
            distance,
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Coordinates of the snapped node.
    pub fn coordinates(&self) -> &Point {
        &self.coordinates
    }

    /// Euclidean distance between the query point and the snapped node.
    pub fn distance(&self) -> f64 {
        self.distance
    }
}
