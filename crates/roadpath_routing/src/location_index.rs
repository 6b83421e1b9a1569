use rstar::primitives::GeomWithData;
use rstar::{RStarInsertionStrategy, RTree, RTreeParams};
use tracing::info;

use crate::graph::Graph;
use crate::point::Point;
use crate::snap::Snap;
use crate::types::{NodeId, NodeIndex};

#[derive(Debug, Clone, Copy)]
struct IndexedData {
    node: NodeIndex,
    node_id: NodeId,
}

type LocationIndexObject = GeomWithData<Point, IndexedData>;

struct LocationIndexTreeParams;

impl RTreeParams for LocationIndexTreeParams {
    type DefaultInsertionStrategy = RStarInsertionStrategy;

    const MAX_SIZE: usize = 64;
    const MIN_SIZE: usize = 28;
    const REINSERTION_COUNT: usize = 5;
}

/// Nearest node lookup over the node coordinates of a graph.
///
/// The index is built once and never updated, a new graph needs a new index.
pub struct LocationIndex {
    tree: RTree<LocationIndexObject, LocationIndexTreeParams>,
}

impl LocationIndex {
    pub fn build_from_graph(graph: &impl Graph) -> LocationIndex {
        let tree: RTree<LocationIndexObject, LocationIndexTreeParams> =
            RTree::bulk_load_with_params(
                (0..graph.node_count())
                    .map(|node| {
                        LocationIndexObject::new(
                            *graph.node_point(node),
                            IndexedData {
                                node,
                                node_id: graph.node_id(node),
                            },
                        )
                    })
                    .collect(),
            );

        info!("Built location index over {} nodes", tree.size());

        LocationIndex { tree }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Snaps `coordinates` to the closest node. `None` only when the graph has no nodes.
    ///
    /// Among nodes at exactly the same distance the one with the smallest id wins,
    /// which is what a linear scan in ascending id order returns.
    pub fn snap(&self, coordinates: &Point) -> Option<Snap> {
        let query: [f64; 2] = coordinates.into();
        let mut neighbors = self.tree.nearest_neighbor_iter_with_distance_2(&query);

        let (first, min_distance_2) = neighbors.next()?;

        let closest = neighbors
            .take_while(|(_, distance_2)| *distance_2 == min_distance_2)
            .map(|(neighbor, _)| neighbor)
            .fold(first, |best, neighbor| {
                if neighbor.data.node < best.data.node {
                    neighbor
                } else {
                    best
                }
            });

        Some(Snap::new(
            closest.data.node_id,
            *closest.geom(),
            min_distance_2.sqrt(),
        ))
    }

    pub fn closest_node(&self, coordinates: &Point) -> Option<NodeId> {
        self.snap(coordinates).map(|snap| snap.node_id())
    }
}
