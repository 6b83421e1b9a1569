use fxhash::FxHashMap;
use tracing::info;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::graph_edge::GraphEdge;
use crate::point::{Bounds, Point};
use crate::types::{EdgeId, NodeId, NodeIndex, Weight};

/// Immutable directed road network.
///
/// Nodes are stored in ascending [`NodeId`] order, which is also the order every
/// deterministic tie-break of the crate relies on. Edges keep their input order
/// and the adjacency list of a node holds its outgoing edge ids in that order.
#[derive(Debug, Default)]
pub struct RoadGraph {
    node_ids: Vec<NodeId>,
    points: Vec<Point>,
    index: FxHashMap<NodeId, NodeIndex>,
    edges: Vec<GraphEdge>,
    adjacency_list: Vec<Vec<EdgeId>>,
}

impl RoadGraph {
    pub fn new<N, E>(nodes: N, edges: E) -> Result<RoadGraph, GraphError>
    where
        N: IntoIterator<Item = (NodeId, Point)>,
        E: IntoIterator<Item = (NodeId, NodeId, Weight)>,
    {
        let mut nodes: Vec<(NodeId, Point)> = nodes.into_iter().collect();
        nodes.sort_by_key(|(id, _)| *id);

        if let Some(pair) = nodes.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(GraphError::DuplicateNode(pair[0].0));
        }

        let (node_ids, points): (Vec<NodeId>, Vec<Point>) = nodes.into_iter().unzip();
        let index: FxHashMap<NodeId, NodeIndex> = node_ids
            .iter()
            .enumerate()
            .map(|(node_index, id)| (*id, node_index))
            .collect();

        let mut graph = RoadGraph {
            adjacency_list: vec![vec![]; node_ids.len()],
            node_ids,
            points,
            index,
            edges: Vec::new(),
        };

        for (edge_index, (from, to, weight)) in edges.into_iter().enumerate() {
            let start_node = graph
                .node_index(from)
                .ok_or(GraphError::MalformedGraph {
                    edge_index,
                    node: from,
                })?;
            let end_node = graph.node_index(to).ok_or(GraphError::MalformedGraph {
                edge_index,
                node: to,
            })?;

            if weight.is_nan() || weight < 0.0 {
                return Err(GraphError::InvalidWeight { edge_index, weight });
            }

            graph.add_edge(start_node, end_node, weight);
        }

        info!(
            "Built road graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(graph)
    }

    fn add_edge(&mut self, from_node: NodeIndex, to_node: NodeIndex, weight: Weight) {
        let edge_id = self.edges.len();
        self.edges
            .push(GraphEdge::new(edge_id, from_node, to_node, weight));
        self.adjacency_list[from_node].push(edge_id);
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.index.contains_key(&node_id)
    }

    /// Coordinates of a node, `None` if the id is unknown.
    pub fn point(&self, node_id: NodeId) -> Option<&Point> {
        self.node_index(node_id).map(|node| &self.points[node])
    }

    /// All node ids in canonical (ascending) order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Point)> + '_ {
        self.node_ids.iter().copied().zip(self.points.iter())
    }

    /// All edges as `(source, target, weight)`, in input order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, Weight)> + '_ {
        self.edges.iter().map(|edge| {
            (
                self.node_ids[edge.start_node()],
                self.node_ids[edge.end_node()],
                edge.weight(),
            )
        })
    }

    /// Outgoing `(neighbor, weight)` pairs of a node, `None` if the id is unknown.
    pub fn outgoing(
        &self,
        node_id: NodeId,
    ) -> Option<impl Iterator<Item = (NodeId, Weight)> + '_> {
        let node = self.node_index(node_id)?;

        Some(self.adjacency_list[node].iter().map(|&edge_id| {
            let edge = &self.edges[edge_id];
            (self.node_ids[edge.end_node()], edge.weight())
        }))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }
}

impl Graph for RoadGraph {
    type EdgeIterator<'a> = std::iter::Copied<std::slice::Iter<'a, EdgeId>>;

    fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_edges_iter(&self, node: NodeIndex) -> Self::EdgeIterator<'_> {
        self.adjacency_list[node].iter().copied()
    }

    fn edge(&self, edge: EdgeId) -> &GraphEdge {
        &self.edges[edge]
    }

    fn node_point(&self, node: NodeIndex) -> &Point {
        &self.points[node]
    }

    fn node_id(&self, node: NodeIndex) -> NodeId {
        self.node_ids[node]
    }

    fn node_index(&self, node_id: NodeId) -> Option<NodeIndex> {
        self.index.get(&node_id).copied()
    }
}
