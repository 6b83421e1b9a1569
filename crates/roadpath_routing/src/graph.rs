use crate::{
    graph_edge::GraphEdge,
    point::Point,
    types::{EdgeId, NodeId, NodeIndex},
};

/// Read-only view over a directed graph, addressed by dense node indices.
pub trait Graph {
    type EdgeIterator<'a>: Iterator<Item = EdgeId>
    where
        Self: 'a;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Outgoing edges of `node`, in insertion order.
    fn node_edges_iter(&self, node: NodeIndex) -> Self::EdgeIterator<'_>;

    fn edge(&self, edge: EdgeId) -> &GraphEdge;

    fn node_point(&self, node: NodeIndex) -> &Point;

    fn node_id(&self, node: NodeIndex) -> NodeId;

    fn node_index(&self, node_id: NodeId) -> Option<NodeIndex>;
}
