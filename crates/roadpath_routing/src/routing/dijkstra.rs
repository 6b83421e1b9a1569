use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::FxHashMap;
use tracing::debug;

use crate::constants::{INVALID_EDGE, INVALID_NODE, MAX_WEIGHT};
use crate::error::RoutingError;
use crate::graph::Graph;
use crate::types::{EdgeId, NodeId, NodeIndex, Weight};

use super::routing_path::RoutingPath;
use super::routing_path_builder::build_routing_path;
use super::shortest_path_algorithm::ShortestPathAlgorithm;

#[derive(Copy, Clone, Debug)]
struct HeapItem {
    node: NodeIndex,
    weight: Weight,

    /// Push counter, entries with equal weight leave the heap in insertion order
    sequence: u64,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &HeapItem) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip weight and sequence to make this a min-heap
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

struct NodeData {
    settled: bool,
    weight: Weight,
    parent: NodeIndex,
    edge_id: EdgeId, // Edge ID from parent to current node
}

impl NodeData {
    fn new() -> Self {
        NodeData {
            settled: false,
            weight: MAX_WEIGHT,
            parent: INVALID_NODE,
            edge_id: INVALID_EDGE,
        }
    }
}

#[derive(Default, Debug)]
struct SearchStatistics {
    settled: usize,
    relaxed: usize,
}

/// Label-setting single source search.
///
/// Nothing is kept between two calls to [`ShortestPathAlgorithm::calc_path`]: each
/// query starts from an empty heap and empty labels.
#[derive(Default)]
pub struct Dijkstra {
    heap: BinaryHeap<HeapItem>,
    // Only the nodes reached by the search get an entry
    data: FxHashMap<NodeIndex, NodeData>,
    sequence: u64,
}

impl Dijkstra {
    pub fn new(graph: &impl Graph) -> Self {
        let capacity = graph.node_count().min(10_000);
        Dijkstra {
            heap: BinaryHeap::with_capacity(1024),
            data: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            sequence: 0,
        }
    }

    fn reset(&mut self) {
        self.heap.clear();
        self.data.clear();
        self.sequence = 0;
    }

    fn init(&mut self, start: NodeIndex) {
        self.update_node_data(start, 0.0, INVALID_NODE, INVALID_EDGE);
        self.push(start, 0.0);
    }

    fn push(&mut self, node: NodeIndex, weight: Weight) {
        self.heap.push(HeapItem {
            node,
            weight,
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    fn update_node_data(
        &mut self,
        node: NodeIndex,
        weight: Weight,
        parent: NodeIndex,
        edge_id: EdgeId,
    ) {
        let data = self.data.entry(node).or_insert_with(NodeData::new);
        data.weight = weight;
        data.parent = parent;
        data.edge_id = edge_id;
    }

    fn set_settled(&mut self, node: NodeIndex) {
        self.data.entry(node).or_insert_with(NodeData::new).settled = true;
    }

    #[inline(always)]
    fn is_settled(&self, node: NodeIndex) -> bool {
        self.data.get(&node).is_some_and(|data| data.settled)
    }

    #[inline(always)]
    fn current_shortest_weight(&self, node: NodeIndex) -> Weight {
        self.data.get(&node).map_or(MAX_WEIGHT, |data| data.weight)
    }

    fn build_path(
        &self,
        graph: &impl Graph,
        start: NodeIndex,
        end: NodeIndex,
    ) -> Option<RoutingPath> {
        if !self.is_settled(end) {
            return None;
        }

        let mut edges: Vec<EdgeId> = Vec::with_capacity(32);
        let mut node = end;

        while let Some(node_data) = self.data.get(&node) {
            if node_data.parent == INVALID_NODE {
                break;
            }
            edges.push(node_data.edge_id);
            node = node_data.parent;
        }

        // The predecessor chain of a settled node always leads back to the start
        if node != start {
            return None;
        }

        edges.reverse();

        Some(build_routing_path(
            graph,
            start,
            &edges,
            self.current_shortest_weight(end),
        ))
    }
}

impl ShortestPathAlgorithm for Dijkstra {
    fn calc_path(
        &mut self,
        graph: &impl Graph,
        start: NodeId,
        end: NodeId,
    ) -> Result<RoutingPath, RoutingError> {
        let start_node = graph
            .node_index(start)
            .ok_or(RoutingError::UnknownNode(start))?;
        let end_node = graph
            .node_index(end)
            .ok_or(RoutingError::UnknownNode(end))?;

        self.reset();
        self.init(start_node);

        let mut statistics = SearchStatistics::default();

        while let Some(HeapItem { node, .. }) = self.heap.pop() {
            // Stale entry of an already settled node
            if self.is_settled(node) {
                continue;
            }

            self.set_settled(node);
            statistics.settled += 1;

            // The label of a settled node is final
            if node == end_node {
                break;
            }

            let weight = self.current_shortest_weight(node);

            for edge_id in graph.node_edges_iter(node) {
                let edge = graph.edge(edge_id);
                let adj_node = edge.end_node();

                if self.is_settled(adj_node) {
                    continue;
                }

                let next_weight = weight + edge.weight();

                if next_weight < self.current_shortest_weight(adj_node) {
                    statistics.relaxed += 1;
                    self.update_node_data(adj_node, next_weight, node, edge_id);
                    self.push(adj_node, next_weight);
                }
            }
        }

        debug!(
            "Dijkstra {} -> {}: settled {} nodes, relaxed {} edges, pushed {} heap items",
            start, end, statistics.settled, statistics.relaxed, self.sequence
        );

        self.build_path(graph, start_node, end_node)
            .ok_or(RoutingError::NoPathFound { start, end })
    }
}

/// Runs a fresh [`Dijkstra`] search between two nodes.
pub fn shortest_path(
    graph: &impl Graph,
    start: NodeId,
    end: NodeId,
) -> Result<RoutingPath, RoutingError> {
    Dijkstra::new(graph).calc_path(graph, start, end)
}
