use crate::types::{EdgeId, NodeIndex, Weight};

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    id: EdgeId,
    start_node: NodeIndex,
    end_node: NodeIndex,
    weight: Weight,
}

impl GraphEdge {
    pub fn new(id: EdgeId, start_node: NodeIndex, end_node: NodeIndex, weight: Weight) -> Self {
        GraphEdge {
            id,
            start_node,
            end_node,
            weight,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn start_node(&self) -> NodeIndex {
        self.start_node
    }

    pub fn end_node(&self) -> NodeIndex {
        self.end_node
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }
}
