use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::DEFAULT_EDGE_WEIGHT;
use crate::error::GraphFileError;
use crate::point::Point;
use crate::road_graph::RoadGraph;
use crate::types::{NodeId, Weight};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    #[serde(alias = "longitude")]
    pub x: f64,
    #[serde(alias = "latitude")]
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArc {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default, alias = "weight", skip_serializing_if = "Option::is_none")]
    pub length: Option<Weight>,
}

impl RawArc {
    pub fn weight(&self) -> Weight {
        self.length.unwrap_or(DEFAULT_EDGE_WEIGHT)
    }
}

/// Map document as stored on disk: a node list and a directed arc list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGraph {
    pub nodes: Vec<RawNode>,
    #[serde(default, alias = "edges")]
    pub arcs: Vec<RawArc>,
}

impl RawGraph {
    pub fn from_reader<R: Read>(reader: R) -> Result<RawGraph, GraphFileError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn into_graph(self) -> Result<RoadGraph, GraphFileError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|node| (node.id, Point::new(node.x, node.y)));
        let arcs = self
            .arcs
            .iter()
            .map(|arc| (arc.from, arc.to, arc.weight()));

        Ok(RoadGraph::new(nodes, arcs)?)
    }
}

pub fn read_graph_file(path: impl AsRef<Path>) -> Result<RoadGraph, GraphFileError> {
    let path = path.as_ref();
    info!("Reading graph from {}", path.display());

    let file = File::open(path)?;
    RawGraph::from_reader(BufReader::new(file))?.into_graph()
}
