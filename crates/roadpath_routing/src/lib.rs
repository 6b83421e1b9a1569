pub mod constants;
pub mod error;
pub mod graph;
pub mod graph_edge;
pub mod graph_file;
pub mod location_index;
pub mod point;
pub mod query;
pub mod road_graph;
pub mod routing;
pub mod snap;
mod timer;
pub mod types;

#[cfg(test)]
mod test_graph_utils;
