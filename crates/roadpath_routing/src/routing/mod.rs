pub mod dijkstra;
pub mod routing_path;
mod routing_path_builder;
pub mod shortest_path_algorithm;
