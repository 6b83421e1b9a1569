use roadpath_routing::{graph::Graph, road_graph::RoadGraph};

pub fn run(graph: &RoadGraph) {
    println!("nodes: {}", graph.node_count());
    println!("edges: {}", graph.edge_count());

    if let Some(bounds) = graph.bounds() {
        println!(
            "bounds: ({}, {}) - ({}, {}), {} x {}",
            bounds.min.x,
            bounds.min.y,
            bounds.max.x,
            bounds.max.y,
            bounds.width(),
            bounds.height()
        );
    }
}
