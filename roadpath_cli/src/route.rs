use clap::Args;
use roadpath_routing::{
    road_graph::RoadGraph,
    routing::{dijkstra::shortest_path, routing_path::RoutingPath},
    timer_debug,
    types::NodeId,
};

#[derive(Args)]
pub struct RouteArgs {
    /// Start node id
    #[arg(short, long)]
    from: u64,

    /// End node id
    #[arg(short, long)]
    to: u64,

    /// Prints every leg of the path
    #[arg(short, long)]
    legs: bool,
}

pub fn print_path(path: &RoutingPath, legs: bool) {
    let nodes: Vec<String> = path.nodes().iter().map(|node| node.to_string()).collect();
    println!("distance: {}", path.distance());
    println!("path: {}", nodes.join(" -> "));

    if legs {
        for leg in path.legs() {
            println!("  {} -> {}: {}", leg.from(), leg.to(), leg.weight());
        }
    }
}

pub fn run(graph: &RoadGraph, args: RouteArgs) -> anyhow::Result<()> {
    let path = timer_debug!(
        "Shortest path",
        shortest_path(graph, NodeId::new(args.from), NodeId::new(args.to))
    )?;

    print_path(&path, args.legs);

    Ok(())
}
