use clap::Args;
use roadpath_routing::{location_index::LocationIndex, point::Point, road_graph::RoadGraph};

#[derive(Args)]
pub struct NearestArgs {
    #[arg(short, long, allow_negative_numbers = true)]
    x: f64,

    #[arg(short, long, allow_negative_numbers = true)]
    y: f64,
}

pub fn run(graph: &RoadGraph, args: NearestArgs) -> anyhow::Result<()> {
    let index = LocationIndex::build_from_graph(graph);

    let snap = index
        .snap(&Point::new(args.x, args.y))
        .ok_or_else(|| anyhow::anyhow!("The graph has no nodes"))?;

    println!(
        "node {} at ({}, {}), distance {}",
        snap.node_id(),
        snap.coordinates().x,
        snap.coordinates().y,
        snap.distance()
    );

    Ok(())
}
