use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use roadpath_routing::{graph_file::read_graph_file, road_graph::RoadGraph};

use crate::{interactive::InteractiveArgs, nearest::NearestArgs, route::RouteArgs};

mod info;
mod interactive;
mod nearest;
mod parsers;
mod route;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Road graph to load (JSON with `nodes` and `arcs`)
    #[arg(short, long, env = "ROADPATH_GRAPH", global = true)]
    graph: Option<PathBuf>,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints node and edge counts and the extent of the graph
    Info,
    /// Computes the shortest path between two nodes
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
    /// Finds the node closest to a coordinate
    Nearest {
        #[command(flatten)]
        args: NearestArgs,
    },
    /// Reads picks from stdin and computes paths in the background
    #[command(visible_alias = "i")]
    Interactive {
        #[command(flatten)]
        args: InteractiveArgs,
    },
}

fn load_graph(path: Option<PathBuf>) -> anyhow::Result<RoadGraph> {
    let path = path.context("No graph given, use --graph or set ROADPATH_GRAPH")?;
    read_graph_file(&path).with_context(|| format!("Failed to load graph {}", path.display()))
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let graph = load_graph(cli.graph)?;

    match cli.command {
        Commands::Info => info::run(&graph),
        Commands::Route { args } => route::run(&graph, args)?,
        Commands::Nearest { args } => nearest::run(&graph, args)?,
        Commands::Interactive { args } => interactive::run(graph, args)?,
    }

    Ok(())
}
