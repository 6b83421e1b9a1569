use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use roadpath_routing::{
    query::{
        query_coordinator::{PublishedPath, QueryCoordinator},
        selection::QueryState,
    },
    road_graph::RoadGraph,
};
use tracing::warn;

use crate::parsers::{self, InteractiveCommand};
use crate::route::print_path;

#[derive(Args)]
pub struct InteractiveArgs {
    /// How long to wait for a path after a pick (e.g. "2s", "PT1M", "500")
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "5s")]
    wait: jiff::SignedDuration,

    /// Prints every leg of the path
    #[arg(short, long)]
    legs: bool,
}

fn print_published(published: &PublishedPath, legs: bool) {
    match published.result() {
        Ok(path) => print_path(path, legs),
        Err(error) => println!("{}", error),
    }
}

fn show(coordinator: &QueryCoordinator, legs: bool) {
    let selection = coordinator.selection();
    let nodes: Vec<String> = selection.nodes().iter().map(|n| n.to_string()).collect();
    println!(
        "state: {:?}, selection: [{}]",
        coordinator.state(),
        nodes.join(", ")
    );

    if let Some(published) = coordinator.latest_path() {
        print_published(&published, legs);
    }
}

fn await_path(coordinator: &QueryCoordinator, wait: Duration, legs: bool) {
    match coordinator.state() {
        QueryState::AwaitingSecond => println!("pick the end node"),
        QueryState::Computing => match coordinator.wait_for_ready(wait) {
            Some(published) => print_published(&published, legs),
            None => println!("still computing, use `show` to check again"),
        },
        QueryState::Idle | QueryState::Ready => {}
    }
}

pub fn run(graph: RoadGraph, args: InteractiveArgs) -> anyhow::Result<()> {
    let wait = Duration::try_from(args.wait)?;
    let coordinator = QueryCoordinator::new(Arc::new(graph))?;

    println!("commands: pick <id>, click <x> <y>, reset, show, quit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        print!("> ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match parsers::parse_command(&line) {
            Ok(command) => command,
            Err(error) => {
                warn!("{}", error);
                continue;
            }
        };

        match command {
            InteractiveCommand::Pick(node_id) => match coordinator.select_node(node_id) {
                Ok(_) => await_path(&coordinator, wait, args.legs),
                Err(error) => warn!("{}", error),
            },
            InteractiveCommand::Click(point) => match coordinator.select_point(&point) {
                Some(snap) => {
                    println!("snapped to node {} ({})", snap.node_id(), snap.distance());
                    await_path(&coordinator, wait, args.legs);
                }
                None => warn!("The graph has no nodes"),
            },
            InteractiveCommand::Reset => coordinator.reset(),
            InteractiveCommand::Show => show(&coordinator, args.legs),
            InteractiveCommand::Quit => break,
        }
    }

    Ok(())
}
