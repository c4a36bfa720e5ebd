use std::env;
use std::thread;
use std::time::Duration;

use log::info;
use stepwise_sssp::graph::generators::generate_random;
use stepwise_sssp::graph::{EdgeMode, Graph};
use stepwise_sssp::{RunStatus, StepwiseDijkstra};

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    args.get(index).and_then(|a| a.parse().ok()).unwrap_or(default)
}

// Usage: step_demo [vertices] [seed] [source] [delay_ms]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let vertices: usize = parse_arg(&args, 1, 8);
    let seed: u64 = parse_arg(&args, 2, 42);
    let source: usize = parse_arg(&args, 3, 0);
    let delay_ms: u64 = parse_arg(&args, 4, 500);

    let graph = generate_random(vertices, 2.0, EdgeMode::Undirected, seed)?;
    info!("generated graph: {} vertices, {} edges", graph.vertex_count(), graph.edge_count());
    for edge in graph.edges() {
        println!("edge {} - {} ({:.1})", edge.from, edge.to, edge.weight.into_inner());
    }

    let mut engine = StepwiseDijkstra::initialize(&graph, source)?;
    for (i, report) in engine.steps().enumerate() {
        match report.settled_vertex {
            Some(v) => println!("step {}: settled {}", i + 1, v),
            None => println!("step {}: nothing settled", i + 1),
        }
        for edge in &report.relaxed_edges {
            println!("    relaxed {} -> {} ({:.1})", edge.from, edge.to, edge.weight.into_inner());
        }
        if report.status != RunStatus::Done {
            thread::sleep(Duration::from_millis(delay_ms));
        }
    }

    let snapshot = engine.snapshot();
    println!("\nsettle order: {:?}", snapshot.settle_order);
    for target in 0..graph.vertex_count() {
        match engine.path_to(target) {
            Ok(path) => println!(
                "vertex {}: distance = {:.1}, path = {:?}",
                target,
                path.total_distance.into_inner(),
                path.vertices
            ),
            Err(err) => println!("vertex {}: {}", target, err),
        }
    }

    Ok(())
}
