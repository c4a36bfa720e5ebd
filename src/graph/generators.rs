use crate::graph::{EdgeMode, GraphStore};
use crate::Result;
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Generates a random graph with roughly `edge_factor * n` edges
/// Weights are drawn uniformly from `1.0..100.0`; self-loops are skipped.
/// The same seed always yields the same graph.
pub fn generate_random(
    n: usize,
    edge_factor: f64,
    mode: EdgeMode,
    seed: u64,
) -> Result<GraphStore<OrderedFloat<f64>>> {
    let mut graph = GraphStore::new(n, mode)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let num_edges = (edge_factor * n as f64) as usize;
    for _ in 0..num_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            let weight = OrderedFloat(rng.gen_range(1.0..100.0));
            graph.add_edge(u, v, weight)?;
        }
    }

    Ok(graph)
}

/// Generates a `width` x `height` grid with 4-connectivity and unit weights
/// Vertex `(x, y)` has index `y * width + x`. In directed mode both directions
/// are inserted so the grid stays fully connected.
pub fn generate_grid(
    width: usize,
    height: usize,
    mode: EdgeMode,
) -> Result<GraphStore<OrderedFloat<f64>>> {
    let mut graph = GraphStore::new(width * height, mode)?;
    let index = |x: usize, y: usize| y * width + x;

    for y in 0..height {
        for x in 0..width {
            let current = index(x, y);
            let mut right_and_down = Vec::with_capacity(2);
            if x + 1 < width {
                right_and_down.push(index(x + 1, y));
            }
            if y + 1 < height {
                right_and_down.push(index(x, y + 1));
            }

            for neighbor in right_and_down {
                graph.add_edge(current, neighbor, OrderedFloat(1.0))?;
                if mode == EdgeMode::Directed {
                    graph.add_edge(neighbor, current, OrderedFloat(1.0))?;
                }
            }
        }
    }

    Ok(graph)
}

/// Generates a random geometric graph in the unit square
/// Points closer than `r` are connected with their Euclidean distance as weight.
pub fn generate_geometric(
    n: usize,
    r: f64,
    seed: u64,
) -> Result<GraphStore<OrderedFloat<f64>>> {
    let mut graph = GraphStore::new(n, EdgeMode::Undirected)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();

    for i in 0..n {
        for j in (i + 1)..n {
            let (x1, y1) = points[i];
            let (x2, y2) = points[j];
            let dist = ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt();
            if dist <= r {
                graph.add_edge(i, j, OrderedFloat(dist))?;
            }
        }
    }

    Ok(graph)
}
