use std::fmt::Debug;
use num_traits::{Float, Zero};

use crate::algorithm::stepwise::StepwiseDijkstra;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::Graph;
use crate::Result;

/// Classic Dijkstra's algorithm, run as a stepwise engine driven to the end
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        let engine = StepwiseDijkstra::initialize(graph, source)?;
        Ok(engine.into_result())
    }
}
