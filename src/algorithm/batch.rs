use std::fmt::Debug;
use log::info;
use num_traits::{Float, Zero};
use rayon::prelude::*;

use crate::algorithm::stepwise::StepwiseDijkstra;
use crate::algorithm::ShortestPathResult;
use crate::graph::Graph;
use crate::{Error, Result};

/// Runs one independent single-source engine per entry of `sources`
///
/// All engines share `graph` read-only and own their run state, so they are
/// stepped in parallel. Results come back in the order of `sources`. Sources
/// are checked before any engine starts; the first invalid one is reported.
pub fn run_from_sources<W, G>(graph: &G, sources: &[usize]) -> Result<Vec<ShortestPathResult<W>>>
where
    W: Float + Zero + Debug + Copy + Ord + Send + Sync,
    G: Graph<W> + Sync,
{
    if let Some(&bad) = sources.iter().find(|&&s| !graph.has_vertex(s)) {
        return Err(Error::VertexOutOfRange(bad));
    }
    info!("running {} independent engines in parallel", sources.len());

    sources
        .par_iter()
        .map(|&source| {
            StepwiseDijkstra::initialize(graph, source).map(StepwiseDijkstra::into_result)
        })
        .collect()
}
