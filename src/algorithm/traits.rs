use std::fmt::Debug;
use log::warn;
use num_traits::{Float, Zero};
use crate::graph::Graph;
use crate::{Error, Result};

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Distances from source to each vertex, `None` when unreachable
    pub distances: Vec<Option<W>>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

impl<W> ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Number of vertices with a finite distance
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    /// Walks the predecessor tree from `target` back to the source
    pub fn path_to(&self, target: usize) -> Result<Vec<usize>> {
        if target >= self.predecessors.len() {
            return Err(Error::VertexOutOfRange(target));
        }
        if self.distances[target].is_none() {
            return Err(Error::Unreachable(target));
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessors[current].ok_or(Error::Unreachable(target))?;
            path.push(current);

            if path.len() > self.predecessors.len() {
                warn!("predecessor chain from {} does not reach the source", target);
                return Err(Error::Unreachable(target));
            }
        }
        path.reverse();

        Ok(path)
    }

    /// Paths to every reachable vertex, ordered by target
    pub fn all_paths(&self) -> Vec<Vec<usize>> {
        (0..self.distances.len())
            .filter_map(|target| self.path_to(target).ok())
            .collect()
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Result<Vec<usize>> {
        result.path_to(target)
    }
}
