use crate::graph::traits::Graph;
use crate::{Error, Result};
use log::trace;
use num_traits::{Float, NumCast, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Whether an inserted edge is traversable one way or both ways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMode {
    /// `(a, b, w)` only lets the search move from `a` to `b`
    Directed,
    /// `(a, b, w)` is mirrored into `b`'s adjacency as `(a, w)`
    Undirected,
}

/// An edge as it was inserted by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W> {
    pub from: usize,
    pub to: usize,
    pub weight: W,
}

/// Append-only adjacency-list graph with a fixed vertex count
#[derive(Debug, Clone)]
pub struct GraphStore<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Directedness chosen at construction
    mode: EdgeMode,

    /// Adjacency for each vertex: vertex_id -> [(neighbor, weight)]
    adjacency: Vec<Vec<(usize, W)>>,

    /// Inserted edges in insertion order
    edges: Vec<Edge<W>>,

    /// Largest accepted weight; any simple path of these stays finite
    max_weight: W,
}

impl<W> GraphStore<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a store with `vertices` vertices and no edges
    ///
    /// Fails with [`Error::InvalidSize`] for zero vertices or when the
    /// adjacency table cannot be allocated.
    pub fn new(vertices: usize, mode: EdgeMode) -> Result<Self> {
        if vertices == 0 {
            return Err(Error::InvalidSize);
        }

        let mut adjacency = Vec::new();
        adjacency
            .try_reserve_exact(vertices)
            .map_err(|_| Error::InvalidSize)?;
        adjacency.resize_with(vertices, Vec::new);

        let max_weight = <W as NumCast>::from(vertices)
            .map(|n| W::max_value() / n)
            .unwrap_or_else(W::max_value);

        Ok(GraphStore {
            mode,
            adjacency,
            edges: Vec::new(),
            max_weight,
        })
    }

    pub fn mode(&self) -> EdgeMode {
        self.mode
    }

    /// Largest weight `add_edge` accepts: the type's maximum divided by the
    /// vertex count
    pub fn max_weight(&self) -> W {
        self.max_weight
    }

    /// Appends an edge, mirroring it when the store is undirected
    ///
    /// Nothing is mutated unless both endpoints are in range and the weight is
    /// finite, non-negative and at most [`GraphStore::max_weight`].
    pub fn add_edge(&mut self, from: usize, to: usize, weight: W) -> Result<()> {
        let n = self.adjacency.len();
        if from >= n {
            return Err(Error::VertexOutOfRange(from));
        }
        if to >= n {
            return Err(Error::VertexOutOfRange(to));
        }
        if !weight.is_finite() || weight < W::zero() {
            return Err(Error::NegativeWeight(weight.to_f64().unwrap_or(f64::NAN)));
        }
        if weight > self.max_weight {
            return Err(Error::WeightTooLarge(weight.to_f64().unwrap_or(f64::INFINITY)));
        }

        self.adjacency[from].push((to, weight));
        if self.mode == EdgeMode::Undirected {
            self.adjacency[to].push((from, weight));
        }
        self.edges.push(Edge { from, to, weight });
        trace!("added edge {} -> {} ({:?}, {:?})", from, to, weight, self.mode);

        Ok(())
    }

    /// Returns the adjacency of `vertex` in insertion order
    pub fn neighbors(&self, vertex: usize) -> Result<&[(usize, W)]> {
        self.adjacency
            .get(vertex)
            .map(|edges| edges.as_slice())
            .ok_or(Error::VertexOutOfRange(vertex))
    }

    /// Inserted edges in insertion order, one per `add_edge` call
    pub fn edges(&self) -> &[Edge<W>] {
        &self.edges
    }
}

impl<W> Graph<W> for GraphStore<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn adjacency(&self, vertex: usize) -> &[(usize, W)] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    fn is_directed(&self) -> bool {
        self.mode == EdgeMode::Directed
    }
}
