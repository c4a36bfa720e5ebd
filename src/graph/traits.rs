use std::fmt::Debug;
use std::sync::Arc;
use num_traits::{Float, Zero};

/// Trait representing a read-only weighted graph with dense vertex ids `0..n`
pub trait Graph<W>: Debug
where
    W: Float + Zero + Debug + Copy,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of inserted edges (mirrored entries count once)
    fn edge_count(&self) -> usize;

    /// Returns the adjacency of a vertex in insertion order, empty for unknown vertices
    fn adjacency(&self, vertex: usize) -> &[(usize, W)];

    /// Returns true if the edges of this graph are traversed one way only
    fn is_directed(&self) -> bool;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count()
    }
}

impl<W, G> Graph<W> for &G
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W> + ?Sized,
{
    fn vertex_count(&self) -> usize {
        (**self).vertex_count()
    }

    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }

    fn adjacency(&self, vertex: usize) -> &[(usize, W)] {
        (**self).adjacency(vertex)
    }

    fn is_directed(&self) -> bool {
        (**self).is_directed()
    }
}

impl<W, G> Graph<W> for Arc<G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W> + ?Sized,
{
    fn vertex_count(&self) -> usize {
        (**self).vertex_count()
    }

    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }

    fn adjacency(&self, vertex: usize) -> &[(usize, W)] {
        (**self).adjacency(vertex)
    }

    fn is_directed(&self) -> bool {
        (**self).is_directed()
    }
}
