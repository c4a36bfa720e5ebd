use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// Min-priority frontier over dense vertex ids with lazy deletion
///
/// A vertex may be pushed several times with improving priorities; old entries
/// stay in the heap and are reported by [`Frontier::pop`] like any other. Once
/// a vertex is retired its remaining entries no longer count as live, so
/// [`Frontier::has_live`] answers "is there anything useful left" in O(1).
///
/// Equal priorities pop in ascending vertex order.
#[derive(Debug)]
pub struct Frontier<P>
where
    P: Copy + Debug + Ord,
{
    /// The underlying binary heap
    heap: BinaryHeap<Reverse<(P, usize)>>,

    /// Entries currently in the heap for each vertex
    pending: Vec<usize>,

    /// Vertices whose entries are all stale
    retired: Vec<bool>,

    /// Heap entries belonging to vertices that are not retired
    live: usize,
}

impl<P> Frontier<P>
where
    P: Copy + Debug + Ord,
{
    /// Creates an empty frontier for vertices `0..vertices`
    pub fn new(vertices: usize) -> Self {
        Frontier {
            heap: BinaryHeap::new(),
            pending: vec![0; vertices],
            retired: vec![false; vertices],
            live: 0,
        }
    }

    /// Returns true if some entry belongs to a vertex that is not retired
    pub fn has_live(&self) -> bool {
        self.live > 0
    }

    /// Pushes a candidate; retired vertices are ignored
    pub fn push(&mut self, vertex: usize, priority: P) {
        if self.retired[vertex] {
            return;
        }
        self.pending[vertex] += 1;
        self.live += 1;
        self.heap.push(Reverse((priority, vertex)));
    }

    /// Removes the entry with the smallest priority, ties broken by vertex id
    pub fn pop(&mut self) -> Option<(usize, P)> {
        let Reverse((priority, vertex)) = self.heap.pop()?;
        self.pending[vertex] -= 1;
        if !self.retired[vertex] {
            self.live -= 1;
        }
        Some((vertex, priority))
    }

    /// Marks every remaining entry of `vertex` as stale
    pub fn retire(&mut self, vertex: usize) {
        if !self.retired[vertex] {
            self.retired[vertex] = true;
            self.live -= self.pending[vertex];
        }
    }
}
