use std::fmt::Debug;
use log::{debug, info, trace, warn};
use num_traits::{Float, Zero};
use serde::{Deserialize, Serialize};

use crate::algorithm::ShortestPathResult;
use crate::data_structures::Frontier;
use crate::graph::Graph;
use crate::{Error, Result};

/// Lifecycle of a run; `Done` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Ready,
    Running,
    Done,
}

/// An edge whose relaxation improved the distance of its head
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxedEdge<W> {
    pub from: usize,
    pub to: usize,
    pub weight: W,
}

/// What a single call to [`StepwiseDijkstra::step`] did
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport<W> {
    /// Vertex settled by this step, `None` for stale pops and terminal steps
    pub settled_vertex: Option<usize>,
    /// Edges relaxed by this step, in adjacency order
    pub relaxed_edges: Vec<RelaxedEdge<W>>,
    pub status: RunStatus,
}

/// Read-only copy of the run state for renderers
///
/// `None` in `distances` stands for an infinite (not yet reached) distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<W> {
    pub source: usize,
    pub distances: Vec<Option<W>>,
    pub predecessors: Vec<Option<usize>>,
    pub settled: Vec<bool>,
    /// Settled vertices in the order they were settled
    pub settle_order: Vec<usize>,
    /// Edges relaxed by the most recent step
    pub last_relaxed: Vec<RelaxedEdge<W>>,
    /// Current shortest-path tree, one edge per reached vertex except the source
    pub tree_edges: Vec<RelaxedEdge<W>>,
    pub frontier_empty: bool,
    pub status: RunStatus,
    /// Calls to `step` that ran before the run was done
    pub steps: usize,
    /// Successful relaxations over the whole run
    pub relaxations: usize,
}

/// A reconstructed shortest path
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath<W> {
    /// Vertices from the source to the target, both included
    pub vertices: Vec<usize>,
    pub total_distance: W,
}

/// Dijkstra's algorithm advanced one settlement per call
///
/// The engine owns all run state for one `(graph, source)` pair and holds the
/// graph by shared reference (or `Arc`), so the graph cannot change mid-run.
/// To search from another source, build another engine.
#[derive(Debug)]
pub struct StepwiseDijkstra<W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    graph: G,
    source: usize,
    distances: Vec<Option<W>>,
    predecessors: Vec<Option<usize>>,
    /// Weight of the edge from `predecessors[v]` to `v`
    tree_weights: Vec<Option<W>>,
    settled: Vec<bool>,
    settle_order: Vec<usize>,
    frontier: Frontier<W>,
    last_relaxed: Vec<RelaxedEdge<W>>,
    status: RunStatus,
    /// Report handed out again on every call after the run is done
    terminal: Option<StepReport<W>>,
    step_calls: usize,
    relaxations: usize,
}

impl<W, G> StepwiseDijkstra<W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    /// Starts a run from `source` with only the source on the frontier
    pub fn initialize(graph: G, source: usize) -> Result<Self> {
        if !graph.has_vertex(source) {
            return Err(Error::VertexOutOfRange(source));
        }

        let n = graph.vertex_count();
        let mut distances = vec![None; n];
        distances[source] = Some(W::zero());

        let mut frontier = Frontier::new(n);
        frontier.push(source, W::zero());

        info!(
            "initialized run from vertex {} over {} vertices and {} edges",
            source,
            n,
            graph.edge_count()
        );

        Ok(StepwiseDijkstra {
            graph,
            source,
            distances,
            predecessors: vec![None; n],
            tree_weights: vec![None; n],
            settled: vec![false; n],
            settle_order: Vec::new(),
            frontier,
            last_relaxed: Vec::new(),
            status: RunStatus::Ready,
            terminal: None,
            step_calls: 0,
            relaxations: 0,
        })
    }

    /// Settles at most one vertex and relaxes its outgoing edges
    ///
    /// A call that pops a stale frontier entry settles nothing and leaves the
    /// run `Running`. Once the run is `Done` every call returns the same report
    /// without touching any state.
    pub fn step(&mut self) -> StepReport<W> {
        if let Some(report) = &self.terminal {
            return report.clone();
        }
        self.step_calls += 1;

        if !self.frontier.has_live() {
            self.last_relaxed.clear();
            return self.finish(None, Vec::new());
        }
        self.status = RunStatus::Running;

        let (vertex, dist_u) = match self.frontier.pop() {
            Some(entry) => entry,
            None => {
                self.last_relaxed.clear();
                return self.finish(None, Vec::new());
            }
        };

        if self.settled[vertex] {
            trace!("discarding stale frontier entry for vertex {} ({:?})", vertex, dist_u);
            self.last_relaxed.clear();
            return StepReport {
                settled_vertex: None,
                relaxed_edges: Vec::new(),
                status: self.status,
            };
        }

        self.settled[vertex] = true;
        self.settle_order.push(vertex);
        self.frontier.retire(vertex);
        debug!("settled vertex {} at distance {:?}", vertex, dist_u);

        let mut relaxed = Vec::new();
        for &(neighbor, weight) in self.graph.adjacency(vertex) {
            if self.settled[neighbor] {
                continue;
            }

            let new_dist = dist_u + weight;
            if !new_dist.is_finite() {
                warn!("skipping {} -> {}: distance overflows", vertex, neighbor);
                continue;
            }
            let should_update = match self.distances[neighbor] {
                None => true,
                Some(current_dist) => new_dist < current_dist,
            };

            if should_update {
                trace!("relaxed {} -> {}: {:?}", vertex, neighbor, new_dist);
                self.distances[neighbor] = Some(new_dist);
                self.predecessors[neighbor] = Some(vertex);
                self.tree_weights[neighbor] = Some(weight);
                self.frontier.push(neighbor, new_dist);
                relaxed.push(RelaxedEdge { from: vertex, to: neighbor, weight });
            }
        }
        self.relaxations += relaxed.len();
        self.last_relaxed = relaxed.clone();

        if self.frontier.has_live() {
            StepReport {
                settled_vertex: Some(vertex),
                relaxed_edges: relaxed,
                status: self.status,
            }
        } else {
            self.finish(Some(vertex), relaxed)
        }
    }

    fn finish(
        &mut self,
        settled_vertex: Option<usize>,
        relaxed_edges: Vec<RelaxedEdge<W>>,
    ) -> StepReport<W> {
        self.status = RunStatus::Done;
        info!(
            "run from vertex {} done after {} steps: {} of {} vertices settled",
            self.source,
            self.step_calls,
            self.settle_order.len(),
            self.distances.len()
        );

        let report = StepReport {
            settled_vertex,
            relaxed_edges,
            status: RunStatus::Done,
        };
        self.terminal = Some(report.clone());
        report
    }

    /// Iterates over step reports until the terminal one has been yielded
    pub fn steps(&mut self) -> Steps<'_, W, G> {
        Steps {
            engine: self,
            finished: false,
        }
    }

    /// Steps until the run is done and returns how many calls that took
    pub fn run_to_completion(&mut self) -> usize {
        self.steps().count()
    }

    /// Copies the observable state; the frontier is only reported as empty or not
    pub fn snapshot(&self) -> Snapshot<W> {
        Snapshot {
            source: self.source,
            distances: self.distances.clone(),
            predecessors: self.predecessors.clone(),
            settled: self.settled.clone(),
            settle_order: self.settle_order.clone(),
            last_relaxed: self.last_relaxed.clone(),
            tree_edges: self.tree_edges(),
            frontier_empty: !self.frontier.has_live(),
            status: self.status,
            steps: self.step_calls,
            relaxations: self.relaxations,
        }
    }

    /// Shortest path from the source to `target`
    ///
    /// Before the run is done only settled targets can be answered; anything
    /// else fails with [`Error::NotSettled`].
    pub fn path_to(&self, target: usize) -> Result<ShortestPath<W>> {
        if !self.graph.has_vertex(target) {
            return Err(Error::VertexOutOfRange(target));
        }
        if self.status != RunStatus::Done && !self.settled[target] {
            return Err(Error::NotSettled(target));
        }
        let total_distance = self.distances[target].ok_or(Error::Unreachable(target))?;

        let mut vertices = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessors[current].ok_or(Error::Unreachable(target))?;
            vertices.push(current);
            if vertices.len() > self.distances.len() {
                return Err(Error::Unreachable(target));
            }
        }
        vertices.reverse();

        Ok(ShortestPath {
            vertices,
            total_distance,
        })
    }

    /// Every path answerable right now, ordered by target
    ///
    /// Once the run is done this is one path per reachable vertex; before that
    /// only settled vertices are included.
    pub fn paths(&self) -> Vec<ShortestPath<W>> {
        (0..self.distances.len())
            .filter_map(|target| self.path_to(target).ok())
            .collect()
    }

    /// Edges `(predecessor, vertex, weight)` of the current shortest-path tree
    ///
    /// A vertex whose distance improves later replaces its edge, so there is
    /// at most one edge per vertex, ordered by vertex.
    pub fn tree_edges(&self) -> Vec<RelaxedEdge<W>> {
        self.predecessors
            .iter()
            .zip(&self.tree_weights)
            .enumerate()
            .filter_map(|(to, (pred, weight))| match (pred, weight) {
                (Some(from), Some(weight)) => Some(RelaxedEdge {
                    from: *from,
                    to,
                    weight: *weight,
                }),
                _ => None,
            })
            .collect()
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// Tentative distance of `vertex`, `None` while it is unreached
    pub fn distance(&self, vertex: usize) -> Option<W> {
        self.distances.get(vertex).copied().flatten()
    }

    pub fn settle_order(&self) -> &[usize] {
        &self.settle_order
    }

    pub fn last_relaxed_edges(&self) -> &[RelaxedEdge<W>] {
        &self.last_relaxed
    }

    /// Finishes the run if needed and converts it into a plain result
    pub fn into_result(mut self) -> ShortestPathResult<W> {
        self.run_to_completion();
        ShortestPathResult {
            distances: self.distances,
            predecessors: self.predecessors,
            source: self.source,
        }
    }
}

/// Iterator returned by [`StepwiseDijkstra::steps`]
pub struct Steps<'a, W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    engine: &'a mut StepwiseDijkstra<W, G>,
    finished: bool,
}

impl<W, G> Iterator for Steps<'_, W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    type Item = StepReport<W>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let report = self.engine.step();
        if report.status == RunStatus::Done {
            self.finished = true;
        }
        Some(report)
    }
}
