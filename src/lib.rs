//! Stepwise SSSP - observable single-source shortest paths
//!
//! This library runs Dijkstra's algorithm one settlement at a time so that every
//! intermediate state (frontier emptiness, tentative distances, settled vertices,
//! relaxed edges) can be inspected between steps instead of only at the end.
//!
//! A [`GraphStore`] is built incrementally, then handed to a [`StepwiseDijkstra`]
//! engine which borrows it read-only for the lifetime of the run.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod web;

pub use algorithm::{
    dijkstra::Dijkstra,
    stepwise::{RelaxedEdge, RunStatus, ShortestPath, Snapshot, StepReport, StepwiseDijkstra},
    ShortestPathAlgorithm, ShortestPathResult,
};
/// Re-export main types for convenient use
pub use graph::store::{EdgeMode, GraphStore};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid graph size: a graph needs at least one vertex")]
    InvalidSize,

    #[error("Vertex out of range: {0}")]
    VertexOutOfRange(usize),

    #[error("Invalid edge weight: {0} (weights must be finite and non-negative)")]
    NegativeWeight(f64),

    #[error("Edge weight {0} is too large: distances along a path would overflow")]
    WeightTooLarge(f64),

    #[error("Vertex {0} is unreachable from the source")]
    Unreachable(usize),

    #[error("Vertex {0} is not settled yet")]
    NotSettled(usize),

    #[error("Session not found")]
    SessionNotFound,

    #[error("Graph is frozen while a run is active")]
    GraphFrozen,

    #[error("No active run for this session")]
    NoActiveRun,
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
