pub mod traits;
pub mod stepwise;
pub mod dijkstra;
pub mod batch;

pub use traits::{ShortestPathAlgorithm, ShortestPathResult};
