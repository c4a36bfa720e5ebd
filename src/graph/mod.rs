pub mod traits;
pub mod store;
pub mod generators;

pub use traits::Graph;
pub use store::{Edge, EdgeMode, GraphStore};
