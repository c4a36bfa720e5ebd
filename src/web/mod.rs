//! JSON session API for external renderers
//!
//! Each session owns one graph store and at most one run over it. Clients
//! decide the stepping cadence by calling the step endpoint.

pub mod api;
pub mod models;
pub mod server;

pub use api::{create_router, AppState};
pub use server::{build_app, start_server, start_server_with_config, ServerConfig};
