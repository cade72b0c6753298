//! HTTP API
//!
//! JSON over HTTP with axum. `protocol` holds the wire types and error
//! mapping, `server` the router, handlers and listener.

pub mod protocol;
pub mod server;

// Re-export main entry points
pub use server::{create_router, start_server};
