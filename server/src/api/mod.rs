//! HTTP API module for the geographic reference server

/// HTTP request handlers
pub mod handlers;

/// HTTP server implementation
pub mod server;

// Re-export commonly used items
pub use handlers::{CityAppendResponse, JsonRequest};
pub use server::{create_app, start_server};
