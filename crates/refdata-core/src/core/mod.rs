//! Core application logic and configuration

/// Application configuration
pub mod config;

/// Application state management
pub mod app_state;

/// Factory pattern for app creation
pub mod factory;

/// Logging macros and subscriber setup
pub mod logging;

/// Graceful shutdown signal
pub mod shutdown;

/// Health check payload
pub mod health;

// Re-export commonly used items
pub use config::{Config, Service, StoreBackend};
pub use app_state::AppState;
pub use factory::{create_app_state, ConfiguredAppState};
pub use logging::init_logging;
pub use shutdown::shutdown_signal;
pub use health::HealthResponse;
