//! # Reference Data Core
//!
//! Core types and abstractions shared by the geographic reference API and the
//! trivia question service: entity types, identifiers, configuration, the
//! application factory and the document store layer.

#![warn(missing_docs)]

/// Core application logic and configuration
pub mod core;

/// Type definitions for all stored entities
pub mod types;

/// System constants
pub mod constants;

/// Document store layer
pub mod storage;

// Re-export commonly used items
pub use types::{City, Country, CountryStatus, EntityId, Lga, Question, State};
pub use types::{Error, Result, StoreError};
pub use storage::{DocumentStore, Filter, StorageImpl};
pub use crate::core::{create_app_state, AppState, Config, ConfiguredAppState, Service};

#[doc(hidden)]
pub use tracing;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
