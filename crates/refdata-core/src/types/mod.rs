//! Type definitions for the reference data services
//!
//! This module contains all type definitions organized by category.

/// Identifier types
pub mod ids;
/// System-wide error types
pub mod error;
/// Country, state, LGA and city entities
pub mod geo;
/// Trivia question entity
pub mod question;

// Re-export commonly used types for convenience
pub use ids::{EntityId, IdParseError};
pub use error::{Error, Result, StoreError};
pub use geo::{City, Country, CountryStatus, Lga, State};
pub use question::Question;
