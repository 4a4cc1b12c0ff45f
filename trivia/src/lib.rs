//! # Trivia Server
//!
//! Seeds a fixed set of party-game questions into the document store on
//! startup and serves them, together with the game's static pages, over HTTP.

#![warn(missing_docs)]

/// Question API, health check and static asset routing
pub mod api;

/// Built-in questions and startup seeding
pub mod questions;

pub use questions::{builtin_questions, seed_questions, SeedOutcome};
