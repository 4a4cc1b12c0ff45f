//! # Reference Data Server
//!
//! Geographic reference API: imports countries, states and LGAs from an
//! upstream REST source, serves them over HTTP and accepts user-supplied
//! cities per state.

#![warn(missing_docs)]

/// HTTP API handlers and routing
pub mod api;

/// City append and listing
pub mod cities;

/// Upstream import pipeline
pub mod import;

pub use cities::{append_cities, CityAppendOutcome};
pub use import::{run_import, HttpReferenceSource, ImportReport, ReferenceSource};
