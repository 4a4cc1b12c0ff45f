//! Seed/import of geographic reference data from the upstream source

/// Import pipeline
pub mod pipeline;

/// Upstream reference source trait and HTTP client
pub mod source;

pub use pipeline::{run_import, ImportReport};
pub use source::{HttpReferenceSource, ReferenceSource, UpstreamCountry, UpstreamId, UpstreamLga, UpstreamState};

use refdata_core::core::ConfiguredAppState;
use refdata_core::Result;

/// Run the import against whichever store backend `app_state` carries
pub async fn seed<R>(app_state: &ConfiguredAppState, source: &R) -> Result<ImportReport>
where
    R: ReferenceSource + ?Sized,
{
    match app_state {
        ConfiguredAppState::Memory(state) => run_import(state.store(), source).await,
        #[cfg(feature = "mongo")]
        ConfiguredAppState::Mongo(state) => run_import(state.store(), source).await,
    }
}
