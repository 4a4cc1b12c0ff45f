//! Application Factory
//!
//! This module provides factory functions for creating and initializing the
//! AppState with the store backend selected by configuration.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::core::app_state::AppState;
use crate::core::config::{Config, StoreBackend};
use crate::storage::MemoryStore;
#[cfg(feature = "mongo")]
use crate::storage::MongoStore;
use crate::types::{Error, Result};
use crate::log_info;

/// Enum to hold different AppState configurations
///
/// Each variant carries a fully connected state whose store type is known at
/// compile time, so handlers stay generic and monomorphised.
pub enum ConfiguredAppState {
    /// Configuration using the in-memory backend
    Memory(Arc<AppState<MemoryStore>>),
    /// Configuration using the MongoDB backend
    #[cfg(feature = "mongo")]
    Mongo(Arc<AppState<MongoStore>>),
}

impl ConfiguredAppState {
    /// Get the HTTP address from config
    pub fn http_addr(&self) -> SocketAddr {
        self.config().server.http_addr
    }

    /// Configuration the state was built from
    pub fn config(&self) -> &Config {
        match self {
            ConfiguredAppState::Memory(state) => &state.config,
            #[cfg(feature = "mongo")]
            ConfiguredAppState::Mongo(state) => &state.config,
        }
    }

    /// Name of the active backend, for logging
    pub fn backend_name(&self) -> &'static str {
        match self {
            ConfiguredAppState::Memory(_) => "memory",
            #[cfg(feature = "mongo")]
            ConfiguredAppState::Mongo(_) => "mongodb",
        }
    }
}

/// Create AppState based on configuration
///
/// Connects to the configured store; failure here is fatal for the caller.
pub async fn create_app_state(config: Config) -> Result<ConfiguredAppState> {
    let backend = config.store_backend()?;
    log_info!("Creating AppState with store backend: {:?}", backend);

    match backend {
        StoreBackend::Memory => {
            let store = Arc::new(MemoryStore::new());
            log_info!("MemoryStore initialized successfully");
            Ok(ConfiguredAppState::Memory(Arc::new(AppState::new(store, config))))
        }
        #[cfg(feature = "mongo")]
        StoreBackend::Mongo => {
            let store = MongoStore::connect(
                &config.store.uri,
                &config.store.database,
                config.connect_timeout(),
            )
            .await
            .map_err(|e| Error::config(format!("Store connection failed: {}", e)))?;
            log_info!("MongoStore initialized successfully");
            Ok(ConfiguredAppState::Mongo(Arc::new(AppState::new(Arc::new(store), config))))
        }
        #[cfg(not(feature = "mongo"))]
        StoreBackend::Mongo => Err(Error::config(
            "MongoDB support is not compiled in; rebuild with the `mongo` feature",
        )),
    }
}
