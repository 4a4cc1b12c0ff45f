//! Application State Management
//!
//! This module defines the AppState shared by every request handler: the
//! store handle and the configuration it was built from.

use std::sync::Arc;
use crate::core::config::Config;
use crate::storage::StorageImpl;

/// Central application state holding the store and configuration
pub struct AppState<S: StorageImpl> {
    /// Document store, shared across requests
    pub store: Arc<S>,

    /// Application configuration
    pub config: Config,
}

// Derived Clone would demand S: Clone; only the Arc is cloned here
impl<S: StorageImpl> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: StorageImpl> AppState<S> {
    /// Create a new AppState around an already connected store
    pub fn new(store: Arc<S>, config: Config) -> Self {
        Self { store, config }
    }

    /// Borrow the store
    pub fn store(&self) -> &S {
        &self.store
    }
}
