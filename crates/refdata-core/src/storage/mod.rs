//! Document store layer
//!
//! This module provides the storage abstraction that lets both services run
//! against either the in-memory store or MongoDB while keeping one API for
//! collection-scoped reads and writes.
//!
//! Documents cross the trait boundary as JSON objects so each backend is free
//! to choose its own on-disk representation. Typed access lives in [`typed`].

use async_trait::async_trait;
use serde_json::Value;

use crate::types::StoreError;

/// Query filters understood by every backend
pub mod filter;

/// In-memory store (DashMap of JSON documents)
pub mod memory;

/// MongoDB-backed store
#[cfg(feature = "mongo")]
pub mod mongo;

/// Typed helpers on top of [`DocumentStore`]
pub mod typed;

pub use filter::Filter;
pub use memory::MemoryStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoStore;

/// Trait for document store implementations
///
/// All operations are scoped to a named collection. Collections spring into
/// existence on first insert and an unknown collection reads as empty.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document in `collection` matching `filter`, in insertion order
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    /// Insert a single document
    async fn insert_one(&self, collection: &str, document: Value) -> Result<(), StoreError>;

    /// Insert several documents; an empty batch is a no-op
    async fn insert_many(&self, collection: &str, documents: Vec<Value>) -> Result<(), StoreError>;

    /// Remove every document in `collection`, returning how many were removed
    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError>;

    /// Count documents in `collection` matching `filter`
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Whether any document in `collection` matches `filter`
    async fn exists(&self, collection: &str, filter: &Filter) -> Result<bool, StoreError> {
        Ok(self.count(collection, filter).await? > 0)
    }
}

/// Helper trait that combines all requirements for storage implementations
/// This cleans up generic bounds throughout the codebase
pub trait StorageImpl: DocumentStore + 'static {}

/// Blanket implementation for any type that meets the requirements
impl<T> StorageImpl for T where T: DocumentStore + 'static {}
