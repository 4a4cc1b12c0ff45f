//! Simple in-memory storage implementation using DashMap
//!
//! Stores every collection as an insertion-ordered vector of JSON documents.
//! Selected by the `memory://` connection URI and used throughout the tests.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::storage::{DocumentStore, Filter};
use crate::types::StoreError;
use crate::log_debug;

/// Simple storage implementation using DashMap and JSON
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Map of collection name to its documents
    collections: DashMap<String, Vec<Value>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collections that currently hold documents
    pub fn collection_count(&self) -> usize {
        self.collections.iter().filter(|entry| !entry.value().is_empty()).count()
    }
}

fn ensure_object(collection: &str, document: &Value) -> Result<(), StoreError> {
    if document.is_object() {
        Ok(())
    } else {
        Err(StoreError::Encode(format!(
            "documents in '{}' must be JSON objects",
            collection
        )))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let found = self
            .collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default();
        Ok(found)
    }

    async fn insert_one(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        ensure_object(collection, &document)?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn insert_many(&self, collection: &str, documents: Vec<Value>) -> Result<(), StoreError> {
        if documents.is_empty() {
            return Ok(());
        }
        for document in &documents {
            ensure_object(collection, document)?;
        }

        log_debug!("Inserting {} documents into '{}'", documents.len(), collection);
        self.collections
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
        Ok(())
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError> {
        let removed = self
            .collections
            .remove(collection)
            .map(|(_, docs)| docs.len() as u64)
            .unwrap_or(0);
        Ok(removed)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let count = self
            .collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).count() as u64)
            .unwrap_or(0);
        Ok(count)
    }
}
