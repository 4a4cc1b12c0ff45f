//! Typed access to a [`DocumentStore`]
//!
//! Entities are serialized to JSON objects before they reach a backend and
//! decoded again on the way out, so handlers only ever see domain types.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::storage::{DocumentStore, Filter};
use crate::types::StoreError;

/// Find and decode every matching document
pub async fn find_all<T, S>(store: &S, collection: &str, filter: &Filter) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    S: DocumentStore + ?Sized,
{
    store
        .find(collection, filter)
        .await?
        .into_iter()
        .map(|doc| decode(collection, doc))
        .collect()
}

/// Encode and insert one entity
pub async fn insert<T, S>(store: &S, collection: &str, entity: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: DocumentStore + ?Sized,
{
    store.insert_one(collection, encode(entity)?).await
}

/// Encode and insert a batch of entities
pub async fn insert_all<T, S>(store: &S, collection: &str, entities: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: DocumentStore + ?Sized,
{
    let documents = entities.iter().map(encode).collect::<Result<Vec<_>, _>>()?;
    store.insert_many(collection, documents).await
}

fn encode<T: Serialize + ?Sized>(entity: &T) -> Result<Value, StoreError> {
    serde_json::to_value(entity).map_err(|e| StoreError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(collection: &str, document: Value) -> Result<T, StoreError> {
    serde_json::from_value(document).map_err(|source| StoreError::Decode {
        collection: collection.to_string(),
        source,
    })
}
