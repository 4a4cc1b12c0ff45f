//! MongoDB-backed document store
//!
//! JSON documents are converted to BSON on the way in and back to relaxed
//! extended JSON on the way out. The server-assigned `_id` never leaves this
//! module; entities carry their own `id` field.
//!
//! Case-insensitive filters run as plain equality under a secondary-strength
//! collation. That folds case beyond ASCII, matching the memory backend.

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::{ClientOptions, Collation, CollationStrength, CountOptions, FindOptions},
    Client, Database,
};
use serde_json::Value;

use crate::storage::{DocumentStore, Filter};
use crate::types::StoreError;
use crate::{log_debug, log_info};

/// Document store backed by one MongoDB database
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to `uri`, select `database` and verify the deployment answers a ping.
    ///
    /// `timeout` bounds both the initial connection and server selection.
    pub async fn connect(uri: &str, database: &str, timeout: Duration) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options).map_err(|e| StoreError::Connection(e.to_string()))?;
        let database = client.database(database);

        database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        log_info!("Connected to MongoDB database '{}'", database.name());
        Ok(Self { database })
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

/// Translate a [`Filter`] into a MongoDB query document
fn to_query(filter: &Filter) -> Result<Document, StoreError> {
    let query = match filter {
        Filter::All => Document::new(),
        Filter::Eq { field, value } => {
            let mut query = Document::new();
            query.insert(field.as_str(), to_bson(value)?);
            query
        }
        Filter::EqIgnoreCase { field, value } => {
            let mut query = Document::new();
            query.insert(field.as_str(), value.as_str());
            query
        }
        Filter::And(filters) => {
            let parts = filters
                .iter()
                .map(|f| to_query(f).map(Bson::Document))
                .collect::<Result<Vec<_>, _>>()?;
            doc! { "$and": parts }
        }
    };
    Ok(query)
}

/// Collation applied to queries containing case-insensitive parts
fn collation_for(filter: &Filter) -> Option<Collation> {
    filter.ignores_case().then(|| {
        Collation::builder()
            .locale("en")
            .strength(CollationStrength::Secondary)
            .build()
    })
}

fn to_bson(value: &Value) -> Result<Bson, StoreError> {
    bson::to_bson(value).map_err(|e| StoreError::Encode(e.to_string()))
}

fn to_document(collection: &str, value: &Value) -> Result<Document, StoreError> {
    match to_bson(value)? {
        Bson::Document(document) => Ok(document),
        _ => Err(StoreError::Encode(format!(
            "documents in '{}' must be JSON objects",
            collection
        ))),
    }
}

fn from_document(mut document: Document) -> Value {
    document.remove("_id");
    Bson::Document(document).into_relaxed_extjson()
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let query = to_query(filter)?;
        log_debug!("find {} {}", collection, query);

        let options = collation_for(filter).map(|c| FindOptions::builder().collation(c).build());
        let cursor = self.collection(collection).find(query, options).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(from_document).collect())
    }

    async fn insert_one(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        let document = to_document(collection, &document)?;
        self.collection(collection).insert_one(document, None).await?;
        Ok(())
    }

    async fn insert_many(&self, collection: &str, documents: Vec<Value>) -> Result<(), StoreError> {
        // MongoDB rejects empty batches
        if documents.is_empty() {
            return Ok(());
        }
        let documents = documents
            .iter()
            .map(|d| to_document(collection, d))
            .collect::<Result<Vec<_>, _>>()?;
        self.collection(collection).insert_many(documents, None).await?;
        Ok(())
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError> {
        let result = self.collection(collection).delete_many(doc! {}, None).await?;
        Ok(result.deleted_count)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let query = to_query(filter)?;
        let options = collation_for(filter).map(|c| CountOptions::builder().collation(c).build());
        let count = self.collection(collection).count_documents(query, options).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn eq_filters_become_plain_equality() {
        let query = to_query(&Filter::eq("state_id", "abc")).unwrap();
        assert_eq!(query, doc! { "state_id": "abc" });
    }

    #[test]
    fn case_insensitive_filters_use_a_secondary_collation() {
        let filter = Filter::eq_ignore_case("name", "Éko");
        assert_eq!(to_query(&filter).unwrap(), doc! { "name": "Éko" });

        let collation = collation_for(&filter).unwrap();
        assert_eq!(collation.locale, "en");
        assert!(matches!(collation.strength, Some(CollationStrength::Secondary)));

        let scoped = Filter::eq("state_id", "abc").and(filter);
        assert!(collation_for(&scoped).is_some());
    }

    #[test]
    fn exact_filters_use_no_collation() {
        assert!(collation_for(&Filter::all()).is_none());
        assert!(collation_for(&Filter::eq("state_id", "abc")).is_none());
    }

    #[test]
    fn conjunctions_nest_under_and() {
        let filter = Filter::eq("state_id", "abc").and(Filter::eq_ignore_case("name", "x"));
        let query = to_query(&filter).unwrap();
        let parts = query.get_array("$and").unwrap();
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn documents_round_trip_without_object_id() {
        let mut document = to_document("cities", &json!({"id": "1", "name": "Ikeja"})).unwrap();
        document.insert("_id", bson::oid::ObjectId::new());

        assert_eq!(from_document(document), json!({"id": "1", "name": "Ikeja"}));
        assert!(to_document("cities", &json!(["not", "an", "object"])).is_err());
    }
}
