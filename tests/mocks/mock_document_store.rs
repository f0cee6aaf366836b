use async_trait::async_trait;
use contactos_service::error::{StoreError, StoreResult};
use contactos_service::store::{
    ConnectionState, DeleteOutcome, DocumentStore, InsertOutcome, UpdateOutcome,
};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock document store for testing.
///
/// Keeps documents in memory, tracks method calls for verification and can be told
/// to fail every operation to simulate an unreachable database.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockDocumentStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failure: Arc<Mutex<Option<String>>>,
}

#[allow(dead_code)]
impl MockDocumentStore {
    /// Create a new empty MockDocumentStore.
    pub fn new() -> Self {
        Self {
            collections: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Put a document straight into a collection, bypassing call tracking.
    pub fn add_document(&self, collection: &str, document: Document) {
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        let collections = self.collections.lock().unwrap();
        collections.get(collection).map_or(0, Vec::len)
    }

    /// Make every following operation fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total calls across all methods.
    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(StoreError::Connection(message.clone())),
            None => Ok(()),
        }
    }

    fn matches(document: &Document, filter: &Document) -> bool {
        filter
            .iter()
            .all(|(key, value)| document.get(key) == Some(value))
    }
}

impl Default for MockDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn connect(&self) -> StoreResult<()> {
        self.track_call("connect")
    }

    async fn disconnect(&self) -> StoreResult<()> {
        self.track_call("disconnect")
    }

    fn state(&self) -> ConnectionState {
        ConnectionState::Connected
    }

    async fn find(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>> {
        self.track_call("find")?;

        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| Self::matches(doc, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> StoreResult<Option<Document>> {
        self.track_call("find_one")?;

        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| Self::matches(doc, &filter)).cloned()))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        patch: Document,
    ) -> StoreResult<UpdateOutcome> {
        self.track_call("update_one")?;

        let mut collections = self.collections.lock().unwrap();
        let target = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| Self::matches(doc, &filter)));

        match target {
            Some(document) => {
                for (key, value) in patch {
                    document.insert(key, value);
                }
                Ok(UpdateOutcome {
                    matched_count: 1,
                    modified_count: 1,
                })
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> StoreResult<InsertOutcome> {
        self.track_call("insert_many")?;

        let mut collections = self.collections.lock().unwrap();
        let stored = collections.entry(collection.to_string()).or_default();
        let mut inserted_ids = Vec::with_capacity(documents.len());
        for mut document in documents {
            let id = ObjectId::new();
            document.insert("_id", id);
            inserted_ids.push(id);
            stored.push(document);
        }

        Ok(InsertOutcome { inserted_ids })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<DeleteOutcome> {
        self.track_call("delete_one")?;

        let mut collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(DeleteOutcome::default());
        };

        match docs.iter().position(|doc| Self::matches(doc, &filter)) {
            Some(index) => {
                docs.remove(index);
                Ok(DeleteOutcome { deleted_count: 1 })
            }
            None => Ok(DeleteOutcome::default()),
        }
    }
}
