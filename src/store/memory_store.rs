use crate::error::{StoreError, StoreResult};
use crate::models::ID_FIELD;
use crate::store::traits::{
    log_failure, ConnectionState, ConnectionStatus, DeleteOutcome, DocumentStore, InsertOutcome,
    UpdateOutcome,
};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

type Collections = HashMap<String, Vec<Document>>;

/// In-process document store.
///
/// Documents are kept per collection in insertion order. Filters match by field
/// equality, which is all the contact service asks of a store.
pub struct MemoryStore {
    collections: RwLock<Collections>,
    status: ConnectionStatus,
}

impl MemoryStore {
    /// Create an empty, disconnected store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            status: ConnectionStatus::new(),
        }
    }

    /// Number of documents currently held in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.read()
            .map(|collections| collections.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// Whether `collection` holds no documents.
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| StoreError::Other("collection lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| StoreError::Other("collection lock poisoned".to_string()))
    }

    fn ensure_connected(&self) {
        if self.status.get() != ConnectionState::Connected {
            self.status.set(ConnectionState::Connected);
            debug!("In-memory store opened");
        }
    }

    fn try_find(&self, collection: &str, filter: &Document) -> StoreResult<Vec<Document>> {
        self.ensure_connected();
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches(document, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn try_find_one(&self, collection: &str, filter: &Document) -> StoreResult<Option<Document>> {
        self.ensure_connected();
        let collections = self.read()?;
        Ok(collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| matches(document, filter))
                .cloned()
        }))
    }

    fn try_update_one(
        &self,
        collection: &str,
        filter: &Document,
        patch: Document,
    ) -> StoreResult<UpdateOutcome> {
        self.ensure_connected();
        if patch.contains_key(ID_FIELD) {
            return Err(StoreError::InvalidDocument(format!(
                "{} is immutable",
                ID_FIELD
            )));
        }

        let mut collections = self.write()?;
        let target = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|d| matches(d, filter)));

        let Some(document) = target else {
            return Ok(UpdateOutcome::default());
        };

        let mut modified = false;
        for (key, value) in patch {
            if document.get(&key) != Some(&value) {
                document.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    fn try_insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> StoreResult<InsertOutcome> {
        self.ensure_connected();
        let mut collections = self.write()?;
        let stored = collections.entry(collection.to_string()).or_default();

        let mut seen: HashSet<ObjectId> = stored
            .iter()
            .filter_map(|d| d.get_object_id(ID_FIELD).ok())
            .collect();

        // Validate the whole batch before touching the collection.
        let mut prepared = Vec::with_capacity(documents.len());
        for mut document in documents {
            let id = match document.get(ID_FIELD).cloned() {
                None => {
                    let id = ObjectId::new();
                    document.insert(ID_FIELD, id);
                    id
                }
                Some(Bson::ObjectId(id)) => id,
                Some(other) => {
                    return Err(StoreError::InvalidDocument(format!(
                        "{} must be an ObjectId, got: {}",
                        ID_FIELD, other
                    )))
                }
            };
            if !seen.insert(id) {
                return Err(StoreError::Other(format!("duplicate key: {}", id)));
            }
            prepared.push((id, document));
        }

        let inserted_ids = prepared.iter().map(|(id, _)| *id).collect();
        stored.extend(prepared.into_iter().map(|(_, document)| document));
        Ok(InsertOutcome { inserted_ids })
    }

    fn try_delete_one(&self, collection: &str, filter: &Document) -> StoreResult<DeleteOutcome> {
        self.ensure_connected();
        let mut collections = self.write()?;
        let deleted_count = match collections.get_mut(collection) {
            Some(documents) => match documents.iter().position(|d| matches(d, filter)) {
                Some(index) => {
                    documents.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };
        Ok(DeleteOutcome { deleted_count })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Field-equality match of every filter entry; an empty filter matches everything.
fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn connect(&self) -> StoreResult<()> {
        self.ensure_connected();
        Ok(())
    }

    async fn disconnect(&self) -> StoreResult<()> {
        if self.status.get() == ConnectionState::Connected {
            self.status.set(ConnectionState::Disconnected);
            info!("In-memory store closed");
        }
        Ok(())
    }

    fn state(&self) -> ConnectionState {
        self.status.get()
    }

    async fn find(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>> {
        log_failure("find", collection, self.try_find(collection, &filter))
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> StoreResult<Option<Document>> {
        log_failure("find_one", collection, self.try_find_one(collection, &filter))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        patch: Document,
    ) -> StoreResult<UpdateOutcome> {
        log_failure(
            "update_one",
            collection,
            self.try_update_one(collection, &filter, patch),
        )
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> StoreResult<InsertOutcome> {
        log_failure(
            "insert_many",
            collection,
            self.try_insert_many(collection, documents),
        )
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<DeleteOutcome> {
        log_failure("delete_one", collection, self.try_delete_one(collection, &filter))
    }
}
