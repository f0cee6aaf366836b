use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a store's connection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Result of `update_one`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents matched by the filter (0 or 1)
    pub matched_count: u64,
    /// Documents actually changed by the patch (0 or 1)
    pub modified_count: u64,
}

/// Result of `insert_many`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Identifiers of the inserted documents, in input order
    pub inserted_ids: Vec<ObjectId>,
}

/// Result of `delete_one`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

/// Collection-agnostic access to a document store.
///
/// Implementations own a single connection handle that is opened lazily by the first
/// operation (or an explicit `connect`) and reused until `disconnect`. Errors are
/// logged and returned as raw `StoreError`s; mapping them to domain errors is the
/// caller's job.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Open the connection unless one is already open.
    async fn connect(&self) -> StoreResult<()>;

    /// Close and clear the connection if there is one.
    async fn disconnect(&self) -> StoreResult<()>;

    /// Current connection state.
    fn state(&self) -> ConnectionState;

    /// All documents matching `filter`.
    async fn find(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>>;

    /// First document matching `filter`, if any.
    async fn find_one(&self, collection: &str, filter: Document)
        -> StoreResult<Option<Document>>;

    /// Set the fields of `patch` on the first document matching `filter`.
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        patch: Document,
    ) -> StoreResult<UpdateOutcome>;

    /// Insert all `documents`, assigning an `_id` to those without one.
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> StoreResult<InsertOutcome>;

    /// Delete the first document matching `filter`.
    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<DeleteOutcome>;
}

/// Atomic holder for a `ConnectionState`, shared by the store backends.
#[derive(Debug)]
pub(crate) struct ConnectionStatus(AtomicU8);

impl ConnectionStatus {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    pub(crate) fn get(&self) -> ConnectionState {
        match self.0.load(Ordering::Acquire) {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }
    }

    pub(crate) fn set(&self, state: ConnectionState) {
        let raw = match state {
            ConnectionState::Disconnected => 0,
            ConnectionState::Connecting => 1,
            ConnectionState::Connected => 2,
        };
        self.0.store(raw, Ordering::Release);
    }
}

/// Log a failed store operation and hand the error back unchanged.
pub(crate) fn log_failure<T>(
    operation: &str,
    collection: &str,
    result: StoreResult<T>,
) -> StoreResult<T> {
    result.map_err(|error: StoreError| {
        tracing::error!(
            operation,
            collection,
            error = %error,
            "Document store operation failed"
        );
        error
    })
}
