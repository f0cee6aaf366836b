//! Persistence adapter.
//!
//! A thin, collection-agnostic interface over a document store. The contact service
//! only ever sees `Arc<dyn DocumentStore>`, so backends and test doubles are
//! interchangeable.

mod memory_store;
mod mongo_store;
mod traits;

pub use memory_store::MemoryStore;
pub use mongo_store::MongoStore;
pub use traits::{ConnectionState, DeleteOutcome, DocumentStore, InsertOutcome, UpdateOutcome};
