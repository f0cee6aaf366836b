//! Contactos - a small REST service for a contact directory.
//!
//! Contacts (name, phone, email) are kept in a document store and exposed under
//! `/api/v1/contactos`: list, create, look up by name, phone or email, and delete by id.
//!
//! # Architecture
//!
//! - **store**: document store adapter (MongoDB, plus an in-memory backend)
//! - **services**: contact operations, validation and not-found rules
//! - **server**: axum router, handlers and the error pipeline
//! - **models** / **domain**: contact records and identifiers
//! - **error**: error types for each layer
//! - **config**: configuration from environment variables
//! - **client**: blocking HTTP client used by the console front end

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod store;

pub use client::ContactsClient;
pub use config::Config;
pub use domain::ContactId;
pub use error::{ClientError, ConfigError, ContactError, StoreError};
pub use models::{Contact, DeleteAck, NewContact};
pub use server::router;
pub use services::{ContactService, ContactServiceImpl};
pub use store::{DocumentStore, MemoryStore, MongoStore};
