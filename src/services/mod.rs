//! Application service layer.
//!
//! Services hold the contact rules and sit between the HTTP handlers and the
//! document store.

mod contact_service;

pub use contact_service::{
    ContactService, ContactServiceImpl, LookupField, CONTACTS_COLLECTION,
    REQUIRED_FIELDS_MESSAGE, UNAVAILABLE_MESSAGE,
};
