//! Contact model representing an entry in the directory.

use crate::domain::{ContactId, ValidationError};
use crate::error::{StoreError, StoreResult};
use mongodb::bson::{self, doc, Document};
use serde::{Deserialize, Serialize};

/// Document key holding the store-generated identifier.
pub const ID_FIELD: &str = "_id";

/// A stored contact.
///
/// Decoded straight from the stored document. Documents written by older clients
/// use `nombre` and `telefono`; those keys are read as `name` and `phone`. Any other
/// stored field is kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    /// Store-generated identifier
    #[serde(alias = "_id")]
    pub id: ContactId,

    /// Contact name (lookup key, not unique)
    #[serde(alias = "nombre")]
    pub name: String,

    /// Phone number (lookup key, not unique)
    #[serde(alias = "telefono")]
    pub phone: String,

    /// Email address (lookup key, not unique)
    pub email: String,

    /// Stored fields outside the contact schema
    #[serde(flatten, default, skip_serializing_if = "Document::is_empty")]
    pub extra: Document,
}

impl Contact {
    /// Build a contact from a validated draft and the id the store assigned to it.
    pub fn new(id: ContactId, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            extra: Document::new(),
        }
    }

    /// Decode a stored document.
    pub fn from_document(document: &Document) -> StoreResult<Self> {
        bson::from_document(document.clone())
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))
    }
}

/// Payload for creating a contact.
///
/// Every field is optional at the wire level so that missing fields reach validation
/// instead of failing deserialization. The Spanish keys used by older clients are
/// accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewContact {
    #[serde(default, alias = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, alias = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl NewContact {
    /// Convenience constructor with all three fields set.
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            phone: Some(phone.into()),
            email: Some(email.into()),
        }
    }

    /// Check that name, phone and email are all present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` naming every absent field.
    pub fn validate(self) -> Result<ContactDraft, ValidationError> {
        fn present(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.is_empty())
        }

        let mut missing = Vec::new();
        if !present(&self.name) {
            missing.push("name");
        }
        if !present(&self.phone) {
            missing.push("phone");
        }
        if !present(&self.email) {
            missing.push("email");
        }

        match (self.name, self.phone, self.email) {
            (Some(name), Some(phone), Some(email)) if missing.is_empty() => Ok(ContactDraft {
                name,
                phone,
                email,
            }),
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }
}

/// A validated contact that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactDraft {
    /// Document to insert; the store assigns `_id`.
    pub fn to_document(&self) -> Document {
        doc! {
            "name": self.name.clone(),
            "phone": self.phone.clone(),
            "email": self.email.clone(),
        }
    }
}

/// Acknowledgment returned by a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteAck {
    pub message: String,
}
