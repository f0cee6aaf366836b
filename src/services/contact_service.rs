//! Contact service layer.
//!
//! Maps each contact operation onto exactly one document store call, enforcing the
//! required-field and not-found rules on the way.

use crate::domain::ContactId;
use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, DeleteAck, NewContact, ID_FIELD};
use crate::store::DocumentStore;
use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Collection holding contact documents.
pub const CONTACTS_COLLECTION: &str = "contactos";

/// Message returned when create input lacks a required field.
pub const REQUIRED_FIELDS_MESSAGE: &str = "name, phone and email are required";

/// Message returned in place of any store failure.
pub const UNAVAILABLE_MESSAGE: &str = "Internal server error";

/// Contact fields usable as lookup keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupField {
    Name,
    Phone,
    Email,
}

impl LookupField {
    /// Document key for this field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for LookupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// All stored contacts. Documents that do not decode as contacts are skipped.
    ///
    /// An empty collection is a `NotFound` error unless the service was built
    /// with that behavior switched off.
    async fn list_contacts(&self) -> ContactResult<Vec<Contact>>;

    /// Validate and store a new contact, returning it with its assigned id.
    async fn create_contact(&self, input: NewContact) -> ContactResult<Contact>;

    /// First contact whose name equals `name`.
    async fn find_by_name(&self, name: &str) -> ContactResult<Contact>;

    /// First contact whose phone equals `phone`.
    async fn find_by_phone(&self, phone: &str) -> ContactResult<Contact>;

    /// First contact whose email equals `email`.
    async fn find_by_email(&self, email: &str) -> ContactResult<Contact>;

    /// Delete the contact with the given id.
    async fn delete_by_id(&self, id: &str) -> ContactResult<DeleteAck>;
}

/// Default implementation of ContactService over a document store.
pub struct ContactServiceImpl {
    store: Arc<dyn DocumentStore>,
    collection: String,
    empty_list_is_not_found: bool,
}

impl ContactServiceImpl {
    /// Create a contact service using the `contactos` collection of `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            collection: CONTACTS_COLLECTION.to_string(),
            empty_list_is_not_found: true,
        }
    }

    /// Use a different collection.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Choose whether an empty listing is reported as `NotFound` (the default) or
    /// returned as an empty list.
    pub fn with_empty_list_is_not_found(mut self, enabled: bool) -> Self {
        self.empty_list_is_not_found = enabled;
        self
    }

    /// Log a store failure and mask it as `ServiceUnavailable`.
    fn unavailable(context: &str, cause: impl fmt::Display) -> ContactError {
        error!(error = %cause, "{}", context);
        ContactError::ServiceUnavailable(UNAVAILABLE_MESSAGE.to_string())
    }

    fn decode(document: &Document) -> ContactResult<Contact> {
        Contact::from_document(document).map_err(ContactError::internal)
    }

    async fn find_by_field(&self, field: LookupField, value: &str) -> ContactResult<Contact> {
        let mut filter = Document::new();
        filter.insert(field.key(), value);
        let found = self
            .store
            .find_one(&self.collection, filter)
            .await
            .map_err(|e| {
                Self::unavailable(&format!("Failed to look up contact by {}", field), e)
            })?;

        match found {
            Some(document) => Self::decode(&document),
            None => Err(ContactError::NotFound(format!(
                "No contact found with {}: {}",
                field, value
            ))),
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list_contacts(&self) -> ContactResult<Vec<Contact>> {
        let documents = self
            .store
            .find(&self.collection, doc! {})
            .await
            .map_err(|e| Self::unavailable("Failed to list contacts", e))?;

        // One unreadable document must not hide the rest of the collection.
        let contacts: Vec<Contact> = documents
            .iter()
            .filter_map(|document| match Contact::from_document(document) {
                Ok(contact) => Some(contact),
                Err(e) => {
                    warn!(
                        collection = %self.collection,
                        id = ?document.get(ID_FIELD),
                        error = %e,
                        "Skipping unreadable contact document"
                    );
                    None
                }
            })
            .collect();

        if contacts.is_empty() && self.empty_list_is_not_found {
            return Err(ContactError::NotFound("No contacts found".to_string()));
        }

        Ok(contacts)
    }

    async fn create_contact(&self, input: NewContact) -> ContactResult<Contact> {
        let draft = input
            .validate()
            .map_err(|_| ContactError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()))?;

        let outcome = self
            .store
            .insert_many(&self.collection, vec![draft.to_document()])
            .await
            .map_err(|e| Self::unavailable("Failed to create contact", e))?;

        let id = outcome.inserted_ids.first().copied().ok_or_else(|| {
            Self::unavailable("Failed to create contact", "store returned no inserted id")
        })?;

        info!(id = %id, "Contact created");
        Ok(Contact::new(ContactId::from(id), draft))
    }

    async fn find_by_name(&self, name: &str) -> ContactResult<Contact> {
        self.find_by_field(LookupField::Name, name).await
    }

    async fn find_by_phone(&self, phone: &str) -> ContactResult<Contact> {
        self.find_by_field(LookupField::Phone, phone).await
    }

    async fn find_by_email(&self, email: &str) -> ContactResult<Contact> {
        self.find_by_field(LookupField::Email, email).await
    }

    async fn delete_by_id(&self, id: &str) -> ContactResult<DeleteAck> {
        let contact_id = ContactId::parse(id)
            .map_err(|e| Self::unavailable(&format!("Failed to delete contact {}", id), e))?;

        let outcome = self
            .store
            .delete_one(&self.collection, doc! { "_id": contact_id.object_id() })
            .await
            .map_err(|e| Self::unavailable(&format!("Failed to delete contact {}", id), e))?;

        if outcome.deleted_count == 0 {
            return Err(ContactError::NotFound(format!(
                "No contact found with id: {}",
                id
            )));
        }

        info!(id = %contact_id, "Contact deleted");
        Ok(DeleteAck {
            message: "Contact deleted successfully".to_string(),
        })
    }
}
