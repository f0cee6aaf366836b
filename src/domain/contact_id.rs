//! ContactId value object.

use super::errors::ValidationError;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A type-safe wrapper for contact IDs.
///
/// Contact IDs are store-generated object ids. Parsing validates the 24 character
/// hex form, so a `ContactId` always maps to a real store identifier.
///
/// # Example
///
/// ```
/// use contactos_service::domain::ContactId;
///
/// let id = ContactId::parse("65f1c0ffee0000000000abcd").unwrap();
/// assert_eq!(id.to_string(), "65f1c0ffee0000000000abcd");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(ObjectId);

impl ContactId {
    /// Parse a ContactId from its hex form.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` for an empty string and
    /// `ValidationError::MalformedId` when the string is not a valid object id.
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        ObjectId::parse_str(id)
            .map(Self)
            .map_err(|_| ValidationError::MalformedId(id.to_string()))
    }

    /// Get the underlying store identifier.
    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for ContactId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl FromStr for ContactId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Serde support - serialize as hex string
impl Serialize for ContactId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_hex())
    }
}

// Serde support - a hex string from JSON, or a native ObjectId from a stored document
impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::ObjectId(oid) => Ok(Self(oid)),
            Bson::String(s) => ContactId::parse(&s).map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!(
                "expected an object id, got: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}
