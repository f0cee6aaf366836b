//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The provided ID is not a valid store identifier.
    MalformedId(String),

    /// One or more required contact fields are missing or empty.
    MissingFields(Vec<&'static str>),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::MalformedId(id) => write!(f, "Malformed contact ID: {}", id),
            Self::MissingFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}
