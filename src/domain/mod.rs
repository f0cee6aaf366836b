//! Domain value objects and types.
//!
//! Type-safe wrappers for domain concepts. Value objects validate at construction
//! time so invalid data cannot be represented past the service boundary.

pub mod contact_id;
pub mod errors;

pub use contact_id::ContactId;
pub use errors::ValidationError;
