//! Shapes of the book entity as it crosses the API boundary.
//!
//! - [`BookCreate`]: what a client sends to create a book.
//! - [`BookUpdate`]: what a client sends to change a book, every field optional.
//! - [`Book`]: what a client receives, including the identifier.

use serde_json::Value;

mod create;
mod patch;
mod read;
mod update;
mod validation;

pub use create::BookCreate;
pub use patch::Patch;
pub use read::{Book, BookAttributes};
pub use update::BookUpdate;
pub use validation::{FieldError, FieldErrorKind, ValidationError};

/// Builds a shape out of an untyped JSON payload.
///
/// Checks field presence and types only. Unrecognized fields are ignored.
///
/// The HTTP layer parses through this trait to report every rejected field.
/// The serde impls of the shapes accept and reject the same JSON objects and
/// are the contract for consumers that deserialize directly.
pub trait FromPayload: Sized {
    fn from_payload(payload: Value) -> Result<Self, ValidationError>;
}
