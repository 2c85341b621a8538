//! Core value types for the xclass schema engine.
//!
//! This crate defines the leaf types every other xclass crate depends on:
//! - [`Value`] / [`ValueKind`]: the typed payload of one object property
//! - [`FormValue`], [`FormMap`], [`ValueMap`]: raw input consumed when
//!   populating objects from submitted forms or pre-typed values
//! - [`ObjectReference`]: `Class.Name[number]` identity of one object
//! - [`DatePattern`]: persisted `SimpleDateFormat`-style date patterns
//!
//! Nothing here knows about schemas; those live in `xclass-model`.

mod date_pattern;
mod form;
mod reference;
mod value;

pub use date_pattern::{DEFAULT_DATE_PATTERN, DatePattern};
pub use form::{FormMap, FormValue, ValueMap};
pub use reference::ObjectReference;
pub use value::{CANONICAL_DATE_FORMAT, Value, ValueKind};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid date pattern '{pattern}': {reason}")]
    InvalidDatePattern { pattern: String, reason: String },

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("invalid object reference: {0}")]
    InvalidReference(String),
}
