//! Error types for the class model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building, instantiating or checking classes.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A declared property type or custom class name has no registered factory.
    #[error("cannot instantiate {kind} '{name}'")]
    Instantiation { kind: &'static str, name: String },

    /// The storage layer rejected a class's custom mapping.
    #[error("custom mapping '{mapping}' of class '{class_name}' is invalid: {reason}")]
    Mapping {
        class_name: String,
        mapping: String,
        reason: String,
    },

    /// A persisted property parameter could not be read.
    #[error("invalid value '{value}' for parameter '{parameter}' of property '{property}'")]
    InvalidParameter {
        property: String,
        parameter: String,
        value: String,
    },

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file.
    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    /// Value-level error (date patterns, numbers).
    #[error(transparent)]
    Types(#[from] xclass_types::Error),
}
