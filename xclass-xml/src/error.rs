use thiserror::Error;
use xclass_model::ModelError;

/// Result type for codec operations.
pub type XmlResult<T> = Result<T, XmlError>;

/// Errors raised while reading or writing XML.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The document is not well-formed. `fragment` is the input as received.
    #[error("malformed XML: {message}")]
    Parse { message: String, fragment: String },

    /// A required element is absent.
    #[error("missing <{element}> element")]
    MissingElement { element: String, fragment: String },

    #[error("failed to write XML: {0}")]
    Write(String),

    /// A property type or custom class could not be resolved.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A stored value does not parse as its field's kind.
    #[error(transparent)]
    Types(#[from] xclass_types::Error),
}

impl XmlError {
    pub(crate) fn parse(message: impl Into<String>, fragment: &str) -> Self {
        Self::Parse {
            message: message.into(),
            fragment: fragment.to_string(),
        }
    }

    pub(crate) fn missing(element: &str, fragment: &str) -> Self {
        Self::MissingElement {
            element: element.to_string(),
            fragment: fragment.to_string(),
        }
    }
}
