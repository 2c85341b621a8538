//! XML codec for xclass classes and objects.
//!
//! - [`encode_schema`] / [`decode_schema`]: `<class>` documents
//! - [`encode_instance`] / [`decode_instance`]: `<object>` documents
//! - [`Element`]: the small element tree both are built on
//!
//! Decoding resolves property types through a [`xclass_model::Registry`],
//! so legacy fully-qualified discriminators are accepted alongside the short
//! ones. Encoding writes the style chosen in [`CodecOptions`].

mod element;
mod error;
mod instance;
mod schema;

pub use element::{Element, PLACEHOLDER_TAG};
pub use error::{XmlError, XmlResult};
pub use instance::{
    OBJECT_TAG, decode_instance, encode_instance, instance_from_element, instance_to_element,
};
pub use schema::{
    CLASS_TAG, decode_schema, encode_schema, property_from_element, property_to_element,
    schema_from_element, schema_to_element,
};

use xclass_model::{ClassTypeStyle, CodecConfig};

/// Output settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Spaces per nesting level; 0 writes compact XML.
    pub indent: usize,
    pub class_type_style: ClassTypeStyle,
}

impl CodecOptions {
    /// Two-space indentation, short discriminators.
    #[must_use]
    pub fn pretty() -> Self {
        Self {
            indent: 2,
            class_type_style: ClassTypeStyle::Short,
        }
    }
}

impl From<&CodecConfig> for CodecOptions {
    fn from(config: &CodecConfig) -> Self {
        Self {
            indent: config.indent,
            class_type_style: config.class_type_style,
        }
    }
}
