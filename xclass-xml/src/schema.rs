//! Class serialization.
//!
//! ```xml
//! <class>
//!   <name>Space.Class</name>
//!   <customClass></customClass>
//!   ...header elements...
//!   <title>
//!     <name>title</name>
//!     ...parameters...
//!     <classType>String</classType>
//!   </title>
//! </class>
//! ```

use crate::element::Element;
use crate::{CodecOptions, XmlError, XmlResult};
use tracing::{debug, warn};
use xclass_model::{ClassTypeStyle, PropertyType, Registry, Schema};

pub const CLASS_TAG: &str = "class";
const CLASS_TYPE_TAG: &str = "classType";

/// Builds the `<class>` element: header first, then one element per field in
/// ascending number.
#[must_use]
pub fn schema_to_element(schema: &Schema, options: &CodecOptions) -> Element {
    let mut root = Element::new(CLASS_TAG);
    let header = [
        ("name", schema.name()),
        ("customClass", schema.custom_class()),
        ("customMapping", schema.stored_custom_mapping()),
        ("defaultViewSheet", schema.default_view_sheet()),
        ("defaultEditSheet", schema.default_edit_sheet()),
        ("defaultWeb", schema.default_web()),
        ("nameField", schema.name_field()),
        ("validationScript", schema.validation_script()),
    ];
    for (tag, text) in header {
        root.push(Element::with_text(tag, text));
    }
    for field in schema.sorted_fields() {
        root.push(property_to_element(field, options.class_type_style));
    }
    root
}

/// One field element: its parameters, then the discriminator.
#[must_use]
pub fn property_to_element(property: &PropertyType, style: ClassTypeStyle) -> Element {
    let mut el = Element::new(property.name());
    for (tag, text) in property.parameters() {
        el.push(Element::with_text(tag, text));
    }
    let class_type = match style {
        ClassTypeStyle::Short => property.class_type().to_string(),
        ClassTypeStyle::Legacy => property.kind.legacy_class_type(),
    };
    el.push(Element::with_text(CLASS_TYPE_TAG, class_type));
    el
}

/// Serializes a class.
pub fn encode_schema(schema: &Schema, options: &CodecOptions) -> XmlResult<String> {
    schema_to_element(schema, options).to_xml(options.indent)
}

/// Reads a class. Blank input yields `Ok(None)`.
pub fn decode_schema(xml: &str, registry: &Registry) -> XmlResult<Option<Schema>> {
    if xml.trim().is_empty() {
        return Ok(None);
    }
    let root = Element::parse(xml)?;
    schema_from_element(&root, registry, xml).map(Some)
}

/// Builds a class from its element. `fragment` is reported in errors.
pub fn schema_from_element(root: &Element, registry: &Registry, fragment: &str) -> XmlResult<Schema> {
    let name = root
        .children
        .iter()
        .find(|c| c.name == "name" && c.children.is_empty())
        .map(|c| c.text.as_str())
        .ok_or_else(|| XmlError::missing("name", fragment))?;
    let mut schema = Schema::new(name);

    // Header elements are leaves; a field may share a header's tag.
    for child in &root.children {
        let text = child.text.as_str();
        match (child.name.as_str(), child.children.is_empty()) {
            ("name", true) => {}
            ("customClass", true) => schema.set_custom_class(text),
            ("customMapping", true) => schema.set_custom_mapping(text),
            ("defaultViewSheet", true) => schema.set_default_view_sheet(text),
            ("defaultEditSheet", true) => schema.set_default_edit_sheet(text),
            ("defaultWeb", true) => schema.set_default_web(text),
            ("nameField", true) => schema.set_name_field(text),
            ("validationScript", true) => schema.set_validation_script(text),
            _ => {
                if let Some(property) = property_from_element(child, registry)? {
                    schema.add_field(child.name.clone(), property);
                }
            }
        }
    }
    Ok(schema)
}

/// Builds one field. Elements without a discriminator are legacy tags and
/// yield `Ok(None)`.
pub fn property_from_element(el: &Element, registry: &Registry) -> XmlResult<Option<PropertyType>> {
    let Some(class_type) = el.child_text(CLASS_TYPE_TAG) else {
        warn!(element = %el.name, "Skipping element without classType");
        return Ok(None);
    };
    let mut property = registry.new_property(class_type, &el.name)?;
    for param in el.children.iter().filter(|c| c.name != CLASS_TYPE_TAG) {
        if !property.set_parameter(&param.name, &param.text)? {
            debug!(field = %el.name, parameter = %param.name, "Ignoring unknown parameter");
        }
    }
    Ok(Some(property))
}
