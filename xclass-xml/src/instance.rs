//! Object serialization.
//!
//! ```xml
//! <object>
//!   <name>Space.Page</name>
//!   <number>0</number>
//!   <className>Space.Class</className>
//!   <guid>...</guid>
//!   <property><title>Hello</title></property>
//!   <property><tags><value>a</value><value>b</value></tags></property>
//! </object>
//! ```

use crate::element::Element;
use crate::{CodecOptions, XmlError, XmlResult};
use tracing::{debug, warn};
use uuid::Uuid;
use xclass_model::{Instance, PropertyType, Schema};
use xclass_types::{Value, ValueKind};

pub const OBJECT_TAG: &str = "object";
const PROPERTY_TAG: &str = "property";
const LIST_ITEM_TAG: &str = "value";

#[must_use]
pub fn instance_to_element(instance: &Instance) -> Element {
    let mut root = Element::new(OBJECT_TAG);
    root.push(Element::with_text("name", instance.owner.as_str()));
    root.push(Element::with_text("number", instance.number.to_string()));
    root.push(Element::with_text("className", instance.class_name.as_str()));
    root.push(Element::with_text("guid", instance.guid.to_string()));

    for prop in instance.properties() {
        let field = match prop.value.as_list() {
            Some(items) => {
                let mut el = Element::new(prop.name.as_str());
                for item in items {
                    el.push(Element::with_text(LIST_ITEM_TAG, item.as_str()));
                }
                el
            }
            None => Element::with_text(prop.name.as_str(), prop.value.to_text()),
        };
        let mut wrapper = Element::new(PROPERTY_TAG);
        wrapper.push(field);
        root.push(wrapper);
    }
    root
}

/// Serializes an object.
pub fn encode_instance(instance: &Instance, options: &CodecOptions) -> XmlResult<String> {
    instance_to_element(instance).to_xml(options.indent)
}

/// Reads an object of `schema`. Blank input yields `Ok(None)`.
pub fn decode_instance(xml: &str, schema: &Schema) -> XmlResult<Option<Instance>> {
    if xml.trim().is_empty() {
        return Ok(None);
    }
    let root = Element::parse(xml)?;
    instance_from_element(&root, schema, xml).map(Some)
}

/// Builds an object from its element, typing each value through `schema`.
/// Properties the class does not declare are skipped.
pub fn instance_from_element(root: &Element, schema: &Schema, fragment: &str) -> XmlResult<Instance> {
    let class_name = root
        .child_text("className")
        .ok_or_else(|| XmlError::missing("className", fragment))?;
    if class_name != schema.name() {
        warn!(object_class = %class_name, class = %schema.name(), "Decoding object against a different class");
    }

    let mut instance = Instance::new(class_name);
    instance.owner = root.child_text("name").unwrap_or_default().to_string();
    if let Some(number) = root.child_text("number") {
        instance.number = number
            .trim()
            .parse()
            .map_err(|_| XmlError::parse(format!("invalid object number '{number}'"), fragment))?;
    }
    if let Some(guid) = root.child_text("guid").filter(|g| !g.trim().is_empty()) {
        instance.guid = Uuid::parse_str(guid.trim())
            .map_err(|e| XmlError::parse(format!("invalid guid '{guid}': {e}"), fragment))?;
    }

    for wrapper in root.children.iter().filter(|c| c.name == PROPERTY_TAG) {
        for field in &wrapper.children {
            let Some(property) = schema.get(&field.name) else {
                debug!(class = %schema.name(), field = %field.name, "Skipping undeclared property");
                continue;
            };
            let value = read_value(field, property)?;
            instance.put(field.name.as_str(), value);
        }
    }
    Ok(instance)
}

fn read_value(field: &Element, property: &PropertyType) -> XmlResult<Value> {
    let kind = property.value_kind();
    if !kind.is_list() {
        return Ok(Value::parse_as(kind, &field.text)?);
    }
    let items = if !field.children.is_empty() || field.text.is_empty() {
        field
            .children
            .iter()
            .filter(|c| c.name == LIST_ITEM_TAG)
            .map(|c| c.text.clone())
            .collect()
    } else {
        // Joined textual form, split on the field's own separators.
        match property.kind.list_settings() {
            Some(list) => list.split(&field.text),
            None => return Ok(Value::parse_as(kind, &field.text)?),
        }
    };
    Ok(match kind {
        ValueKind::DbStringList => Value::DbStringList(items),
        _ => Value::StringList(items),
    })
}
