//! Objects: values conforming to a class.

use crate::diff::{ObjectDiff, diff_named};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;
use xclass_types::{ObjectReference, Value};

/// One named value owned by an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub name: String,
    pub value: Value,
}

/// An object of some class, attached to an owning document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub class_name: String,
    /// Ordinal among the owner's objects of the same class.
    pub number: u32,
    /// Owning document name; may be empty.
    pub owner: String,
    pub guid: Uuid,
    properties: Vec<PropertyValue>,
}

impl Default for Instance {
    fn default() -> Self {
        Self::new("")
    }
}

impl Instance {
    /// Creates an empty object with a fresh guid.
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            number: 0,
            owner: String::new(),
            guid: Uuid::new_v4(),
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).map(|p| &p.value)
    }

    /// Sets a value, replacing in place or appending.
    pub fn put(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value,
            None => self.properties.push(PropertyValue { name, value }),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.properties.iter().position(|p| p.name == name)?;
        Some(self.properties.remove(index).value)
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyValue] {
        &self.properties
    }

    #[must_use]
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    #[must_use]
    pub fn reference(&self) -> ObjectReference {
        ObjectReference::new(self.class_name.clone(), self.number)
    }

    /// Property-level changes from `old` to `self`.
    #[must_use]
    pub fn diff(&self, old: &Self) -> Vec<ObjectDiff> {
        if self.class_name != old.class_name || self.number != old.number {
            warn!(
                new = %self.reference(),
                old = %old.reference(),
                "Diffing objects with different identities"
            );
        }
        diff_named(
            &self.class_name,
            self.number,
            &self.named_values(),
            &old.named_values(),
            Value::to_text,
        )
    }

    fn named_values(&self) -> Vec<(&str, &Value)> {
        self.properties.iter().map(|p| (p.name.as_str(), &p.value)).collect()
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name
            && self.number == other.number
            && self.owner == other.owner
            && self.properties.len() == other.properties.len()
            && self
                .properties
                .iter()
                .all(|p| other.value(&p.name) == Some(&p.value))
    }
}
