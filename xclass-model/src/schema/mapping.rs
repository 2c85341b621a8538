//! Custom storage mappings.
//!
//! A class may declare that its objects are stored in dedicated relational
//! tables instead of the generic property tables. The mapping itself lives in
//! the storage layer; this module only answers which kind of mapping a class
//! uses and asks the [`MappingStore`] whether it is usable.

use super::{INTERNAL_MAPPING, PREFERENCES_CLASS, Schema};
use crate::{ModelError, ModelResult};

/// Storage-layer collaborator that knows the external mappings.
pub trait MappingStore {
    /// Whether `mapping` can store objects of `schema`.
    fn is_custom_mapping_valid(&self, schema: &Schema, mapping: &str) -> ModelResult<bool>;

    /// Fields of `schema` covered by its mapping.
    fn custom_mapping_fields(&self, schema: &Schema) -> ModelResult<Vec<String>>;
}

impl Schema {
    /// Effective custom mapping. The preferences class always uses the
    /// built-in mapping.
    #[must_use]
    pub fn custom_mapping(&self) -> &str {
        if self.name == PREFERENCES_CLASS {
            INTERNAL_MAPPING
        } else {
            &self.custom_mapping
        }
    }

    /// The effective mapping is non-empty. Whitespace counts as a mapping.
    #[must_use]
    pub fn has_custom_mapping(&self) -> bool {
        !self.custom_mapping().is_empty()
    }

    /// The effective mapping is set and is not the built-in one.
    #[must_use]
    pub fn has_external_custom_mapping(&self) -> bool {
        let mapping = self.custom_mapping();
        !mapping.is_empty() && mapping != INTERNAL_MAPPING
    }

    /// The stored mapping is literally `internal`. The preferences override
    /// is not consulted.
    #[must_use]
    pub fn has_internal_custom_mapping(&self) -> bool {
        self.custom_mapping == INTERNAL_MAPPING
    }

    /// Asks the store whether `mapping` fits this class; blank mappings
    /// always fit.
    pub fn is_custom_mapping_valid(&self, store: &dyn MappingStore, mapping: &str) -> ModelResult<bool> {
        if mapping.trim().is_empty() {
            return Ok(true);
        }
        store.is_custom_mapping_valid(self, mapping)
    }

    /// Fails with [`ModelError::Mapping`] when the class's mapping is rejected.
    pub fn check_custom_mapping(&self, store: &dyn MappingStore) -> ModelResult<()> {
        let mapping = self.custom_mapping();
        if self.is_custom_mapping_valid(store, mapping)? {
            Ok(())
        } else {
            Err(ModelError::Mapping {
                class_name: self.name.clone(),
                mapping: mapping.to_string(),
                reason: "rejected by the mapping store".to_string(),
            })
        }
    }

    /// Fields covered by the class's mapping; empty without one.
    pub fn custom_mapping_property_list(&self, store: &dyn MappingStore) -> ModelResult<Vec<String>> {
        if self.custom_mapping().trim().is_empty() {
            return Ok(Vec::new());
        }
        store.custom_mapping_fields(self)
    }
}
