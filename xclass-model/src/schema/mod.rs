//! Classes: named, ordered sets of property types.

mod fields;
mod mapping;

pub use fields::StaticListOptions;
pub use mapping::MappingStore;

use crate::diff::{ObjectDiff, diff_named};
use crate::instance::Instance;
use crate::property::PropertyType;
use crate::query::SearchCriteria;
use crate::registry::Registry;
use crate::ModelResult;
use tracing::{debug, warn};
use xclass_types::{FormMap, FormValue, ValueMap};

/// Class whose custom mapping is always the built-in one.
pub const PREFERENCES_CLASS: &str = "XWiki.XWikiPreferences";

/// Custom mapping naming the built-in storage mapping.
pub const INTERNAL_MAPPING: &str = "internal";

/// A class definition.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    name: String,
    custom_mapping: String,
    custom_class: String,
    default_view_sheet: String,
    default_edit_sheet: String,
    default_web: String,
    name_field: String,
    validation_script: String,
    fields: Vec<PropertyType>,
}

macro_rules! header_accessors {
    ($($get:ident / $set:ident),+ $(,)?) => {
        $(
            #[must_use]
            pub fn $get(&self) -> &str {
                &self.$get
            }

            pub fn $set(&mut self, value: impl Into<String>) {
                self.$get = value.into();
            }
        )+
    };
}

impl Schema {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    header_accessors! {
        custom_class / set_custom_class,
        default_view_sheet / set_default_view_sheet,
        default_edit_sheet / set_default_edit_sheet,
        default_web / set_default_web,
        name_field / set_name_field,
        validation_script / set_validation_script,
    }

    /// The stored custom mapping, without the preferences-class override.
    #[must_use]
    pub fn stored_custom_mapping(&self) -> &str {
        &self.custom_mapping
    }

    pub fn set_custom_mapping(&mut self, mapping: impl Into<String>) {
        self.custom_mapping = mapping.into();
    }

    // ── Fields ───────────────────────────────────────────────────

    /// Inserts `property` under `name`, replacing any field of that name in
    /// its original slot.
    ///
    /// A new field with number 0 is numbered after the existing fields; a
    /// replacement with number 0 keeps the replaced field's number.
    pub fn add_field(&mut self, name: impl Into<String>, mut property: PropertyType) {
        property.meta.name = name.into();
        match self.fields.iter_mut().find(|f| f.meta.name == property.meta.name) {
            Some(existing) => {
                if property.meta.number == 0 {
                    property.meta.number = existing.meta.number;
                }
                debug!(class = %self.name, field = %property.meta.name, "Replaced field");
                *existing = property;
            }
            None => {
                if property.meta.number == 0 {
                    property.meta.number = u32::try_from(self.fields.len() + 1).unwrap_or(u32::MAX);
                }
                debug!(
                    class = %self.name,
                    field = %property.meta.name,
                    number = property.meta.number,
                    "Added field"
                );
                self.fields.push(property);
            }
        }
    }

    /// Inserts `property` under its own name.
    pub fn put(&mut self, property: PropertyType) {
        let name = property.meta.name.clone();
        self.add_field(name, property);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyType> {
        self.fields.iter().find(|f| f.meta.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PropertyType> {
        self.fields.iter_mut().find(|f| f.meta.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[PropertyType] {
        &self.fields
    }

    /// Fields by ascending number; equal numbers keep insertion order.
    #[must_use]
    pub fn sorted_fields(&self) -> Vec<&PropertyType> {
        let mut sorted: Vec<&PropertyType> = self.fields.iter().collect();
        sorted.sort_by_key(|f| f.meta.number);
        sorted
    }

    /// Field names in field order.
    #[must_use]
    pub fn property_names(&self) -> Vec<&str> {
        self.sorted_fields().into_iter().map(PropertyType::name).collect()
    }

    pub fn remove_field(&mut self, name: &str) -> Option<PropertyType> {
        let index = self.fields.iter().position(|f| f.meta.name == name)?;
        Some(self.fields.remove(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // ── Instantiation ────────────────────────────────────────────

    /// Creates an empty object of this class, through the registered custom
    /// class factory when one is declared.
    pub fn new_instance(&self, registry: &Registry) -> ModelResult<Instance> {
        let mut instance = registry.new_instance(&self.custom_class)?;
        instance.class_name.clone_from(&self.name);
        Ok(instance)
    }

    /// Creates an object populated from submitted form data.
    pub fn new_instance_from_form_map(&self, registry: &Registry, map: &FormMap) -> ModelResult<Instance> {
        let mut instance = self.new_instance(registry)?;
        self.apply_form_map(&mut instance, map);
        Ok(instance)
    }

    /// Creates an object populated from pre-typed values.
    pub fn new_instance_from_value_map(&self, registry: &Registry, map: &ValueMap) -> ModelResult<Instance> {
        let mut instance = self.new_instance(registry)?;
        self.apply_value_map(&mut instance, map);
        Ok(instance)
    }

    /// Coerces and stores every form entry naming a field of this class.
    /// Fields without an entry are left untouched.
    pub fn apply_form_map(&self, instance: &mut Instance, map: &FormMap) {
        for field in self.sorted_fields() {
            let Some(input) = map.get(field.name()) else {
                continue;
            };
            let value = match input {
                FormValue::Single(s) => field.from_string(s),
                FormValue::Multiple(items) => field.from_string_array(items),
            };
            match value {
                Some(v) => instance.put(field.name(), v),
                None => debug!(class = %self.name, field = %field.name(), "Input not coerced, field left unset"),
            }
        }
    }

    /// Coerces and stores every typed value naming a field of this class.
    pub fn apply_value_map(&self, instance: &mut Instance, map: &ValueMap) {
        for field in self.sorted_fields() {
            let Some(input) = map.get(field.name()) else {
                continue;
            };
            match field.from_value(input) {
                Some(v) => instance.put(field.name(), v),
                None => debug!(class = %self.name, field = %field.name(), "Value not coerced, field left unset"),
            }
        }
    }

    // ── Diff & query ─────────────────────────────────────────────

    /// Field-level changes from `old` to `self`. Header changes are not
    /// reported.
    #[must_use]
    pub fn diff(&self, old: &Self) -> Vec<ObjectDiff> {
        if self.name != old.name {
            warn!(new = %self.name, old = %old.name, "Diffing classes with different names");
        }
        diff_named(
            &self.name,
            0,
            &self.named_fields(),
            &old.named_fields(),
            |_| String::new(),
        )
    }

    fn named_fields(&self) -> Vec<(&str, &PropertyType)> {
        self.sorted_fields().into_iter().map(|f| (f.name(), f)).collect()
    }

    /// Storage query clauses for the criteria addressed to this class,
    /// joined with `and`. Empty when no criterion applies.
    #[must_use]
    pub fn make_query(&self, criteria: &SearchCriteria) -> String {
        self.make_query_with_prefix(criteria, "")
    }

    /// As [`Schema::make_query`], qualifying every field with `prefix`.
    #[must_use]
    pub fn make_query_with_prefix(&self, criteria: &SearchCriteria, prefix: &str) -> String {
        let mut clauses = Vec::new();
        for field in self.sorted_fields() {
            let params = criteria.parameters(&format!("{}_{}", self.name, field.name()));
            if !params.is_empty() {
                field.make_query(&params, prefix, &mut clauses);
            }
        }
        clauses.join(" and ")
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.custom_mapping == other.custom_mapping
            && self.custom_class == other.custom_class
            && self.default_view_sheet == other.default_view_sheet
            && self.default_edit_sheet == other.default_edit_sheet
            && self.default_web == other.default_web
            && self.name_field == other.name_field
            && self.validation_script == other.validation_script
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|f| other.get(&f.meta.name) == Some(f))
    }
}
