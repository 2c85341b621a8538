//! Property-type and object-factory registry.
//!
//! The registry replaces name-based reflective construction: serialized
//! classes name their property types by discriminator (`String`,
//! `StaticList`, ... or the legacy fully-qualified spelling) and classes may
//! name a custom object factory. Both resolve through this table, which is
//! built once at start-up and then shared by reference.

use crate::config::{EngineConfig, PropertyDefaults};
use crate::instance::Instance;
use crate::property::{
    BooleanType, DateType, DbListType, DbTreeListType, LEGACY_CLASS_TYPE_PREFIX, LevelsType,
    ListSettings, NumberType, PasswordType, PropertyKind, PropertyType, ReferenceListType,
    StaticListType, StringType, TextAreaType,
};
use crate::{ModelError, ModelResult};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds the default variant for one discriminator.
pub type PropertyFactory = fn(&PropertyDefaults) -> PropertyKind;

/// Produces objects for classes declaring a custom class.
pub trait InstanceFactory: Send + Sync {
    fn instantiate(&self) -> Instance;
}

impl<F> InstanceFactory for F
where
    F: Fn() -> Instance + Send + Sync,
{
    fn instantiate(&self) -> Instance {
        self()
    }
}

fn list_settings(d: &PropertyDefaults) -> ListSettings {
    ListSettings::with_separators(d.list_separators.clone())
}

const BUILTIN_PROPERTIES: &[(&str, PropertyFactory)] = &[
    ("String", |_| PropertyKind::String(StringType::default())),
    ("Password", |d| PropertyKind::Password(PasswordType::new(d.password_storage))),
    ("TextArea", |_| PropertyKind::TextArea(TextAreaType::default())),
    ("Boolean", |_| PropertyKind::Boolean(BooleanType::default())),
    ("Number", |_| PropertyKind::Number(NumberType::default())),
    ("Date", |d| PropertyKind::Date(DateType::with_format(d.date_format.clone()))),
    ("Users", |d| {
        PropertyKind::Users(ReferenceListType {
            list: list_settings(d),
            uses_list: false,
        })
    }),
    ("Groups", |d| {
        PropertyKind::Groups(ReferenceListType {
            list: list_settings(d),
            uses_list: false,
        })
    }),
    ("Levels", |d| PropertyKind::Levels(LevelsType { list: list_settings(d) })),
    ("StaticList", |d| {
        PropertyKind::StaticList(StaticListType {
            list: list_settings(d),
            ..StaticListType::default()
        })
    }),
    ("DBList", |d| {
        PropertyKind::DbList(DbListType {
            list: list_settings(d),
            ..DbListType::default()
        })
    }),
    ("DBTreeList", |d| {
        PropertyKind::DbTreeList(DbTreeListType {
            db: DbListType {
                list: list_settings(d),
                ..DbListType::default()
            },
            parent_field: String::new(),
        })
    }),
];

/// Discriminator and object-factory table.
#[derive(Clone)]
pub struct Registry {
    defaults: PropertyDefaults,
    properties: HashMap<String, PropertyFactory>,
    aliases: HashMap<String, String>,
    instance_factories: HashMap<String, Arc<dyn InstanceFactory>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut class_types = self.class_types();
        class_types.sort_unstable();
        let mut factories: Vec<&str> = self.instance_factories.keys().map(String::as_str).collect();
        factories.sort_unstable();
        f.debug_struct("Registry")
            .field("defaults", &self.defaults)
            .field("class_types", &class_types)
            .field("aliases", &self.aliases.len())
            .field("instance_factories", &factories)
            .finish()
    }
}

impl Registry {
    /// Registry with every built-in property type and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(PropertyDefaults::default())
    }

    /// Registry applying the configured property defaults.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_defaults(config.defaults.clone())
    }

    #[must_use]
    pub fn with_defaults(defaults: PropertyDefaults) -> Self {
        let mut registry = Self {
            defaults,
            properties: HashMap::new(),
            aliases: HashMap::new(),
            instance_factories: HashMap::new(),
        };
        for &(class_type, factory) in BUILTIN_PROPERTIES {
            registry.register_property(class_type, factory);
            registry.register_alias(format!("{LEGACY_CLASS_TYPE_PREFIX}{class_type}Class"), class_type);
        }
        registry
    }

    /// Registers (or replaces) the factory for a discriminator.
    pub fn register_property(&mut self, class_type: impl Into<String>, factory: PropertyFactory) {
        let class_type = class_type.into();
        debug!(class_type = %class_type, "Registered property type");
        self.properties.insert(class_type, factory);
    }

    /// Maps an alternative discriminator onto a registered one.
    pub fn register_alias(&mut self, alias: impl Into<String>, class_type: impl Into<String>) {
        self.aliases.insert(alias.into(), class_type.into());
    }

    /// Registers the object factory used by classes whose custom class is `name`.
    pub fn register_instance_factory(&mut self, name: impl Into<String>, factory: Arc<dyn InstanceFactory>) {
        let name = name.into();
        debug!(custom_class = %name, "Registered instance factory");
        self.instance_factories.insert(name, factory);
    }

    #[must_use]
    pub const fn defaults(&self) -> &PropertyDefaults {
        &self.defaults
    }

    /// Registered discriminators (aliases excluded).
    #[must_use]
    pub fn class_types(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }

    /// Resolves a discriminator or alias to its canonical discriminator.
    #[must_use]
    pub fn resolve(&self, class_type: &str) -> Option<&str> {
        let class_type = class_type.trim();
        let canonical = self.aliases.get(class_type).map_or(class_type, String::as_str);
        self.properties
            .get_key_value(canonical)
            .map(|(k, _)| k.as_str())
    }

    /// Creates a default-configured property of the given type.
    pub fn new_property(&self, class_type: &str, name: &str) -> ModelResult<PropertyType> {
        let factory = self
            .resolve(class_type)
            .and_then(|canonical| self.properties.get(canonical))
            .ok_or_else(|| ModelError::Instantiation {
                kind: "property type",
                name: class_type.to_string(),
            })?;
        Ok(PropertyType::new(name, name, factory(&self.defaults)))
    }

    /// Creates an object through the factory registered as `custom_class`;
    /// an empty name yields a plain [`Instance`].
    pub fn new_instance(&self, custom_class: &str) -> ModelResult<Instance> {
        if custom_class.trim().is_empty() {
            return Ok(Instance::default());
        }
        self.instance_factories
            .get(custom_class)
            .map(|f| f.instantiate())
            .ok_or_else(|| ModelError::Instantiation {
                kind: "custom class",
                name: custom_class.to_string(),
            })
    }
}
