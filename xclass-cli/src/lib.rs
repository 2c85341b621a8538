//! Command implementations behind the `xclass` binary.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use xclass_model::{
    EngineConfig, Instance, NoScriptRunner, ObjectDiff, Registry, Schema, SearchCriteria,
    ValidationStatus,
};
use xclass_types::{FormMap, FormValue};
use xclass_xml::{CodecOptions, decode_schema, encode_instance, encode_schema};

/// Registry and codec settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    registry: Registry,
    options: CodecOptions,
}

/// Result of `new --validate`.
#[derive(Debug, Clone)]
pub struct Created {
    pub instance: Instance,
    pub valid: bool,
    pub status: ValidationStatus,
}

impl Engine {
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            registry: Registry::from_config(config),
            options: CodecOptions::from(&config.codec),
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Reads and decodes a class file.
    pub fn load_schema(&self, path: &Path) -> Result<Schema> {
        let xml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let schema = decode_schema(&xml, &self.registry)
            .with_context(|| format!("Failed to decode class from {}", path.display()))?;
        let Some(schema) = schema else {
            bail!("{} contains no class", path.display());
        };
        info!(class = %schema.name(), fields = schema.len(), "Loaded class");
        Ok(schema)
    }

    /// Re-encodes a class in canonical form.
    pub fn format(&self, schema: &Schema) -> Result<String> {
        encode_schema(schema, &self.options).context("Failed to encode class")
    }

    /// Creates an object from `field=value` pairs; repeated fields become
    /// multi-valued input.
    pub fn instantiate(&self, schema: &Schema, pairs: &[(String, String)]) -> Result<Instance> {
        let mut form = FormMap::new();
        for (key, value) in pairs {
            if !schema.contains(key) {
                debug!(field = %key, "Ignoring value for undeclared field");
            }
            match form.remove(key) {
                None => form.insert(key.clone(), FormValue::Single(value.clone())),
                Some(FormValue::Single(first)) => {
                    form.insert(key.clone(), FormValue::Multiple(vec![first, value.clone()]))
                }
                Some(FormValue::Multiple(mut items)) => {
                    items.push(value.clone());
                    form.insert(key.clone(), FormValue::Multiple(items))
                }
            };
        }
        schema
            .new_instance_from_form_map(&self.registry, &form)
            .with_context(|| format!("Failed to instantiate {}", schema.name()))
    }

    /// Creates and validates an object. Scripts cannot run from the command
    /// line, so classes with a validation script always fail.
    pub fn instantiate_validated(&self, schema: &Schema, pairs: &[(String, String)]) -> Result<Created> {
        let instance = self.instantiate(schema, pairs)?;
        let mut status = ValidationStatus::new();
        let valid = schema.validate_instance(&instance, &NoScriptRunner, &mut status);
        Ok(Created {
            instance,
            valid,
            status,
        })
    }

    pub fn encode_instance(&self, instance: &Instance) -> Result<String> {
        encode_instance(instance, &self.options).context("Failed to encode object")
    }
}

/// Field-level diff from `old` to `new`.
#[must_use]
pub fn diff(old: &Schema, new: &Schema) -> Vec<ObjectDiff> {
    new.diff(old)
}

/// One line per entry (`<action> <class>.<field>`), or a JSON array.
pub fn render_diff(entries: &[ObjectDiff], json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(entries).context("Failed to serialize diff");
    }
    Ok(entries
        .iter()
        .map(|d| format!("{:<8}{}.{}", d.action.as_str(), d.class_name, d.property_name))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Query clauses for `key=value` search parameters.
#[must_use]
pub fn query(schema: &Schema, pairs: &[(String, String)]) -> String {
    let criteria: SearchCriteria = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    schema.make_query(&criteria)
}

/// Human-readable validation failures, one per line.
#[must_use]
pub fn render_status(status: &ValidationStatus) -> String {
    let errors = status.errors().iter().map(|e| {
        if e.property_name.is_empty() {
            format!("{}: {}", e.class_name, e.message)
        } else {
            format!("{}.{}: {}", e.class_name, e.property_name, e.message)
        }
    });
    let exceptions = status.exceptions().iter().map(|e| format!("error: {e}"));
    errors.chain(exceptions).collect::<Vec<_>>().join("\n")
}

/// Parses `key=value`; the value may be empty or contain `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}
