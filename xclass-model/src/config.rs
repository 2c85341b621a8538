//! Engine configuration: read from an `xclass.toml` file.
//!
//! ```toml
//! [defaults]
//! date_format = "dd/MM/yyyy HH:mm:ss"
//! list_separators = " ,|"
//! password_storage = "hash"
//!
//! [codec]
//! indent = 2
//! class_type_style = "short"
//! ```

use crate::ModelResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};
use xclass_types::DEFAULT_DATE_PATTERN;

/// How password properties store submitted values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStorage {
    #[default]
    /// Salted digest.
    Hash,
    /// Plain text.
    Clear,
}

impl PasswordStorage {
    /// Persisted spelling of the storage type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hash => "Hash",
            Self::Clear => "Clear",
        }
    }

    /// Reads the persisted spelling (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Some(Self::Hash),
            "clear" => Some(Self::Clear),
            _ => None,
        }
    }
}

/// Which discriminator spelling the codec writes for property types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassTypeStyle {
    #[default]
    /// `String`, `StaticList`, ...
    Short,
    /// `com.xpn.xwiki.objects.classes.StringClass`, ...
    Legacy,
}

/// Defaults applied to property types created by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDefaults {
    pub date_format: String,
    pub list_separators: String,
    pub password_storage: PasswordStorage,
}

impl Default for PropertyDefaults {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_PATTERN.to_string(),
            list_separators: " ,|".to_string(),
            password_storage: PasswordStorage::Hash,
        }
    }
}

/// Serialization settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Spaces per nesting level; 0 writes compact XML.
    pub indent: usize,
    pub class_type_style: ClassTypeStyle,
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub defaults: PropertyDefaults,
    pub codec: CodecConfig,
}

impl EngineConfig {
    /// Parses configuration from TOML text. Missing sections keep defaults.
    pub fn from_toml_str(contents: &str) -> ModelResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads configuration from a file, failing on I/O or parse errors.
    pub fn load_from(path: &Path) -> ModelResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "Loaded engine configuration");
        Ok(config)
    }

    /// Loads configuration from a file if it exists.
    /// Falls back to defaults with a warning on parse errors.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!(path = %path.display(), "No configuration file found, using defaults");
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load configuration, falling back to defaults"
                );
                Self::default()
            }
        }
    }
}
