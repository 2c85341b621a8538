//! Dynamic class model for xclass.
//!
//! Defines the runtime-declared class system every other xclass crate builds on:
//! - [`Schema`]: a named, ordered set of typed fields plus class metadata
//! - [`PropertyType`] / [`PropertyKind`]: one field declaration and its
//!   type-specific parameters and coercion rules
//! - [`Instance`] / [`PropertyValue`]: an object holding values for a class
//! - [`Registry`]: discriminator and custom-class lookup used for instantiation
//! - [`ObjectDiff`]: property-level changes between two snapshots
//! - [`SearchCriteria`]: search parameters turned into storage query clauses
//! - [`ValidationStatus`] / [`ScriptRunner`]: validation results and the
//!   script collaborator
//! - [`EngineConfig`]: property defaults and codec settings from `xclass.toml`
//!
//! Persistence, rendering and script execution are external; they plug in
//! through [`MappingStore`], [`ScriptRunner`] and [`InstanceFactory`].

mod config;
mod diff;
mod error;
mod instance;
pub mod property;
mod query;
mod registry;
mod schema;
mod validation;

pub use config::{ClassTypeStyle, CodecConfig, EngineConfig, PasswordStorage, PropertyDefaults};
pub use diff::{DiffAction, ObjectDiff};
pub use error::{ModelError, ModelResult};
pub use instance::{Instance, PropertyValue};
pub use property::{PropertyKind, PropertyMeta, PropertyType};
pub use query::{QueryParams, SearchCriteria};
pub use registry::{InstanceFactory, PropertyFactory, Registry};
pub use schema::{INTERNAL_MAPPING, MappingStore, PREFERENCES_CLASS, Schema, StaticListOptions};
pub use validation::{
    NoScriptRunner, ScriptError, ScriptRunner, ValidationError, ValidationStatus,
};
