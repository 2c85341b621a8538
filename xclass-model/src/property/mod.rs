//! Property types: the typed field declarations a class is made of.
//!
//! A [`PropertyType`] pairs the metadata every field has ([`PropertyMeta`]:
//! name, label, position, validation expression, ...) with a
//! [`PropertyKind`] variant carrying the type-specific parameters and value
//! coercion rules.
//!
//! Every variant implements the crate-private [`Behavior`] trait; the public
//! methods on [`PropertyType`] dispatch through [`PropertyKind::behavior`].

mod boolean;
mod date;
mod list;
mod number;
mod text;

pub use boolean::BooleanType;
pub use date::DateType;
pub use list::{
    DbListType, DbTreeListType, FreeText, LevelsType, ListSettings, ReferenceListType,
    StaticListType, KNOWN_RIGHTS,
};
pub use number::{NumberKind, NumberType};
pub use text::{PasswordType, StringType, TextAreaType};

use crate::query::QueryParams;
use crate::validation::ValidationStatus;
use crate::{ModelError, ModelResult};
use regex_lite::{Regex, RegexBuilder};
use xclass_types::{Value, ValueKind};

/// Prefix of the discriminators written by older exporters.
pub const LEGACY_CLASS_TYPE_PREFIX: &str = "com.xpn.xwiki.objects.classes.";

/// Raised by [`Behavior::set_parameter`] when a persisted parameter does not parse.
#[derive(Debug)]
pub(crate) struct InvalidParameter;

pub(crate) type ParamResult = Result<bool, InvalidParameter>;

/// Per-variant behavior behind [`PropertyType`].
pub(crate) trait Behavior {
    /// The value kind objects store for this field.
    fn value_kind(&self) -> ValueKind;

    fn from_string(&self, value: &str) -> Option<Value>;

    fn from_string_array(&self, values: &[String]) -> Option<Value> {
        values.first().and_then(|v| self.from_string(v))
    }

    fn from_value(&self, value: &Value) -> Option<Value> {
        self.from_string(&value.to_text())
    }

    /// Type-specific value checks; `Err` carries the failure message.
    fn check_value(&self, _value: Option<&Value>) -> Result<(), String> {
        Ok(())
    }

    fn make_query(&self, field: &str, params: &QueryParams, out: &mut Vec<String>);

    /// Type-specific persisted parameters, in serialization order.
    fn parameters(&self, out: &mut Vec<(&'static str, String)>);

    /// Applies one persisted parameter. `Ok(false)` means the tag is unknown.
    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult;
}

/// Metadata shared by every property type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMeta {
    /// Field name, unique within the owning class.
    pub name: String,
    /// Display label.
    pub pretty_name: String,
    /// 1-based position in the class; 0 until the class assigns one.
    pub number: u32,
    pub unmodifiable: bool,
    pub disabled: bool,
    pub custom_display: String,
    /// Expression values must match, optionally in `/pattern/flags` form.
    pub validation_regexp: String,
    pub validation_message: String,
    pub tooltip: String,
}

/// The concrete variant of a property type.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    String(StringType),
    Password(PasswordType),
    TextArea(TextAreaType),
    Boolean(BooleanType),
    Number(NumberType),
    Date(DateType),
    Users(ReferenceListType),
    Groups(ReferenceListType),
    Levels(LevelsType),
    StaticList(StaticListType),
    DbList(DbListType),
    DbTreeList(DbTreeListType),
}

impl PropertyKind {
    /// Discriminator identifying this variant in serialized classes.
    #[must_use]
    pub const fn class_type(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Password(_) => "Password",
            Self::TextArea(_) => "TextArea",
            Self::Boolean(_) => "Boolean",
            Self::Number(_) => "Number",
            Self::Date(_) => "Date",
            Self::Users(_) => "Users",
            Self::Groups(_) => "Groups",
            Self::Levels(_) => "Levels",
            Self::StaticList(_) => "StaticList",
            Self::DbList(_) => "DBList",
            Self::DbTreeList(_) => "DBTreeList",
        }
    }

    /// Discriminator in the fully-qualified form older exporters wrote.
    #[must_use]
    pub fn legacy_class_type(&self) -> String {
        format!("{LEGACY_CLASS_TYPE_PREFIX}{}Class", self.class_type())
    }

    /// List settings of the list-backed variants.
    #[must_use]
    pub const fn list_settings(&self) -> Option<&ListSettings> {
        match self {
            Self::Users(t) | Self::Groups(t) => Some(&t.list),
            Self::Levels(t) => Some(&t.list),
            Self::StaticList(t) => Some(&t.list),
            Self::DbList(t) => Some(&t.list),
            Self::DbTreeList(t) => Some(&t.db.list),
            _ => None,
        }
    }

    pub(crate) fn behavior(&self) -> &dyn Behavior {
        match self {
            Self::String(t) => t,
            Self::Password(t) => t,
            Self::TextArea(t) => t,
            Self::Boolean(t) => t,
            Self::Number(t) => t,
            Self::Date(t) => t,
            Self::Users(t) | Self::Groups(t) => t,
            Self::Levels(t) => t,
            Self::StaticList(t) => t,
            Self::DbList(t) => t,
            Self::DbTreeList(t) => t,
        }
    }

    pub(crate) fn behavior_mut(&mut self) -> &mut dyn Behavior {
        match self {
            Self::String(t) => t,
            Self::Password(t) => t,
            Self::TextArea(t) => t,
            Self::Boolean(t) => t,
            Self::Number(t) => t,
            Self::Date(t) => t,
            Self::Users(t) | Self::Groups(t) => t,
            Self::Levels(t) => t,
            Self::StaticList(t) => t,
            Self::DbList(t) => t,
            Self::DbTreeList(t) => t,
        }
    }
}

/// One field declaration of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyType {
    pub meta: PropertyMeta,
    pub kind: PropertyKind,
}

impl PropertyType {
    /// Creates an unnumbered property of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, pretty_name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            meta: PropertyMeta {
                name: name.into(),
                pretty_name: pretty_name.into(),
                ..PropertyMeta::default()
            },
            kind,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    #[must_use]
    pub fn pretty_name(&self) -> &str {
        &self.meta.pretty_name
    }

    #[must_use]
    pub const fn number(&self) -> u32 {
        self.meta.number
    }

    #[must_use]
    pub const fn class_type(&self) -> &'static str {
        self.kind.class_type()
    }

    /// The value kind objects store for this field.
    #[must_use]
    pub fn value_kind(&self) -> ValueKind {
        self.kind.behavior().value_kind()
    }

    /// Coerces one submitted string.
    #[must_use]
    pub fn from_string(&self, value: &str) -> Option<Value> {
        self.kind.behavior().from_string(value)
    }

    /// Coerces a submitted sequence of strings (multi-valued inputs).
    #[must_use]
    pub fn from_string_array(&self, values: &[String]) -> Option<Value> {
        self.kind.behavior().from_string_array(values)
    }

    /// Coerces an already-typed value.
    #[must_use]
    pub fn from_value(&self, value: &Value) -> Option<Value> {
        self.kind.behavior().from_value(value)
    }

    /// Validates one value of this field, recording failures in `status`.
    ///
    /// An absent value is validated as empty text against the validation
    /// expression.
    pub fn validate(&self, class_name: &str, value: Option<&Value>, status: &mut ValidationStatus) -> bool {
        let mut valid = true;

        if !self.meta.validation_regexp.is_empty() {
            let text = value.map(Value::to_text).unwrap_or_default();
            match compile_validation_regexp(&self.meta.validation_regexp) {
                Ok(re) => {
                    if !re.is_match(&text) {
                        status.add_error(class_name, self.name(), self.failure_message());
                        valid = false;
                    }
                }
                Err(e) => {
                    status.add_error(
                        class_name,
                        self.name(),
                        format!(
                            "invalid validation expression '{}': {e}",
                            self.meta.validation_regexp
                        ),
                    );
                    valid = false;
                }
            }
        }

        if let Err(message) = self.kind.behavior().check_value(value) {
            status.add_error(class_name, self.name(), message);
            valid = false;
        }

        valid
    }

    /// Appends storage query clauses for the criteria targeting this field.
    pub fn make_query(&self, params: &QueryParams, prefix: &str, out: &mut Vec<String>) {
        let field = format!("{prefix}{}", self.name());
        self.kind.behavior().make_query(&field, params, out);
    }

    /// Persisted parameters in serialization order: common metadata first,
    /// then the variant's own parameters. The discriminator is not included.
    #[must_use]
    pub fn parameters(&self) -> Vec<(&'static str, String)> {
        let m = &self.meta;
        let mut out = vec![
            ("name", m.name.clone()),
            ("prettyName", m.pretty_name.clone()),
            ("unmodifiable", bool_text(m.unmodifiable)),
            ("disabled", bool_text(m.disabled)),
            ("number", m.number.to_string()),
            ("customDisplay", m.custom_display.clone()),
            ("validationRegExp", m.validation_regexp.clone()),
            ("validationMessage", m.validation_message.clone()),
            ("tooltip", m.tooltip.clone()),
        ];
        self.kind.behavior().parameters(&mut out);
        out
    }

    /// Applies one persisted parameter. Returns `Ok(false)` for tags this
    /// property does not know.
    pub fn set_parameter(&mut self, tag: &str, text: &str) -> ModelResult<bool> {
        let result = match tag {
            "name" => {
                self.meta.name = text.to_string();
                Ok(true)
            }
            "prettyName" => {
                self.meta.pretty_name = text.to_string();
                Ok(true)
            }
            "unmodifiable" => parse_bool(text).map(|v| {
                self.meta.unmodifiable = v;
                true
            }),
            "disabled" => parse_bool(text).map(|v| {
                self.meta.disabled = v;
                true
            }),
            "number" => parse_num(text).map(|v| {
                self.meta.number = v;
                true
            }),
            "customDisplay" => {
                self.meta.custom_display = text.to_string();
                Ok(true)
            }
            "validationRegExp" => {
                self.meta.validation_regexp = text.to_string();
                Ok(true)
            }
            "validationMessage" => {
                self.meta.validation_message = text.to_string();
                Ok(true)
            }
            "tooltip" => {
                self.meta.tooltip = text.to_string();
                Ok(true)
            }
            _ => self.kind.behavior_mut().set_parameter(tag, text),
        };

        result.map_err(|InvalidParameter| ModelError::InvalidParameter {
            property: self.meta.name.clone(),
            parameter: tag.to_string(),
            value: text.to_string(),
        })
    }

    fn failure_message(&self) -> String {
        if !self.meta.validation_message.is_empty() {
            return self.meta.validation_message.clone();
        }
        let label = if self.meta.pretty_name.is_empty() {
            &self.meta.name
        } else {
            &self.meta.pretty_name
        };
        format!("{label} has an invalid value")
    }
}

/// Compiles a validation expression, honouring `/pattern/flags` delimiters.
fn compile_validation_regexp(expr: &str) -> Result<Regex, regex_lite::Error> {
    if let Some(rest) = expr.strip_prefix('/') {
        if let Some(end) = rest.rfind('/') {
            let (pattern, flags) = (&rest[..end], &rest[end + 1..]);
            return RegexBuilder::new(pattern)
                .case_insensitive(flags.contains('i'))
                .multi_line(flags.contains('m'))
                .dot_matches_new_line(flags.contains('s'))
                .ignore_whitespace(flags.contains('x'))
                .build();
        }
    }
    Regex::new(expr)
}

// ── Shared parameter and query helpers ───────────────────────────

pub(crate) fn bool_text(v: bool) -> String {
    if v { "1" } else { "0" }.to_string()
}

pub(crate) fn parse_bool(text: &str) -> Result<bool, InvalidParameter> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(InvalidParameter),
    }
}

pub(crate) fn parse_num<T: std::str::FromStr>(text: &str) -> Result<T, InvalidParameter> {
    text.trim().parse().map_err(|_| InvalidParameter)
}

/// Single-quoted storage literal with embedded quotes doubled.
pub(crate) fn sql_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// `'%s%'` pattern literal for substring matches.
pub(crate) fn like_literal(s: &str) -> String {
    format!("'%{}%'", s.replace('\'', "''"))
}

/// Joins alternative clauses: one clause as-is, several OR-ed in parentheses.
pub(crate) fn any_of(clauses: Vec<String>) -> Option<String> {
    match clauses.len() {
        0 => None,
        1 => clauses.into_iter().next(),
        _ => Some(format!("({})", clauses.join(" or "))),
    }
}
