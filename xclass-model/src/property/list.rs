//! List-backed property types.
//!
//! Every list variant shares [`ListSettings`], which decides whether values
//! are a single string or a list of items and how submitted text is split.
//! The variants differ in where their allowed values come from: user and
//! group references, access rights, a static option list, or a storage query.

use super::{
    Behavior, InvalidParameter, ParamResult, any_of, bool_text, like_literal, parse_bool,
    parse_num, sql_literal,
};
use crate::query::QueryParams;
use xclass_types::{Value, ValueKind};

/// Rights a levels field may hold.
pub const KNOWN_RIGHTS: &[&str] = &[
    "view",
    "comment",
    "edit",
    "delete",
    "undelete",
    "register",
    "admin",
    "programming",
    "login",
];

/// Settings shared by every list variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSettings {
    pub size: u32,
    pub multi_select: bool,
    /// Multi-select values are stored one row per item.
    pub relational_storage: bool,
    /// `select`, `radio`, `checkbox`, `input`.
    pub display_type: String,
    /// Characters any of which splits submitted text into items.
    pub separators: String,
    /// Separator used when displaying several items.
    pub separator: String,
    pub cache: bool,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self::with_separators(" ,|")
    }
}

impl ListSettings {
    #[must_use]
    pub fn with_separators(separators: impl Into<String>) -> Self {
        Self {
            size: 1,
            multi_select: false,
            relational_storage: false,
            display_type: "select".to_string(),
            separators: separators.into(),
            separator: " ".to_string(),
            cache: false,
        }
    }

    /// Multi-select settings of the given display size.
    #[must_use]
    pub fn multi(mut self, size: u32) -> Self {
        self.size = size;
        self.multi_select = true;
        self
    }

    /// Splits text on any separator character, dropping empty items.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        text.split(|c: char| self.separators.contains(c))
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn value_kind(&self) -> ValueKind {
        match (self.multi_select, self.relational_storage) {
            (false, _) => ValueKind::String,
            (true, false) => ValueKind::StringList,
            (true, true) => ValueKind::DbStringList,
        }
    }

    fn list_value(&self, items: Vec<String>) -> Value {
        if self.relational_storage {
            Value::DbStringList(items)
        } else {
            Value::StringList(items)
        }
    }

    fn from_string(&self, value: &str) -> Option<Value> {
        if self.multi_select {
            Some(self.list_value(self.split(value)))
        } else {
            Some(Value::String(value.to_string()))
        }
    }

    fn from_string_array(&self, values: &[String]) -> Option<Value> {
        match values {
            [] => None,
            [single] => self.from_string(single),
            _ if self.multi_select => Some(self.list_value(
                values.iter().filter(|v| !v.is_empty()).cloned().collect(),
            )),
            [first, ..] => Some(Value::String(first.clone())),
        }
    }

    fn from_value(&self, value: &Value) -> Option<Value> {
        match value.as_list() {
            Some(items) => self.from_string_array(items),
            None => self.from_string(&value.to_text()),
        }
    }

    fn make_query(&self, field: &str, params: &QueryParams, out: &mut Vec<String>) {
        let Some(values) = params.get("") else {
            return;
        };
        let clauses = values
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| {
                if self.multi_select {
                    format!("{field} like {}", like_literal(v))
                } else {
                    format!("{field} = {}", sql_literal(v))
                }
            })
            .collect();
        if let Some(clause) = any_of(clauses) {
            out.push(clause);
        }
    }

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        out.push(("size", self.size.to_string()));
        out.push(("multiSelect", bool_text(self.multi_select)));
        out.push(("relationalStorage", bool_text(self.relational_storage)));
        out.push(("displayType", self.display_type.clone()));
        out.push(("separators", self.separators.clone()));
        out.push(("separator", self.separator.clone()));
        out.push(("cache", bool_text(self.cache)));
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        match tag {
            "size" => self.size = parse_num(text)?,
            "multiSelect" => self.multi_select = parse_bool(text)?,
            "relationalStorage" => self.relational_storage = parse_bool(text)?,
            "displayType" => self.display_type = text.to_string(),
            "separators" => self.separators = text.to_string(),
            "separator" => self.separator = text.to_string(),
            "cache" => self.cache = parse_bool(text)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Forwards the coercion and query half of [`Behavior`] to the variant's
/// [`ListSettings`].
macro_rules! list_coercion {
    ($($path:ident).+) => {
        fn value_kind(&self) -> ValueKind {
            self.$($path).+.value_kind()
        }

        fn from_string(&self, value: &str) -> Option<Value> {
            self.$($path).+.from_string(value)
        }

        fn from_string_array(&self, values: &[String]) -> Option<Value> {
            self.$($path).+.from_string_array(values)
        }

        fn from_value(&self, value: &Value) -> Option<Value> {
            self.$($path).+.from_value(value)
        }

        fn make_query(&self, field: &str, params: &QueryParams, out: &mut Vec<String>) {
            self.$($path).+.make_query(field, params, out);
        }
    };
}

// ── Users / Groups ───────────────────────────────────────────────

/// References to user or group documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceListType {
    pub list: ListSettings,
    /// Offer a pick list instead of a free input.
    pub uses_list: bool,
}

impl Behavior for ReferenceListType {
    list_coercion!(list);

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        self.list.parameters(out);
        out.push(("usesList", bool_text(self.uses_list)));
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        if tag == "usesList" {
            self.uses_list = parse_bool(text)?;
            return Ok(true);
        }
        self.list.set_parameter(tag, text)
    }
}

// ── Levels ───────────────────────────────────────────────────────

/// Access rights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelsType {
    pub list: ListSettings,
}

impl Behavior for LevelsType {
    list_coercion!(list);

    fn check_value(&self, value: Option<&Value>) -> Result<(), String> {
        let Some(value) = value else {
            return Ok(());
        };
        let unknown: Vec<String> = value
            .items()
            .into_iter()
            .filter(|r| !r.is_empty() && !KNOWN_RIGHTS.contains(&r.as_str()))
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(format!("unknown rights: {}", unknown.join(", ")))
        }
    }

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        self.list.parameters(out);
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        self.list.set_parameter(tag, text)
    }
}

// ── Static list ──────────────────────────────────────────────────

/// Whether a static list accepts values outside its options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FreeText {
    #[default]
    Allowed,
    Forbidden,
    Discouraged,
}

impl FreeText {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Forbidden => "forbidden",
            Self::Discouraged => "discouraged",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "allowed" => Some(Self::Allowed),
            "forbidden" => Some(Self::Forbidden),
            "discouraged" => Some(Self::Discouraged),
            _ => None,
        }
    }
}

/// Options declared inline as `key|key=Label|...`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticListType {
    pub list: ListSettings,
    pub values: String,
    pub free_text: FreeText,
}

impl StaticListType {
    /// Declared options as `(key, label)`; the label defaults to the key.
    #[must_use]
    pub fn options(&self) -> Vec<(String, String)> {
        self.values
            .split('|')
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once('=') {
                Some((key, label)) => (key.to_string(), label.to_string()),
                None => (entry.to_string(), entry.to_string()),
            })
            .collect()
    }
}

impl Behavior for StaticListType {
    list_coercion!(list);

    fn check_value(&self, value: Option<&Value>) -> Result<(), String> {
        let (FreeText::Forbidden, Some(value)) = (self.free_text, value) else {
            return Ok(());
        };
        let options = self.options();
        let unknown: Vec<String> = value
            .items()
            .into_iter()
            .filter(|item| !item.is_empty() && !options.iter().any(|(key, _)| key == item))
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(format!("values not allowed: {}", unknown.join(", ")))
        }
    }

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        self.list.parameters(out);
        out.push(("values", self.values.clone()));
        out.push(("freeText", self.free_text.as_str().to_string()));
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        match tag {
            "values" => self.values = text.to_string(),
            "freeText" => self.free_text = FreeText::parse(text).ok_or(InvalidParameter)?,
            _ => return self.list.set_parameter(tag, text),
        }
        Ok(true)
    }
}

// ── Database lists ───────────────────────────────────────────────

/// Options produced by a storage query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbListType {
    pub list: ListSettings,
    pub sql: String,
    pub classname: String,
    pub id_field: String,
    pub value_field: String,
}

impl Behavior for DbListType {
    list_coercion!(list);

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        self.list.parameters(out);
        out.push(("sql", self.sql.clone()));
        out.push(("classname", self.classname.clone()));
        out.push(("idField", self.id_field.clone()));
        out.push(("valueField", self.value_field.clone()));
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        match tag {
            "sql" => self.sql = text.to_string(),
            "classname" => self.classname = text.to_string(),
            "idField" => self.id_field = text.to_string(),
            "valueField" => self.value_field = text.to_string(),
            _ => return self.list.set_parameter(tag, text),
        }
        Ok(true)
    }
}

/// Query-backed options arranged in a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbTreeListType {
    pub db: DbListType,
    pub parent_field: String,
}

impl Behavior for DbTreeListType {
    list_coercion!(db.list);

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        self.db.parameters(out);
        out.push(("parentField", self.parent_field.clone()));
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        if tag == "parentField" {
            self.parent_field = text.to_string();
            return Ok(true);
        }
        self.db.set_parameter(tag, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_drops_empty_items() {
        let list = ListSettings::default();
        assert_eq!(list.split("a,,b| c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn options_default_label_to_key() {
        let t = StaticListType {
            values: "a|b=Bee".into(),
            ..StaticListType::default()
        };
        assert_eq!(
            t.options(),
            vec![("a".into(), "a".into()), ("b".into(), "Bee".into())]
        );
    }

    #[test]
    fn lone_array_element_is_split_when_multi() {
        let list = ListSettings::default().multi(5);
        assert_eq!(
            list.from_string_array(&["x,y".to_string()]),
            Some(Value::StringList(vec!["x".into(), "y".into()]))
        );
    }
}
