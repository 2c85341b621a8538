use super::{Behavior, InvalidParameter, ParamResult, any_of};
use crate::query::QueryParams;
use xclass_types::{Value, ValueKind};

/// Yes/no field, stored as integer 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanType {
    /// `yesno`, `truefalse`, `checkbox`, ...
    pub display_type: String,
    pub default_value: Option<bool>,
}

impl Default for BooleanType {
    fn default() -> Self {
        Self {
            display_type: "yesno".to_string(),
            default_value: None,
        }
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Behavior for BooleanType {
    fn value_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn from_string(&self, value: &str) -> Option<Value> {
        parse_flag(value).map(|b| Value::Integer(i32::from(b)))
    }

    fn from_value(&self, value: &Value) -> Option<Value> {
        match value.as_i64() {
            Some(n) => Some(Value::Integer(i32::from(n != 0))),
            None => self.from_string(&value.to_text()),
        }
    }

    fn make_query(&self, field: &str, params: &QueryParams, out: &mut Vec<String>) {
        let Some(values) = params.get("") else {
            return;
        };
        let clauses = values
            .iter()
            .filter_map(|v| parse_flag(v))
            .map(|b| format!("{field} = {}", i32::from(b)))
            .collect();
        if let Some(clause) = any_of(clauses) {
            out.push(clause);
        }
    }

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        out.push(("displayType", self.display_type.clone()));
        out.push((
            "defaultValue",
            self.default_value
                .map(|b| i32::from(b).to_string())
                .unwrap_or_default(),
        ));
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        match tag {
            "displayType" => self.display_type = text.to_string(),
            "defaultValue" => {
                self.default_value = if text.trim().is_empty() {
                    None
                } else {
                    Some(parse_flag(text).ok_or(InvalidParameter)?)
                };
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}
