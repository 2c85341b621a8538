use super::{Behavior, InvalidParameter, ParamResult, any_of, parse_num};
use crate::query::QueryParams;
use tracing::warn;
use xclass_types::{Value, ValueKind};

/// Storage width of a number property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    #[default]
    Long,
    Float,
    Double,
}

impl NumberKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Some(Self::Integer),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            _ => None,
        }
    }

    const fn value_kind(self) -> ValueKind {
        match self {
            Self::Integer => ValueKind::Integer,
            Self::Long => ValueKind::Long,
            Self::Float => ValueKind::Float,
            Self::Double => ValueKind::Double,
        }
    }
}

/// Numeric field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberType {
    pub size: u32,
    pub number_type: NumberKind,
}

impl Default for NumberType {
    fn default() -> Self {
        Self {
            size: 30,
            number_type: NumberKind::Long,
        }
    }
}

impl NumberType {
    #[must_use]
    pub fn new(size: u32, number_type: NumberKind) -> Self {
        Self { size, number_type }
    }
}

impl Behavior for NumberType {
    fn value_kind(&self) -> ValueKind {
        self.number_type.value_kind()
    }

    fn from_string(&self, value: &str) -> Option<Value> {
        if value.trim().is_empty() {
            return None;
        }
        match Value::parse_as(self.value_kind(), value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(input = %value, number_type = self.number_type.as_str(), error = %e, "Failed to coerce number");
                None
            }
        }
    }

    fn from_value(&self, value: &Value) -> Option<Value> {
        match (self.number_type, value.as_i64(), value.as_f64()) {
            (NumberKind::Integer, Some(n), _) => i32::try_from(n).ok().map(Value::Integer),
            (NumberKind::Long, Some(n), _) => Some(Value::Long(n)),
            (NumberKind::Float, _, Some(f)) => Some(Value::Float(f as f32)),
            (NumberKind::Double, _, Some(f)) => Some(Value::Double(f)),
            _ => self.from_string(&value.to_text()),
        }
    }

    fn make_query(&self, field: &str, params: &QueryParams, out: &mut Vec<String>) {
        for (suffix, values) in params {
            let op = match suffix.as_str() {
                "" => "=",
                "lessthan" => "<",
                "morethan" => ">",
                _ => continue,
            };
            // Only coercible values are emitted.
            let clauses = values
                .iter()
                .filter_map(|v| self.from_string(v))
                .map(|v| format!("{field} {op} {}", v.to_text()))
                .collect();
            if let Some(clause) = any_of(clauses) {
                out.push(clause);
            }
        }
    }

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        out.push(("size", self.size.to_string()));
        out.push(("numberType", self.number_type.as_str().to_string()));
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        match tag {
            "size" => self.size = parse_num(text)?,
            "numberType" => self.number_type = NumberKind::parse(text).ok_or(InvalidParameter)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
