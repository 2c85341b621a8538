use super::{Behavior, ParamResult, any_of, bool_text, parse_bool, parse_num, sql_literal};
use crate::query::QueryParams;
use chrono::{Local, NaiveDateTime, Timelike};
use tracing::warn;
use xclass_types::{CANONICAL_DATE_FORMAT, DEFAULT_DATE_PATTERN, DatePattern, Value, ValueKind};

/// Date/time field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateType {
    pub size: u32,
    /// 1 when a blank submission means "now".
    pub empty_is_today: u32,
    /// `SimpleDateFormat`-style pattern used for input and display.
    pub date_format: String,
    pub picker: bool,
}

impl Default for DateType {
    fn default() -> Self {
        Self::with_format(DEFAULT_DATE_PATTERN)
    }
}

impl DateType {
    #[must_use]
    pub fn with_format(date_format: impl Into<String>) -> Self {
        Self {
            size: 20,
            empty_is_today: 1,
            date_format: date_format.into(),
            picker: true,
        }
    }

    /// Parses user input with the property's pattern, falling back to the
    /// canonical form.
    fn parse_date(&self, input: &str) -> Option<NaiveDateTime> {
        let input = input.trim();
        let from_pattern = DatePattern::parse(&self.date_format)
            .and_then(|p| p.parse_datetime(input));
        match from_pattern {
            Ok(d) => Some(d),
            Err(e) => match NaiveDateTime::parse_from_str(input, CANONICAL_DATE_FORMAT) {
                Ok(d) => Some(d),
                Err(_) => {
                    warn!(input = %input, date_format = %self.date_format, error = %e, "Failed to coerce date");
                    None
                }
            },
        }
    }
}

impl Behavior for DateType {
    fn value_kind(&self) -> ValueKind {
        ValueKind::Date
    }

    fn from_string(&self, value: &str) -> Option<Value> {
        if value.trim().is_empty() {
            if self.empty_is_today != 1 {
                return None;
            }
            // Dates are stored at second resolution.
            return Local::now().naive_local().with_nanosecond(0).map(Value::Date);
        }
        self.parse_date(value).map(Value::Date)
    }

    fn from_value(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Date(d) => d.with_nanosecond(0).map(Value::Date),
            other => self.from_string(&other.to_text()),
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
            let clauses = values
                .iter()
                .filter(|v| !v.trim().is_empty())
                .filter_map(|v| self.parse_date(v))
                .map(|d| {
                    let literal = d.format(CANONICAL_DATE_FORMAT).to_string();
                    format!("{field} {op} {}", sql_literal(&literal))
                })
                .collect();
            if let Some(clause) = any_of(clauses) {
                out.push(clause);
            }
        }
    }

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        out.push(("size", self.size.to_string()));
        out.push(("emptyIsToday", self.empty_is_today.to_string()));
        out.push(("dateFormat", self.date_format.clone()));
        out.push(("picker", bool_text(self.picker)));
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        match tag {
            "size" => self.size = parse_num(text)?,
            "emptyIsToday" => self.empty_is_today = parse_num(text)?,
            "dateFormat" => self.date_format = text.to_string(),
            "picker" => self.picker = parse_bool(text)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
