//! Date patterns as persisted on date properties.
//!
//! Date properties store their display/input pattern in the
//! `SimpleDateFormat` letter syntax (`dd/MM/yyyy HH:mm:ss`). The pattern is
//! translated once into a chrono format string which is then used for both
//! parsing user input and formatting stored dates.

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Pattern used by date properties that do not declare one.
pub const DEFAULT_DATE_PATTERN: &str = "dd/MM/yyyy HH:mm:ss";

/// A translated date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    pattern: String,
    format: String,
    has_time: bool,
}

impl DatePattern {
    /// Translates a `SimpleDateFormat`-style pattern.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut format = String::with_capacity(pattern.len() * 2);
        let mut has_time = false;
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                // Quoted literal; '' is an escaped quote.
                if chars.get(i + 1) == Some(&'\'') {
                    format.push('\'');
                    i += 2;
                    continue;
                }
                i += 1;
                while i < chars.len() {
                    if chars[i] == '\'' {
                        if chars.get(i + 1) == Some(&'\'') {
                            format.push('\'');
                            i += 2;
                            continue;
                        }
                        break;
                    }
                    push_literal(&mut format, chars[i]);
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(invalid(pattern, "unterminated quote"));
                }
                i += 1;
                continue;
            }

            if !c.is_ascii_alphabetic() {
                push_literal(&mut format, c);
                i += 1;
                continue;
            }

            let mut run = 1;
            while chars.get(i + run) == Some(&c) {
                run += 1;
            }
            let item = match (c, run) {
                ('y', 2) => "%y",
                ('y', _) => "%Y",
                ('M', 1) => "%-m",
                ('M', 2) => "%m",
                ('M', 3) => "%b",
                ('M', _) => "%B",
                ('d', 1) => "%-d",
                ('d', _) => "%d",
                ('D', _) => "%j",
                ('E', 1..=3) => "%a",
                ('E', _) => "%A",
                ('a', _) => "%p",
                ('H', 1) => "%-H",
                ('H', _) => "%H",
                ('h', 1) => "%-I",
                ('h', _) => "%I",
                ('m', 1) => "%-M",
                ('m', _) => "%M",
                ('s', 1) => "%-S",
                ('s', _) => "%S",
                ('S', 1..=3) => "%3f",
                ('z', _) => "%Z",
                ('Z', _) => "%z",
                _ => {
                    return Err(invalid(
                        pattern,
                        &format!("unsupported pattern letter '{c}'"),
                    ));
                }
            };
            if matches!(c, 'H' | 'h' | 'm' | 's' | 'S' | 'a') {
                has_time = true;
            }
            format.push_str(item);
            i += run;
        }

        Ok(Self {
            pattern: pattern.to_string(),
            format,
            has_time,
        })
    }

    /// Returns the original `SimpleDateFormat`-style pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the translated chrono format string.
    #[must_use]
    pub fn chrono_format(&self) -> &str {
        &self.format
    }

    /// Formats a date with this pattern.
    #[must_use]
    pub fn format(&self, date: &NaiveDateTime) -> String {
        date.format(&self.format).to_string()
    }

    /// Parses user input with this pattern. Date-only patterns yield
    /// midnight of the parsed day.
    pub fn parse_datetime(&self, input: &str) -> Result<NaiveDateTime> {
        let input = input.trim();
        if self.has_time {
            return NaiveDateTime::parse_from_str(input, &self.format)
                .map_err(|_| Error::InvalidDate(input.to_string()));
        }
        NaiveDate::parse_from_str(input, &self.format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| Error::InvalidDate(input.to_string()))
    }
}

impl Default for DatePattern {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_PATTERN.to_string(),
            format: "%d/%m/%Y %H:%M:%S".to_string(),
            has_time: true,
        }
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn push_literal(format: &mut String, c: char) {
    if c == '%' {
        format.push_str("%%");
    } else {
        format.push(c);
    }
}

fn invalid(pattern: &str, reason: &str) -> Error {
    Error::InvalidDatePattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_parsed_default_pattern() {
        assert_eq!(
            DatePattern::parse(DEFAULT_DATE_PATTERN).unwrap(),
            DatePattern::default()
        );
    }

    #[test]
    fn percent_is_escaped() {
        let p = DatePattern::parse("dd%MM").unwrap();
        assert_eq!(p.chrono_format(), "%d%%%m");
    }
}
