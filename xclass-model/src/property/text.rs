//! Text-backed property types: single-line strings, passwords and text areas.

use super::{
    Behavior, InvalidParameter, ParamResult, any_of, bool_text, like_literal, parse_bool,
    parse_num, sql_literal,
};
use crate::config::PasswordStorage;
use crate::query::QueryParams;
use sha2::{Digest, Sha256, Sha512};
use tracing::warn;
use xclass_types::{Value, ValueKind};

const HASH_PREFIX: &str = "hash:";
const SALT_LEN: usize = 16;

/// `=` / `like` clauses shared by every free-text field.
fn text_query(field: &str, params: &QueryParams, out: &mut Vec<String>) {
    for (suffix, values) in params {
        let clauses = values
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| match suffix.as_str() {
                "" => Some(format!("{field} = {}", sql_literal(v))),
                "like" => Some(format!("{field} like {}", like_literal(v))),
                _ => None,
            })
            .collect::<Option<Vec<_>>>();
        if let Some(clause) = clauses.and_then(any_of) {
            out.push(clause);
        }
    }
}

/// Single-line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringType {
    pub size: u32,
    pub picker: bool,
}

impl Default for StringType {
    fn default() -> Self {
        Self {
            size: 30,
            picker: false,
        }
    }
}

impl Behavior for StringType {
    fn value_kind(&self) -> ValueKind {
        ValueKind::String
    }

    fn from_string(&self, value: &str) -> Option<Value> {
        Some(Value::String(value.to_string()))
    }

    fn make_query(&self, field: &str, params: &QueryParams, out: &mut Vec<String>) {
        text_query(field, params, out);
    }

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        out.push(("size", self.size.to_string()));
        out.push(("picker", bool_text(self.picker)));
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        match tag {
            "size" => self.size = parse_num(text)?,
            "picker" => self.picker = parse_bool(text)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Password field. With [`PasswordStorage::Hash`] submitted values are
/// stored as `hash:<algorithm>:<salt>:<digest>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordType {
    pub size: u32,
    pub storage: PasswordStorage,
    pub hash_algorithm: String,
}

impl Default for PasswordType {
    fn default() -> Self {
        Self::new(PasswordStorage::Hash)
    }
}

impl PasswordType {
    #[must_use]
    pub fn new(storage: PasswordStorage) -> Self {
        Self {
            size: 30,
            storage,
            hash_algorithm: "SHA-512".to_string(),
        }
    }

    /// Checks a clear-text candidate against a stored value.
    #[must_use]
    pub fn matches(stored: &str, candidate: &str) -> bool {
        let Some(rest) = stored.strip_prefix(HASH_PREFIX) else {
            return stored == candidate;
        };
        let mut parts = rest.splitn(3, ':');
        let (Some(algorithm), Some(salt), Some(digest)) = (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        digest_hex(algorithm, salt, candidate).is_some_and(|d| d == digest)
    }

    fn hash(&self, password: &str) -> String {
        let salt = hex::encode(rand::random::<[u8; SALT_LEN]>());
        let (algorithm, digest) = match digest_hex(&self.hash_algorithm, &salt, password) {
            Some(d) => (self.hash_algorithm.as_str(), d),
            None => {
                warn!(
                    algorithm = %self.hash_algorithm,
                    "Unsupported hash algorithm, using SHA-512"
                );
                let d = digest_hex("SHA-512", &salt, password).unwrap_or_default();
                ("SHA-512", d)
            }
        };
        format!("{HASH_PREFIX}{algorithm}:{salt}:{digest}")
    }
}

fn digest_hex(algorithm: &str, salt: &str, password: &str) -> Option<String> {
    match algorithm.to_ascii_uppercase().as_str() {
        "SHA-512" | "SHA512" => {
            let mut h = Sha512::new();
            h.update(salt.as_bytes());
            h.update(password.as_bytes());
            Some(hex::encode(h.finalize()))
        }
        "SHA-256" | "SHA256" => {
            let mut h = Sha256::new();
            h.update(salt.as_bytes());
            h.update(password.as_bytes());
            Some(hex::encode(h.finalize()))
        }
        _ => None,
    }
}

impl Behavior for PasswordType {
    fn value_kind(&self) -> ValueKind {
        ValueKind::String
    }

    fn from_string(&self, value: &str) -> Option<Value> {
        if self.storage == PasswordStorage::Clear || value.starts_with(HASH_PREFIX) {
            return Some(Value::String(value.to_string()));
        }
        Some(Value::String(self.hash(value)))
    }

    fn make_query(&self, _field: &str, _params: &QueryParams, _out: &mut Vec<String>) {}

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        out.push(("size", self.size.to_string()));
        out.push(("storageType", self.storage.as_str().to_string()));
        out.push(("hashAlgorithm", self.hash_algorithm.clone()));
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        match tag {
            "size" => self.size = parse_num(text)?,
            "storageType" => self.storage = PasswordStorage::parse(text).ok_or(InvalidParameter)?,
            "hashAlgorithm" => self.hash_algorithm = text.to_string(),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Multi-line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaType {
    /// Width in columns.
    pub size: u32,
    pub rows: u32,
    /// Preferred editor (`Text`, `Wysiwyg`, ...); empty for the default.
    pub editor: String,
}

impl Default for TextAreaType {
    fn default() -> Self {
        Self {
            size: 40,
            rows: 5,
            editor: String::new(),
        }
    }
}

impl Behavior for TextAreaType {
    fn value_kind(&self) -> ValueKind {
        ValueKind::LargeString
    }

    fn from_string(&self, value: &str) -> Option<Value> {
        Some(Value::LargeString(value.to_string()))
    }

    fn make_query(&self, field: &str, params: &QueryParams, out: &mut Vec<String>) {
        text_query(field, params, out);
    }

    fn parameters(&self, out: &mut Vec<(&'static str, String)>) {
        out.push(("size", self.size.to_string()));
        out.push(("rows", self.rows.to_string()));
        out.push(("editor", self.editor.clone()));
    }

    fn set_parameter(&mut self, tag: &str, text: &str) -> ParamResult {
        match tag {
            "size" | "cols" => self.size = parse_num(text)?,
            "rows" => self.rows = parse_num(text)?,
            "editor" => self.editor = text.to_string(),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_matches_its_source() {
        let p = PasswordType::default();
        let Some(Value::String(stored)) = p.from_string("s3cret") else {
            panic!("expected a string value");
        };
        assert!(stored.starts_with("hash:SHA-512:"));
        assert!(PasswordType::matches(&stored, "s3cret"));
        assert!(!PasswordType::matches(&stored, "other"));
    }

    #[test]
    fn already_hashed_input_is_kept() {
        let p = PasswordType::default();
        let v = p.from_string("hash:SHA-512:00:ff").unwrap();
        assert_eq!(v, Value::String("hash:SHA-512:00:ff".into()));
    }

    #[test]
    fn clear_storage_keeps_text() {
        let p = PasswordType::new(PasswordStorage::Clear);
        assert_eq!(p.from_string("pw").unwrap(), Value::String("pw".into()));
        assert!(PasswordType::matches("pw", "pw"));
    }
}
