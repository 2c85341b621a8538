//! Identity of one object among the objects attached to a document.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Points at one object: the class it conforms to and its ordinal among the
/// objects of that class on the same owner. Renders as `Blog.PostClass[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectReference {
    pub class_name: String,
    pub number: u32,
}

impl ObjectReference {
    /// Creates a reference to object `number` of `class_name`.
    #[must_use]
    pub fn new(class_name: impl Into<String>, number: u32) -> Self {
        Self {
            class_name: class_name.into(),
            number,
        }
    }

    /// Parses a reference from its `Class.Name[number]` form.
    ///
    /// A bare class name refers to object 0.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let Some(open) = s.rfind('[') else {
            if s.is_empty() {
                return Err(Error::InvalidReference("empty class name".into()));
            }
            return Ok(Self::new(s, 0));
        };
        let class_name = &s[..open];
        let number = s[open + 1..]
            .strip_suffix(']')
            .ok_or_else(|| Error::InvalidReference(format!("missing ']' in '{s}'")))?;
        if class_name.is_empty() {
            return Err(Error::InvalidReference(format!("empty class name in '{s}'")));
        }
        let number = number
            .parse()
            .map_err(|_| Error::InvalidReference(format!("bad object number in '{s}'")))?;
        Ok(Self::new(class_name, number))
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.class_name, self.number)
    }
}

impl FromStr for ObjectReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
