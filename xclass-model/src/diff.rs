//! Structural differences between two snapshots of a class or object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of change to one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAction {
    Added,
    Changed,
    Removed,
}

impl DiffAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Changed => "changed",
            Self::Removed => "removed",
        }
    }
}

impl fmt::Display for DiffAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One changed property between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDiff {
    pub class_name: String,
    pub number: u32,
    pub action: DiffAction,
    pub property_name: String,
    /// Textual old value; empty for class diffs and additions.
    pub old_value: String,
    /// Textual new value; empty for class diffs and removals.
    pub new_value: String,
}

/// Compares two name-keyed sequences: additions and changes in `new` order,
/// then removals in `old` order. `render` produces the recorded values.
pub(crate) fn diff_named<'a, T, R>(
    class_name: &str,
    number: u32,
    new: &[(&'a str, &'a T)],
    old: &[(&'a str, &'a T)],
    render: R,
) -> Vec<ObjectDiff>
where
    T: PartialEq + ?Sized + 'a,
    R: Fn(&T) -> String,
{
    let find = |items: &[(&'a str, &'a T)], name: &str| {
        items.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    };
    let entry = |action, name: &str, old_value, new_value| ObjectDiff {
        class_name: class_name.to_string(),
        number,
        action,
        property_name: name.to_string(),
        old_value,
        new_value,
    };

    let mut out = Vec::new();
    for (name, new_value) in new {
        match find(old, name) {
            None => out.push(entry(DiffAction::Added, name, String::new(), render(new_value))),
            Some(old_value) if old_value != *new_value => out.push(entry(
                DiffAction::Changed,
                name,
                render(old_value),
                render(new_value),
            )),
            Some(_) => {}
        }
    }
    for (name, old_value) in old {
        if find(new, name).is_none() {
            out.push(entry(DiffAction::Removed, name, render(old_value), String::new()));
        }
    }
    out
}
