//! Validation errors and text normalization shared by catalog records.
//!
//! # Invariants
//! - Normalized names never carry leading/trailing or repeated whitespace.
//! - Normalization is idempotent.

use super::EntityId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Rejected catalog input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty after normalization.
    EmptyName,
    /// One list entry (ingredient/instruction) is blank.
    BlankEntry { field: &'static str, index: usize },
    /// Another record in the same collection already uses this name.
    DuplicateName {
        collection: &'static str,
        name: String,
    },
    /// Recipe references a category that does not exist.
    UnknownCategory(EntityId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::BlankEntry { field, index } => {
                write!(f, "{field} entry #{} cannot be blank", index + 1)
            }
            Self::DuplicateName { collection, name } => {
                write!(f, "{collection} already contains a record named `{name}`")
            }
            Self::UnknownCategory(id) => write!(f, "unknown category id: {id}"),
        }
    }
}

impl Error for ValidationError {}

/// Trims a display name and collapses internal whitespace runs.
pub fn normalize_name(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}

/// Trims every entry and rejects blank ones.
pub(crate) fn normalize_entries(
    field: &'static str,
    entries: &[String],
) -> Result<Vec<String>, ValidationError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                Err(ValidationError::BlankEntry { field, index })
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_entries, normalize_name, ValidationError};

    #[test]
    fn normalize_name_collapses_whitespace() {
        assert_eq!(normalize_name("  Apple \t  Pie\n"), "Apple Pie");
        assert_eq!(normalize_name(&normalize_name(" a  b ")), "a b");
    }

    #[test]
    fn normalize_entries_reports_first_blank_index() {
        let entries = vec!["flour".to_string(), "  ".to_string(), String::new()];
        let err = normalize_entries("ingredients", &entries).unwrap_err();
        assert_eq!(
            err,
            ValidationError::BlankEntry {
                field: "ingredients",
                index: 1
            }
        );
        assert_eq!(err.to_string(), "ingredients entry #2 cannot be blank");
    }
}
