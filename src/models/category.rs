//! Category model
//!
//! Categories are simple `{id, name, color}` records. Analytics only ever
//! reads them through [`CategoryLookup`], substituting a fallback label and
//! color for ids it cannot resolve.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Label shown for a category id with no registry entry
pub const UNKNOWN_CATEGORY_LABEL: &str = "unknown";

/// Neutral gray used for a category id with no registry entry
pub const FALLBACK_COLOR: &str = "#7a8b8f";

const MAX_NAME_LEN: usize = 50;

/// An expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Display color as a `#rrggbb` hex string
    pub color: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Check a user-supplied name and color before it enters the registry
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name_len = self.name.trim().chars().count();
        match name_len {
            0 => Err(CategoryValidationError::EmptyName),
            n if n > MAX_NAME_LEN => Err(CategoryValidationError::NameTooLong(n)),
            _ if !is_hex_color(&self.color) => {
                Err(CategoryValidationError::InvalidColor(self.color.clone()))
            }
            _ => Ok(()),
        }
    }

    /// The built-in category palette
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(id, name, color)| Category::new(*id, *name, *color))
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name)
    }
}

const DEFAULT_CATEGORIES: [(&str, &str, &str); 8] = [
    ("food", "Food & Dining", "#e07a5f"),
    ("transport", "Transportation", "#3a7ca5"),
    ("shopping", "Shopping", "#7fb9b1"),
    ("bills", "Bills & Utilities", "#e3b26f"),
    ("entertainment", "Entertainment", "#c57b8a"),
    ("health", "Health & Fitness", "#5aa380"),
    ("education", "Education", "#2f7f7b"),
    ("other", "Other", "#7a8b8f"),
];

fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#')
        .map(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// Read-only category resolution used by chart projection
pub trait CategoryLookup {
    fn lookup(&self, id: &CategoryId) -> Option<&Category>;

    /// Display name, or the fallback label when the id is unknown
    fn name_or_fallback(&self, id: &CategoryId) -> String {
        self.lookup(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_CATEGORY_LABEL.to_string())
    }

    /// Display color, or the neutral gray when the id is unknown
    fn color_or_fallback(&self, id: &CategoryId) -> String {
        self.lookup(id)
            .map(|c| c.color.clone())
            .unwrap_or_else(|| FALLBACK_COLOR.to_string())
    }
}

impl CategoryLookup for [Category] {
    fn lookup(&self, id: &CategoryId) -> Option<&Category> {
        self.iter().find(|c| &c.id == id)
    }
}

impl CategoryLookup for Vec<Category> {
    fn lookup(&self, id: &CategoryId) -> Option<&Category> {
        self.as_slice().lookup(id)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => f.write_str("a category needs a name"),
            Self::NameTooLong(len) => write!(
                f,
                "category names are limited to {} characters (got {})",
                MAX_NAME_LEN, len
            ),
            Self::InvalidColor(color) => {
                write!(f, "'{}' is not a #rrggbb color", color)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
