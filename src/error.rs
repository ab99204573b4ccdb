//! Error types for spendlog
//!
//! Errors only exist at the outer surfaces of the crate: backend I/O,
//! settings, backups and argument validation. The analytics core degrades
//! to empty results instead of failing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpendError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem failure outside the key-value backend
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{kind} not found: {identifier}")]
    NotFound {
        kind: &'static str,
        identifier: String,
    },

    /// Key-value backend failure (read, write or remove)
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl SpendError {
    /// Wrap an I/O error with what was being attempted
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Expense",
            identifier: identifier.into(),
        }
    }

    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Category",
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for SpendError {
    fn from(source: std::io::Error) -> Self {
        Self::io("I/O error", source)
    }
}

/// A malformed YAML backup is an import problem, not a config one
impl From<serde_yaml::Error> for SpendError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Import(err.to_string())
    }
}

pub type SpendResult<T> = Result<T, SpendError>;
