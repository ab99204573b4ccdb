//! Storage layer for spendlog
//!
//! Repositories sit on top of a pluggable key-value backend: the filesystem
//! for the CLI, an in-memory map for tests and embedding. Each `Storage`
//! owns its own repositories; nothing is shared between instances.

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod kv;

pub use categories::{CategoryRepository, CATEGORIES_KEY};
pub use expenses::{ExpenseRepository, ImportOutcome, LoadStatus, EXPENSES_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

use std::rc::Rc;

use crate::config::paths::SpendPaths;
use crate::error::SpendError;

/// Storage coordinator owning every repository
pub struct Storage {
    pub expenses: ExpenseRepository,
    pub categories: CategoryRepository,
}

impl Storage {
    /// Open the repositories over a backend, loading their current contents
    pub fn with_backend(backend: Rc<dyn KeyValueStore>) -> Self {
        Self {
            expenses: ExpenseRepository::open(backend.clone()),
            categories: CategoryRepository::open(backend),
        }
    }

    /// Fresh, independent in-memory storage
    pub fn in_memory() -> Self {
        Self::with_backend(Rc::new(MemoryStore::new()))
    }

    /// Open file-backed storage under the configured data directory
    pub fn open(paths: &SpendPaths) -> Result<Self, SpendError> {
        paths.ensure_directories()?;
        Ok(Self::with_backend(Rc::new(FileStore::new(paths.data_dir()))))
    }
}
