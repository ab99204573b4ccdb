//! Category repository
//!
//! Holds the category registry, seeded with the default palette. Persisted
//! under the `categories` key with the same whole-document semantics as the
//! expense list. An absent or unreadable blob falls back to the defaults.

use std::rc::Rc;

use tracing::{debug, error, warn};

use crate::error::{SpendError, SpendResult};
use crate::models::{Category, CategoryId, CategoryLookup};

use super::expenses::{ImportOutcome, LoadStatus};
use super::kv::KeyValueStore;

/// Backend key holding the serialized category list
pub const CATEGORIES_KEY: &str = "categories";

/// Repository for categories
pub struct CategoryRepository {
    backend: Rc<dyn KeyValueStore>,
    categories: Vec<Category>,
    load_status: LoadStatus,
    persist_failures: usize,
}

impl CategoryRepository {
    /// Create a repository over `backend` and load whatever it holds
    pub fn open(backend: Rc<dyn KeyValueStore>) -> Self {
        let mut repo = Self {
            backend,
            categories: Category::defaults(),
            load_status: LoadStatus::Missing,
            persist_failures: 0,
        };
        repo.load();
        repo
    }

    /// Reload from the backend; defaults when absent or unreadable
    pub fn load(&mut self) -> &LoadStatus {
        let (categories, status) = match self.backend.get(CATEGORIES_KEY) {
            Ok(None) => (Category::defaults(), LoadStatus::Missing),
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Category>>(&blob) {
                Ok(categories) => {
                    let count = categories.len();
                    (categories, LoadStatus::Loaded { count })
                }
                Err(e) => {
                    error!("Failed to parse stored categories, using defaults: {}", e);
                    (Category::defaults(), LoadStatus::Recovered { reason: e.to_string() })
                }
            },
            Err(e) => {
                error!("Failed to read stored categories, using defaults: {}", e);
                (Category::defaults(), LoadStatus::Recovered { reason: e.to_string() })
            }
        };

        self.categories = categories;
        self.load_status = status;
        &self.load_status
    }

    /// Create a category with a fresh id
    pub fn add(&mut self, name: &str, color: &str) -> SpendResult<Category> {
        let category = Category::new(CategoryId::generate(), name.trim(), color.trim());
        category
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;

        debug!(id = %category.id, name = %category.name, "Adding category");
        self.categories.push(category.clone());
        self.persist();
        Ok(category)
    }

    /// Remove a category; an unknown id is a no-op
    ///
    /// Expenses referencing the id are left alone and will render with the
    /// fallback label.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id.as_str() != id);
        let removed = self.categories.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Change the name and/or color of an existing category
    pub fn update(
        &mut self,
        id: &str,
        name: Option<&str>,
        color: Option<&str>,
    ) -> SpendResult<Category> {
        let existing = self
            .categories
            .iter()
            .position(|c| c.id.as_str() == id)
            .ok_or_else(|| SpendError::category_not_found(id))?;

        let mut updated = self.categories[existing].clone();
        if let Some(name) = name {
            updated.name = name.trim().to_string();
        }
        if let Some(color) = color {
            updated.color = color.trim().to_string();
        }
        updated
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;

        self.categories[existing] = updated.clone();
        self.persist();
        Ok(updated)
    }

    /// Upsert by id
    pub fn import(&mut self, category: Category) -> ImportOutcome {
        let outcome = match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => {
                *existing = category;
                ImportOutcome::Replaced
            }
            None => {
                self.categories.push(category);
                ImportOutcome::Inserted
            }
        };
        self.persist();
        outcome
    }

    /// Reset to the default palette
    pub fn clear(&mut self) {
        self.categories = Category::defaults();
        self.persist();
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id.as_str() == id)
    }

    /// Find by id, or by case-insensitive name
    pub fn find(&self, identifier: &str) -> Option<&Category> {
        self.get(identifier).or_else(|| {
            self.categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(identifier.trim()))
        })
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn persist_failures(&self) -> usize {
        self.persist_failures
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.categories)
            .map_err(SpendError::from)
            .and_then(|blob| self.backend.set(CATEGORIES_KEY, &blob));

        if let Err(e) = result {
            self.persist_failures += 1;
            warn!("Failed to persist categories: {}", e);
        }
    }
}

impl CategoryLookup for CategoryRepository {
    fn lookup(&self, id: &CategoryId) -> Option<&Category> {
        self.get(id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryStore;

    fn memory_repo() -> (Rc<MemoryStore>, CategoryRepository) {
        let store = Rc::new(MemoryStore::new());
        let repo = CategoryRepository::open(store.clone());
        (store, repo)
    }

    #[test]
    fn test_defaults_when_nothing_stored() {
        let (_store, repo) = memory_repo();
        assert_eq!(repo.all().len(), 8);
        assert_eq!(repo.get("food").unwrap().name, "Food & Dining");
        assert_eq!(repo.load_status(), &LoadStatus::Missing);
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_defaults() {
        let store = Rc::new(MemoryStore::with_blob(CATEGORIES_KEY, "oops"));
        let repo = CategoryRepository::open(store);
        assert_eq!(repo.all(), Category::defaults().as_slice());
        assert!(repo.load_status().is_recovered());
    }

    #[test]
    fn test_add_and_persist() {
        let (store, mut repo) = memory_repo();
        let pets = repo.add("Pets", "#123abc").unwrap();
        assert!(pets.id.as_str().starts_with("cat-"));

        let reopened = CategoryRepository::open(store);
        assert_eq!(reopened.get(pets.id.as_str()).unwrap().name, "Pets");
        assert_eq!(reopened.all().len(), 9);
    }

    #[test]
    fn test_add_rejects_invalid() {
        let (_store, mut repo) = memory_repo();
        assert!(repo.add("", "#123abc").unwrap_err().is_validation());
        assert!(repo.add("Pets", "blue").unwrap_err().is_validation());
        assert_eq!(repo.all().len(), 8);
    }

    #[test]
    fn test_update() {
        let (_store, mut repo) = memory_repo();
        let updated = repo.update("food", Some("Groceries"), None).unwrap();
        assert_eq!(updated.name, "Groceries");
        assert_eq!(updated.color, "#e07a5f");

        assert!(repo.update("missing", Some("X"), None).unwrap_err().is_not_found());
    }

    #[test]
    fn test_import_and_clear() {
        let (_store, mut repo) = memory_repo();
        let outcome = repo.import(Category::new("food", "Eating", "#000000"));
        assert_eq!(outcome, ImportOutcome::Replaced);
        assert_eq!(repo.get("food").unwrap().name, "Eating");

        repo.remove("food");
        assert!(repo.get("food").is_none());

        repo.clear();
        assert_eq!(repo.get("food").unwrap().name, "Food & Dining");
    }

    #[test]
    fn test_find_by_name() {
        let (_store, repo) = memory_repo();
        assert_eq!(repo.find("transportation").unwrap().id, "transport");
        assert_eq!(repo.find("bills").unwrap().id, "bills");
        assert!(repo.find("nothing").is_none());
    }
}
