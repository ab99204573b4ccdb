//! Expense repository
//!
//! The canonical, insertion-ordered list of expense records. Every mutation
//! writes the full list back to the key-value backend as one JSON array.
//! Nothing here fails towards the caller: a corrupt blob loads as an empty
//! list and a failed write is logged and counted.

use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::models::{Expense, ExpenseId, Money, NewExpense};

use super::kv::KeyValueStore;

/// Backend key holding the serialized expense list
pub const EXPENSES_KEY: &str = "expenses";

/// How the last load resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing was stored yet
    Missing,
    /// The stored blob was read successfully
    Loaded { count: usize },
    /// The stored blob was unreadable; fell back to an empty/default collection
    Recovered { reason: String },
}

impl LoadStatus {
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }
}

/// Result of upserting a record by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Inserted,
    Replaced,
}

/// Repository for expense records
pub struct ExpenseRepository {
    backend: Rc<dyn KeyValueStore>,
    expenses: Vec<Expense>,
    revision: u64,
    load_status: LoadStatus,
    persist_failures: usize,
}

impl ExpenseRepository {
    /// Create a repository over `backend` and load whatever it holds
    pub fn open(backend: Rc<dyn KeyValueStore>) -> Self {
        let mut repo = Self {
            backend,
            expenses: Vec::new(),
            revision: 0,
            load_status: LoadStatus::Missing,
            persist_failures: 0,
        };
        repo.load();
        repo
    }

    /// Reload from the backend, falling back to an empty list on any failure
    pub fn load(&mut self) -> &LoadStatus {
        let (expenses, status) = match self.backend.get(EXPENSES_KEY) {
            Ok(None) => (Vec::new(), LoadStatus::Missing),
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Expense>>(&blob) {
                Ok(expenses) => {
                    let count = expenses.len();
                    (expenses, LoadStatus::Loaded { count })
                }
                Err(e) => {
                    error!("Failed to parse stored expenses, starting empty: {}", e);
                    (Vec::new(), LoadStatus::Recovered { reason: e.to_string() })
                }
            },
            Err(e) => {
                error!("Failed to read stored expenses, starting empty: {}", e);
                (Vec::new(), LoadStatus::Recovered { reason: e.to_string() })
            }
        };

        if let LoadStatus::Loaded { count } = status {
            info!(count, "Loaded expenses");
        }

        self.expenses = expenses;
        self.revision += 1;
        self.load_status = status;
        &self.load_status
    }

    /// Record a new expense under a freshly generated id
    pub fn add(&mut self, new_expense: NewExpense) -> ExpenseId {
        let id = ExpenseId::generate();
        debug!(id = %id, amount = %new_expense.amount, "Adding expense");
        self.expenses.push(new_expense.into_expense(id.clone()));
        self.touch();
        id
    }

    /// Remove the expense with `id`; an unknown id is a no-op
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id.as_str() != id);
        let removed = self.expenses.len() != before;
        debug!(id, removed, "Removing expense");
        self.touch();
        removed
    }

    /// Upsert by id: replace the stored record wholesale or append it
    pub fn import(&mut self, expense: Expense) -> ImportOutcome {
        let outcome = match self.expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => {
                *existing = expense;
                ImportOutcome::Replaced
            }
            None => {
                self.expenses.push(expense);
                ImportOutcome::Inserted
            }
        };
        debug!(?outcome, "Imported expense");
        self.touch();
        outcome
    }

    /// Remove every expense
    pub fn clear(&mut self) {
        debug!(count = self.expenses.len(), "Clearing expenses");
        self.expenses.clear();
        self.touch();
    }

    /// Sum of all amounts (zero when empty)
    pub fn total(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Mean amount per expense (zero when empty)
    pub fn average(&self) -> Money {
        self.total().average_over(self.expenses.len())
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id.as_str() == id)
    }

    /// All expenses in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Counter bumped by every load and mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Number of writes that failed since the repository was opened
    pub fn persist_failures(&self) -> usize {
        self.persist_failures
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.persist();
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.expenses)
            .map_err(crate::error::SpendError::from)
            .and_then(|blob| self.backend.set(EXPENSES_KEY, &blob));

        if let Err(e) = result {
            self.persist_failures += 1;
            warn!("Failed to persist expenses: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryStore;
    use tempfile::TempDir;

    fn new_expense(cents: i64, category: &str, date: &str) -> NewExpense {
        NewExpense::new(Money::from_cents(cents), category, date)
    }

    fn record(id: &str, cents: i64) -> Expense {
        new_expense(cents, "bills", "2024-02-01").into_expense(ExpenseId::from(id))
    }

    fn memory_repo() -> (Rc<MemoryStore>, ExpenseRepository) {
        let store = Rc::new(MemoryStore::new());
        let repo = ExpenseRepository::open(store.clone());
        (store, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_store, repo) = memory_repo();
        assert!(repo.is_empty());
        assert_eq!(repo.total(), Money::zero());
        assert_eq!(repo.average(), Money::zero());
        assert_eq!(repo.load_status(), &LoadStatus::Missing);
    }

    #[test]
    fn test_total_is_sum_of_adds() {
        let (_store, mut repo) = memory_repo();
        repo.add(new_expense(1000, "food", "2024-03-10"));
        repo.add(new_expense(2000, "food", "2024-03-11"));
        repo.add(new_expense(-250, "other", "2024-03-12"));

        assert_eq!(repo.len(), 3);
        assert_eq!(repo.total().cents(), 2750);
        assert_eq!(repo.average().cents(), 917);
    }

    #[test]
    fn test_total_ignores_add_order() {
        let amounts = [1999, 1, 45_000, -250, 730, 0, 12];
        let (_store, mut forward) = memory_repo();
        let (_other, mut reversed) = memory_repo();

        for cents in amounts {
            forward.add(new_expense(cents, "food", "2024-03-10"));
        }
        for cents in amounts.iter().rev() {
            reversed.add(new_expense(*cents, "food", "2024-03-10"));
        }

        assert_eq!(forward.total(), reversed.total());
        assert_eq!(forward.total().cents(), amounts.iter().sum::<i64>());
    }

    #[test]
    fn test_out_of_range_amounts_recover_empty() {
        let blob = r#"[
            {"id":"exp-1","amount":1e17,"category":"food","date":"2024-03-10"},
            {"id":"exp-2","amount":1e17,"category":"food","date":"2024-03-11"}
        ]"#;
        let repo = ExpenseRepository::open(Rc::new(MemoryStore::with_blob(EXPENSES_KEY, blob)));

        assert!(repo.load_status().is_recovered());
        assert_eq!(repo.total(), Money::zero());
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_overflowing() {
        use crate::models::Granularity;
        use crate::services::aggregate;

        let blob = r#"[
            {"id":"exp-1","amount":90000000000000000,"category":"food","date":"2024-03-10"},
            {"id":"exp-2","amount":90000000000000000,"category":"food","date":"2024-03-11"}
        ]"#;
        let repo = ExpenseRepository::open(Rc::new(MemoryStore::with_blob(EXPENSES_KEY, blob)));
        assert_eq!(repo.load_status(), &LoadStatus::Loaded { count: 2 });

        let max = Money::from_cents(i64::MAX);
        assert_eq!(repo.total(), max);
        for granularity in Granularity::ALL {
            assert_eq!(aggregate(repo.expenses(), granularity).total(), max);
        }
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let (_store, mut repo) = memory_repo();
        let a = repo.add(new_expense(100, "food", "2024-03-10"));
        let b = repo.add(new_expense(100, "food", "2024-03-10"));
        assert_ne!(a, b);
        assert_eq!(repo.get(a.as_str()).unwrap().amount.cents(), 100);
    }

    #[test]
    fn test_remove_and_missing_remove() {
        let (_store, mut repo) = memory_repo();
        let id = repo.add(new_expense(100, "food", "2024-03-10"));

        assert!(!repo.remove("does-not-exist"));
        assert_eq!(repo.len(), 1);

        assert!(repo.remove(id.as_str()));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_import_replaces_by_id() {
        let (_store, mut repo) = memory_repo();

        assert_eq!(repo.import(record("exp-1", 1200)), ImportOutcome::Inserted);
        let mut updated = record("exp-1", 1800);
        updated.description = "Internet updated".into();
        assert_eq!(repo.import(updated), ImportOutcome::Replaced);

        assert_eq!(repo.len(), 1);
        let stored = repo.get("exp-1").unwrap();
        assert_eq!(stored.amount.cents(), 1800);
        assert_eq!(stored.description, "Internet updated");
    }

    #[test]
    fn test_import_unseen_id_appends() {
        let (_store, mut repo) = memory_repo();
        repo.import(record("exp-1", 100));
        repo.import(record("exp-2", 200));
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.expenses()[1].id, "exp-2");
    }

    #[test]
    fn test_clear() {
        let (_store, mut repo) = memory_repo();
        repo.add(new_expense(500, "other", "2024-01-05"));
        repo.clear();
        assert!(repo.is_empty());
    }

    #[test]
    fn test_every_mutation_persists_full_snapshot() {
        let (store, mut repo) = memory_repo();

        repo.import(record("exp-1", 1200));
        repo.import(record("exp-2", 300));
        let blob = store.get(EXPENSES_KEY).unwrap().unwrap();
        let stored: Vec<Expense> = serde_json::from_str(&blob).unwrap();
        assert_eq!(stored.len(), 2);

        repo.remove("exp-1");
        let blob = store.get(EXPENSES_KEY).unwrap().unwrap();
        let stored: Vec<Expense> = serde_json::from_str(&blob).unwrap();
        assert_eq!(stored, vec![record("exp-2", 300)]);

        repo.clear();
        assert_eq!(store.get(EXPENSES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_reload_preserves_order() {
        let (store, mut repo) = memory_repo();
        for (i, cents) in [300, 100, 200].iter().enumerate() {
            repo.import(record(&format!("exp-{}", i), *cents));
        }

        let reopened = ExpenseRepository::open(store);
        assert_eq!(reopened.expenses(), repo.expenses());
        assert_eq!(reopened.load_status(), &LoadStatus::Loaded { count: 3 });
    }

    #[test]
    fn test_corrupt_blob_recovers_empty() {
        let store = Rc::new(MemoryStore::with_blob(EXPENSES_KEY, "{not json"));
        let repo = ExpenseRepository::open(store);

        assert!(repo.is_empty());
        assert!(repo.load_status().is_recovered());
    }

    #[test]
    fn test_failed_writes_are_counted_not_raised() {
        let (store, mut repo) = memory_repo();
        store.set_fail_writes(true);

        repo.add(new_expense(100, "food", "2024-03-10"));
        repo.clear();

        assert_eq!(repo.persist_failures(), 2);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_revision_increases_on_mutation() {
        let (_store, mut repo) = memory_repo();
        let start = repo.revision();
        repo.add(new_expense(100, "food", "2024-03-10"));
        repo.remove("nope");
        assert_eq!(repo.revision(), start + 2);
    }

    #[test]
    fn test_file_backend_round_trip() {
        use crate::storage::kv::FileStore;

        let temp_dir = TempDir::new().unwrap();
        let backend = Rc::new(FileStore::new(temp_dir.path().to_path_buf()));
        let mut repo = ExpenseRepository::open(backend.clone());
        repo.add(new_expense(1050, "food", "2024-03-10").with_description("Lunch"));

        let reopened = ExpenseRepository::open(backend);
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.expenses()[0].description, "Lunch");
        assert_eq!(reopened.total().cents(), 1050);
    }
}
