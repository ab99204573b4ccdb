//! JSON backup export and import
//!
//! A backup holds every category and every expense. Restoring one upserts
//! each record by id, so importing the same backup twice changes nothing.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SpendError, SpendResult};
use crate::models::{Category, Expense, Money};
use crate::storage::{ImportOutcome, Storage};

/// Full backup structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub metadata: ExportMetadata,
}

/// Summary figures, informational only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub category_count: usize,
    pub total: Money,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

/// What restoring a backup did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub expenses_inserted: usize,
    pub expenses_replaced: usize,
    pub categories_inserted: usize,
    pub categories_replaced: usize,
}

impl ImportSummary {
    fn record_expense(&mut self, outcome: ImportOutcome) {
        match outcome {
            ImportOutcome::Inserted => self.expenses_inserted += 1,
            ImportOutcome::Replaced => self.expenses_replaced += 1,
        }
    }

    fn record_category(&mut self, outcome: ImportOutcome) {
        match outcome {
            ImportOutcome::Inserted => self.categories_inserted += 1,
            ImportOutcome::Replaced => self.categories_replaced += 1,
        }
    }
}

impl FullExport {
    /// Snapshot the current storage contents
    pub fn from_storage(storage: &Storage) -> Self {
        let expenses = storage.expenses.expenses().to_vec();
        let categories = storage.categories.all().to_vec();

        // Dates are zero-padded, so string order is chronological
        let earliest_expense = expenses.iter().map(|e| &e.date).min().cloned();
        let latest_expense = expenses.iter().map(|e| &e.date).max().cloned();

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            category_count: categories.len(),
            total: storage.expenses.total(),
            earliest_expense,
            latest_expense,
        };

        Self {
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories,
            expenses,
            metadata,
        }
    }

    /// Reject backups that could not have come from a healthy store
    pub fn validate(&self) -> Result<(), String> {
        let mut expense_ids = HashSet::new();
        for expense in &self.expenses {
            if expense.id.as_str().is_empty() {
                return Err("Expense with an empty id".to_string());
            }
            if !expense_ids.insert(expense.id.as_str()) {
                return Err(format!("Duplicate expense id {}", expense.id));
            }
        }

        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(format!("Duplicate category id {}", category.id));
            }
            category
                .validate()
                .map_err(|e| format!("Category {}: {}", category.id, e))?;
        }

        Ok(())
    }

    /// Upsert every category, then every expense, into `storage`
    pub fn apply_to(self, storage: &mut Storage) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for category in self.categories {
            summary.record_category(storage.categories.import(category));
        }
        for expense in self.expenses {
            summary.record_expense(storage.expenses.import(expense));
        }

        info!(
            expenses_inserted = summary.expenses_inserted,
            expenses_replaced = summary.expenses_replaced,
            categories_inserted = summary.categories_inserted,
            categories_replaced = summary.categories_replaced,
            "Backup restored"
        );
        summary
    }
}

/// Export the full store to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W, pretty: bool) -> SpendResult<()> {
    let export = FullExport::from_storage(storage);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| SpendError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON backup
pub fn import_from_json(json_str: &str) -> SpendResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| SpendError::Import(e.to_string()))?;

    export.validate().map_err(SpendError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, NewExpense};

    fn populated_storage() -> Storage {
        let mut storage = Storage::in_memory();
        storage.expenses.add(
            NewExpense::new(Money::from_cents(1250), "food", "2024-03-10").with_description("Lunch"),
        );
        storage
            .expenses
            .add(NewExpense::new(Money::from_cents(4000), "bills", "2024-01-02"));
        storage.categories.add("Pets", "#aabbcc").unwrap();
        storage
    }

    #[test]
    fn test_full_export() {
        let storage = populated_storage();
        let export = FullExport::from_storage(&storage);

        assert_eq!(export.metadata.expense_count, 2);
        assert_eq!(export.metadata.category_count, 9);
        assert_eq!(export.metadata.total.cents(), 5250);
        assert_eq!(export.metadata.earliest_expense.as_deref(), Some("2024-01-02"));
        assert_eq!(export.metadata.latest_expense.as_deref(), Some("2024-03-10"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip_into_fresh_storage() {
        let storage = populated_storage();

        let mut buffer = Vec::new();
        export_full_json(&storage, &mut buffer, true).unwrap();
        let imported = import_from_json(&String::from_utf8(buffer).unwrap()).unwrap();

        let mut restored = Storage::in_memory();
        let summary = imported.apply_to(&mut restored);

        assert_eq!(summary.expenses_inserted, 2);
        assert_eq!(summary.categories_replaced, 8);
        assert_eq!(summary.categories_inserted, 1);
        assert_eq!(restored.expenses.expenses(), storage.expenses.expenses());
        assert!(restored.categories.find("Pets").is_some());
    }

    #[test]
    fn test_reimport_is_idempotent() {
        let storage = populated_storage();
        let export = FullExport::from_storage(&storage);

        let mut restored = Storage::in_memory();
        export.clone().apply_to(&mut restored);
        let summary = export.apply_to(&mut restored);

        assert_eq!(summary.expenses_inserted, 0);
        assert_eq!(summary.expenses_replaced, 2);
        assert_eq!(restored.expenses.len(), 2);
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let mut export = FullExport::from_storage(&Storage::in_memory());
        let expense = NewExpense::new(Money::from_cents(100), "food", "2024-03-10")
            .into_expense(ExpenseId::from("exp-1"));
        export.expenses = vec![expense.clone(), expense];

        let json = serde_json::to_string(&export).unwrap();
        let err = import_from_json(&json).unwrap_err();
        assert!(err.to_string().contains("Duplicate expense id exp-1"));
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(import_from_json("{"), Err(SpendError::Import(_))));
    }
}
