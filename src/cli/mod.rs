//! CLI command handlers
//!
//! Bridges clap argument parsing with the storage, analytics and export
//! layers.

pub mod category;
pub mod config;
pub mod expense;
pub mod export;
pub mod report;

pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, handle_import_command, ExportArgs, ExportFormat, ImportArgs};
pub use report::{handle_stats_command, StatsArgs};

use chrono::{Local, NaiveDate};

use crate::error::{SpendError, SpendResult};
use crate::models::expense::parse_date;
use crate::storage::Storage;

/// Turn best-effort persistence failures into a command error
///
/// The repositories never fail a mutation; the CLI still has to tell the user
/// when nothing reached the disk.
pub(crate) fn ensure_persisted(storage: &Storage) -> SpendResult<()> {
    let failures = storage.expenses.persist_failures() + storage.categories.persist_failures();
    if failures > 0 {
        return Err(SpendError::Storage(format!(
            "{} write(s) could not be saved; see the log for details",
            failures
        )));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` argument, defaulting to the local date
pub(crate) fn date_or_today(date: Option<&str>) -> SpendResult<NaiveDate> {
    match date {
        Some(s) => parse_date(s.trim())
            .ok_or_else(|| SpendError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))),
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewExpense};
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    #[test]
    fn test_date_or_today() {
        assert_eq!(
            date_or_today(Some("2024-03-10")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert!(date_or_today(Some("10/03/2024")).unwrap_err().is_validation());
        assert_eq!(date_or_today(None).unwrap(), Local::now().date_naive());
    }

    #[test]
    fn test_ensure_persisted_reports_failed_writes() {
        let backend = Rc::new(MemoryStore::new());
        let mut storage = Storage::with_backend(backend.clone());
        assert!(ensure_persisted(&storage).is_ok());

        backend.set_fail_writes(true);
        storage
            .expenses
            .add(NewExpense::new(Money::from_cents(100), "food", "2024-03-10"));
        assert!(matches!(ensure_persisted(&storage), Err(SpendError::Storage(_))));
    }
}
