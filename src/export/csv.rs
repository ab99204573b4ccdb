//! CSV export of expenses
//!
//! One row per expense in insertion order, with the category resolved to its
//! display name for spreadsheet use.

use std::io::Write;

use crate::error::{SpendError, SpendResult};
use crate::models::CategoryLookup;
use crate::storage::Storage;

/// Export every expense to CSV
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> SpendResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["ID", "Date", "Category ID", "Category", "Description", "Amount"])
        .map_err(|e| SpendError::Export(e.to_string()))?;

    for expense in storage.expenses.expenses() {
        let category_name = storage.categories.name_or_fallback(&expense.category);
        let amount = format!("{:.2}", expense.amount.as_decimal());
        csv_writer
            .write_record([
                expense.id.as_str(),
                expense.date.as_str(),
                expense.category.as_str(),
                category_name.as_str(),
                expense.description.as_str(),
                amount.as_str(),
            ])
            .map_err(|e| SpendError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| SpendError::Export(e.to_string()))?;
    Ok(())
}
