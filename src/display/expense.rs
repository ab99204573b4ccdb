//! Expense display formatting
//!
//! Register-style listing of expenses for the terminal.

use crate::models::{CategoryLookup, Expense};

use super::report::truncate;

/// Format a single expense as a register row
pub fn format_expense_row<C: CategoryLookup + ?Sized>(
    expense: &Expense,
    categories: &C,
    currency_symbol: &str,
) -> String {
    let description = if expense.description.is_empty() {
        "(no description)".to_string()
    } else {
        expense.description.clone()
    };

    format!(
        "{:<38} {:<10} {:<18} {:<24} {:>12}",
        expense.id,
        truncate(&expense.date, 10),
        truncate(&categories.name_or_fallback(&expense.category), 18),
        truncate(&description, 24),
        expense.amount.format_with_symbol(currency_symbol)
    )
}

/// Format expenses as a register, most recent first
///
/// `limit` keeps only the newest entries by date; equal dates keep their
/// insertion order, newest insert first.
pub fn format_expense_list<C: CategoryLookup + ?Sized>(
    expenses: &[Expense],
    categories: &C,
    currency_symbol: &str,
    limit: Option<usize>,
) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut ordered: Vec<&Expense> = expenses.iter().rev().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = limit {
        ordered.truncate(limit);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<38} {:<10} {:<18} {:<24} {:>12}\n",
        "ID", "Date", "Category", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(106));
    output.push('\n');

    for expense in &ordered {
        output.push_str(&format_expense_row(expense, categories, currency_symbol));
        output.push('\n');
    }

    if ordered.len() < expenses.len() {
        output.push_str(&format!(
            "\nShowing {} of {} expenses.\n",
            ordered.len(),
            expenses.len()
        ));
    }

    output
}

/// Format one expense in full
pub fn format_expense_details<C: CategoryLookup + ?Sized>(
    expense: &Expense,
    categories: &C,
    currency_symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "Category:    {} ({})\n",
        categories.name_or_fallback(&expense.category),
        expense.category
    ));
    if !expense.description.is_empty() {
        output.push_str(&format!("Description: {}\n", expense.description));
    }

    output
}
