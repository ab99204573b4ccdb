//! Expense CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{SpendError, SpendResult};
use crate::models::expense::DATE_FORMAT;
use crate::models::{Money, NewExpense};
use crate::services::{last_month_total, this_month_total};
use crate::storage::Storage;

use super::{date_or_today, ensure_persisted};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "12.50" or "$12.50")
        amount: String,
        /// Category name or ID
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one expense
    Show {
        /// Expense ID
        id: String,
    },

    /// Remove an expense
    Remove {
        /// Expense ID
        id: String,
    },

    /// Remove every expense
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show the all-time total and monthly figures
    Total,
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> SpendResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
        } => {
            let amount = Money::parse(&amount)
                .map_err(|e| SpendError::Validation(format!("Invalid amount: {}", e)))?;
            if amount.is_negative() {
                return Err(SpendError::Validation(
                    "Amount must not be negative".to_string(),
                ));
            }

            let category = storage
                .categories
                .find(&category)
                .ok_or_else(|| SpendError::category_not_found(&category))?
                .clone();
            let date = date_or_today(date.as_deref())?;

            let new_expense =
                NewExpense::new(amount, category.id.clone(), date.format(DATE_FORMAT).to_string())
                    .with_description(description.unwrap_or_default());
            let id = storage.expenses.add(new_expense);
            ensure_persisted(storage)?;

            println!("Added expense: {}", amount.format_with_symbol(symbol));
            println!("  Category: {}", category.name);
            println!("  Date: {}", settings.format_date(date));
            println!("  ID: {}", id);
        }

        ExpenseCommands::List { limit } => {
            print!(
                "{}",
                format_expense_list(storage.expenses.expenses(), &storage.categories, symbol, limit)
            );
        }

        ExpenseCommands::Show { id } => {
            let expense = storage
                .expenses
                .get(&id)
                .ok_or_else(|| SpendError::expense_not_found(&id))?;
            print!("{}", format_expense_details(expense, &storage.categories, symbol));
        }

        ExpenseCommands::Remove { id } => {
            let removed = storage.expenses.remove(&id);
            ensure_persisted(storage)?;
            if removed {
                println!("Removed expense {}", id);
            } else {
                println!("No expense with ID {}; nothing removed.", id);
            }
        }

        ExpenseCommands::Clear { yes } => {
            if !yes {
                return Err(SpendError::Validation(
                    "Refusing to remove every expense without --yes".to_string(),
                ));
            }
            let count = storage.expenses.len();
            storage.expenses.clear();
            ensure_persisted(storage)?;
            println!("Removed {} expense(s).", count);
        }

        ExpenseCommands::Total => {
            let today = Local::now().date_naive();
            let expenses = storage.expenses.expenses();
            println!("Expenses:   {}", storage.expenses.len());
            println!("Total:      {}", storage.expenses.total().format_with_symbol(symbol));
            println!("Average:    {}", storage.expenses.average().format_with_symbol(symbol));
            println!("This month: {}", this_month_total(expenses, today).format_with_symbol(symbol));
            println!("Last month: {}", last_month_total(expenses, today).format_with_symbol(symbol));
        }
    }

    Ok(())
}
