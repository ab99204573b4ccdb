//! Category CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::category::{format_category_details, format_category_list};
use crate::error::{SpendError, SpendResult};
use crate::models::FALLBACK_COLOR;
use crate::services::by_category;
use crate::storage::Storage;

use super::ensure_persisted;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their all-time spend
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Display color as #rrggbb
        #[arg(short, long, default_value = FALLBACK_COLOR)]
        color: String,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Rename or recolor a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color as #rrggbb
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Remove a category (its expenses show as "unknown")
    Remove {
        /// Category name or ID
        category: String,
    },

    /// Restore the default categories, dropping custom ones
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> SpendResult<()> {
    match cmd {
        CategoryCommands::List => {
            let totals = by_category(storage.expenses.expenses());
            print!(
                "{}",
                format_category_list(storage.categories.all(), &totals, &settings.currency_symbol)
            );
        }

        CategoryCommands::Add { name, color } => {
            let category = storage.categories.add(&name, &color)?;
            ensure_persisted(storage)?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let found = storage
                .categories
                .find(&category)
                .ok_or_else(|| SpendError::category_not_found(&category))?;
            print!("{}", format_category_details(found));
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
        } => {
            if name.is_none() && color.is_none() {
                return Err(SpendError::Validation(
                    "Nothing to change; pass --name and/or --color".to_string(),
                ));
            }
            let id = storage
                .categories
                .find(&category)
                .ok_or_else(|| SpendError::category_not_found(&category))?
                .id
                .clone();
            let updated = storage
                .categories
                .update(id.as_str(), name.as_deref(), color.as_deref())?;
            ensure_persisted(storage)?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Remove { category } => {
            let found = storage
                .categories
                .find(&category)
                .ok_or_else(|| SpendError::category_not_found(&category))?
                .clone();
            storage.categories.remove(found.id.as_str());
            ensure_persisted(storage)?;

            let orphaned = storage
                .expenses
                .expenses()
                .iter()
                .filter(|e| e.category == found.id)
                .count();
            println!("Removed category: {}", found.name);
            if orphaned > 0 {
                println!("  {} expense(s) now show as \"unknown\".", orphaned);
            }
        }

        CategoryCommands::Reset { yes } => {
            if !yes {
                return Err(SpendError::Validation(
                    "Refusing to reset categories without --yes".to_string(),
                ));
            }
            storage.categories.clear();
            ensure_persisted(storage)?;
            println!("Categories reset to defaults.");
        }
    }

    Ok(())
}
