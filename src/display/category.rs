//! Category display formatting

use std::collections::HashMap;

use crate::models::{Category, CategoryId, Money};
use crate::services::CategoryTotal;

/// Format the registry as a table, with all-time spend per category
///
/// Spend recorded against ids missing from the registry is summed into a
/// trailing `unknown` row.
pub fn format_category_list(
    categories: &[Category],
    totals: &[CategoryTotal],
    currency_symbol: &str,
) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let spent: HashMap<&CategoryId, Money> =
        totals.iter().map(|t| (&t.category, t.amount)).collect();

    let mut output = String::new();
    output.push_str(&format!(
        "{:<38} {:<22} {:<8} {:>12}\n",
        "ID", "Name", "Color", "Spent"
    ));
    output.push_str(&"-".repeat(83));
    output.push('\n');

    for category in categories {
        output.push_str(&format!(
            "{:<38} {:<22} {:<8} {:>12}\n",
            category.id,
            category.name,
            category.color,
            spent
                .get(&category.id)
                .copied()
                .unwrap_or_default()
                .format_with_symbol(currency_symbol)
        ));
    }

    let orphaned: Money = totals
        .iter()
        .filter(|t| !categories.iter().any(|c| c.id == t.category))
        .map(|t| t.amount)
        .sum();
    if !orphaned.is_zero() {
        output.push_str(&format!(
            "{:<38} {:<22} {:<8} {:>12}\n",
            "-",
            crate::models::UNKNOWN_CATEGORY_LABEL,
            crate::models::FALLBACK_COLOR,
            orphaned.format_with_symbol(currency_symbol)
        ));
    }

    output
}

/// Format one category in full
pub fn format_category_details(category: &Category) -> String {
    format!(
        "Category: {}\nID:       {}\nColor:    {}\n",
        category.name, category.id, category.color
    )
}
