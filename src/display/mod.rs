//! Display formatting for terminal output

pub mod category;
pub mod expense;
pub mod report;

pub use category::{format_category_details, format_category_list};
pub use expense::{format_expense_details, format_expense_list, format_expense_row};
