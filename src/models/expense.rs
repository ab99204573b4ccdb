//! Expense record model
//!
//! An expense keeps its date as the `YYYY-MM-DD` string it was entered with.
//! Dates are not validated: a malformed date still round-trips through
//! storage and lands in a degenerate bucket when aggregated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// Calendar date format used by expense records
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, immutable once assigned
    pub id: ExpenseId,

    /// Amount spent (negative values are kept as-is)
    #[serde(default)]
    pub amount: Money,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Category reference; existence is not checked
    #[serde(default)]
    pub category: CategoryId,

    /// Local calendar date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
}

/// An expense as entered by the user, before an id is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Money,
    pub description: String,
    pub category: CategoryId,
    pub date: String,
}

impl NewExpense {
    pub fn new(amount: Money, category: impl Into<CategoryId>, date: impl Into<String>) -> Self {
        Self {
            amount,
            description: String::new(),
            category: category.into(),
            date: date.into(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach an id, producing a full record
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date,
        }
    }
}

impl Expense {
    /// Parse the record's date, `None` when it is malformed
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}
