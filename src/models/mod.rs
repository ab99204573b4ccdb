//! Core data models for spendlog
//!
//! Expense records, categories, money, and the calendar bucketing types
//! the analytics layer is built on.

pub mod bucket;
pub mod category;
pub mod expense;
pub mod granularity;
pub mod ids;
pub mod money;

pub use bucket::{BucketKey, BucketMap, INVALID_DATE_KEY};
pub use category::{Category, CategoryLookup, FALLBACK_COLOR, UNKNOWN_CATEGORY_LABEL};
pub use expense::{Expense, NewExpense};
pub use granularity::Granularity;
pub use ids::{CategoryId, ExpenseId};
pub use money::Money;
