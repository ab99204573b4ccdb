//! Analytics layer for spendlog
//!
//! Pure transforms over the expense list: bucketing by time and the
//! period-over-period analysis built on top of it.

pub mod aggregate;
pub mod period;

pub use aggregate::{aggregate, by_category, rank, top_categories, CategoryTotal};
pub use period::{last_month_total, this_month_total, Comparison, PeriodAnalyzer, Trend};
