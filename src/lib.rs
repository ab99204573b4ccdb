//! spendlog - local expense tracking with period analytics
//!
//! Expenses are kept in an insertion-ordered store persisted through a
//! pluggable key-value backend. Everything else is derived on demand: time
//! buckets, period-over-period comparisons, category rankings and
//! chart-ready series.
//!
//! # Architecture
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Expenses, categories, money and calendar buckets
//! - `storage`: Key-value backends and the repositories built on them
//! - `services`: Time bucket aggregation and period analysis
//! - `reports`: Chart projections and the statistics report
//! - `export`: JSON/YAML backups and CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `spendlog` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use spendlog::models::{Granularity, Money, NewExpense};
//! use spendlog::services::PeriodAnalyzer;
//! use spendlog::storage::Storage;
//!
//! let mut storage = Storage::in_memory();
//! storage.expenses.add(NewExpense::new(Money::from_cents(1000), "food", "2024-03-10"));
//! storage.expenses.add(NewExpense::new(Money::from_cents(2000), "food", "2024-03-11"));
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
//! let analyzer = PeriodAnalyzer::new(storage.expenses.expenses(), Granularity::Monthly, today);
//! assert_eq!(analyzer.current_total(), Money::from_cents(3000));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SpendError, SpendResult};
