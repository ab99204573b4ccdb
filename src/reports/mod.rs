//! Reports for spendlog
//!
//! Chart-ready projections of the analytics layer and the statistics report
//! that bundles them for the terminal.

pub mod chart;
pub mod statistics;

pub use chart::{period_series, trend_series, ChartProjector, ChartSlice, TrendPoint, PERIOD_BAR_COLOR};
pub use statistics::StatisticsReport;
