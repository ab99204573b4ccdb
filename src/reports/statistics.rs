//! Statistics Report
//!
//! Everything the statistics view shows for one granularity: the period
//! comparison, filtered totals, category breakdowns and the time series.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::display::report::{
    double_separator, format_bar, format_percentage, format_signed, separator, share, truncate,
};
use crate::error::{SpendError, SpendResult};
use crate::models::{Granularity, Money};
use crate::services::{Comparison, PeriodAnalyzer};
use crate::storage::Storage;

use super::chart::{period_series, trend_series, ChartProjector, ChartSlice, TrendPoint};

const REPORT_WIDTH: usize = 64;
const BAR_WIDTH: usize = 20;

/// Statistics for one granularity at one reference date
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    pub granularity: Granularity,
    pub today: NaiveDate,
    #[serde(skip)]
    pub comparison: Comparison,
    pub current_total: Money,
    pub previous_total: Money,
    pub filtered_total: Money,
    pub filtered_average: Money,
    pub record_count: usize,
    /// Every category of the filtered records, first-encountered order
    pub pie: Vec<ChartSlice>,
    /// Top categories, largest first
    pub top_categories: Vec<ChartSlice>,
    pub trend: Vec<TrendPoint>,
    pub periods: Vec<ChartSlice>,
}

impl StatisticsReport {
    /// Build the report from the current storage snapshot
    pub fn generate(
        storage: &Storage,
        granularity: Granularity,
        today: NaiveDate,
        top_n: usize,
    ) -> Self {
        let analyzer = PeriodAnalyzer::new(storage.expenses.expenses(), granularity, today);
        let projector = ChartProjector::new(&storage.categories);

        let by_category = analyzer.filtered_by_category();
        let comparison = analyzer.comparison();

        Self {
            granularity,
            today,
            current_total: comparison.current_total,
            previous_total: comparison.previous_total,
            comparison,
            filtered_total: analyzer.filtered_total(),
            filtered_average: analyzer.filtered_average(),
            record_count: analyzer.filtered_expenses().len(),
            pie: projector.pie_series(&by_category),
            top_categories: projector.bar_series(&by_category, top_n),
            trend: trend_series(analyzer.buckets()),
            periods: period_series(analyzer.buckets()),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!(
            "Statistics ({}) as of {}\n",
            self.granularity, self.today
        ));
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');

        output.push_str(&format!(
            "{:<24} {:>14}  ({})\n",
            format!("This period ({})", self.comparison.current_key),
            money(self.current_total),
            self.comparison.message(currency_symbol)
        ));
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            format!("Previous ({})", self.comparison.previous_key),
            money(self.previous_total)
        ));
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            "Change",
            format_signed(self.comparison.delta(), currency_symbol)
        ));
        output.push_str(&format!(
            "{:<24} {:>14}  over {} expense(s)\n",
            "Total",
            money(self.filtered_total),
            self.record_count
        ));
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            "Average",
            money(self.filtered_average)
        ));

        output.push_str("\nTop categories\n");
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        if self.top_categories.is_empty() {
            output.push_str("  No expenses recorded.\n");
        }
        let max = self.top_categories.first().map(|s| s.value).unwrap_or_default();
        for slice in &self.top_categories {
            output.push_str(&format!(
                "  {:<20} {:>12} {:>6} {}\n",
                truncate(&slice.label, 20),
                money(slice.value),
                format_percentage(share(slice.value, self.filtered_total)),
                format_bar(slice.value, max, BAR_WIDTH)
            ));
        }

        output.push_str("\nTrend\n");
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        let max = self.trend.iter().map(|p| p.value).max().unwrap_or_default();
        for point in &self.trend {
            output.push_str(&format!(
                "  {:<20} {:>12}  {}\n",
                point.label,
                money(point.value),
                format_bar(point.value, max, BAR_WIDTH)
            ));
        }

        output
    }

    /// Export the trend series as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> SpendResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Granularity", "Bucket", "Label", "Amount"])
            .map_err(|e| SpendError::Export(e.to_string()))?;

        for point in &self.trend {
            let amount = format!("{:.2}", point.value.as_decimal());
            csv_writer
                .write_record([
                    self.granularity.as_str(),
                    point.key.as_str(),
                    point.label.as_str(),
                    amount.as_str(),
                ])
                .map_err(|e| SpendError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| SpendError::Export(e.to_string()))?;
        Ok(())
    }
}
