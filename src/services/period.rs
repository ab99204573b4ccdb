//! Period analysis
//!
//! Compares the bucket containing "today" with the one before it and ranks
//! the categories of the selected period. Everything is derived from the
//! expense slice on construction; build a new analyzer after the store
//! changes.

use std::collections::HashSet;
use std::fmt;

use chrono::{Local, NaiveDate};

use crate::models::{BucketKey, BucketMap, Expense, Granularity, Money};

use super::aggregate::{self, CategoryTotal};

/// Direction of the change between two periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    More,
    Less,
    Same,
}

impl Trend {
    /// Classify a signed difference; only an exact zero is `Same`
    pub fn of(delta: Money) -> Self {
        if delta.is_positive() {
            Self::More
        } else if delta.is_negative() {
            Self::Less
        } else {
            Self::Same
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::More => "more",
            Self::Less => "less",
            Self::Same => "same",
        };
        write!(f, "{}", s)
    }
}

/// Current period against the one immediately before it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub granularity: Granularity,
    pub current_key: BucketKey,
    pub previous_key: BucketKey,
    pub current_total: Money,
    pub previous_total: Money,
}

impl Comparison {
    /// `current_total - previous_total`
    pub fn delta(&self) -> Money {
        self.current_total - self.previous_total
    }

    pub fn trend(&self) -> Trend {
        Trend::of(self.delta())
    }

    /// "$5.00 more than last month", "Same as last year"
    pub fn message(&self, currency_symbol: &str) -> String {
        let previous = self.granularity.previous_label();
        let difference = self.delta().abs().format_with_symbol(currency_symbol);
        match self.trend() {
            Trend::More => format!("{} more than {}", difference, previous),
            Trend::Less => format!("{} less than {}", difference, previous),
            Trend::Same => format!("Same as {}", previous),
        }
    }
}

/// Analyzer for one granularity at one reference date
pub struct PeriodAnalyzer<'a> {
    expenses: &'a [Expense],
    granularity: Granularity,
    today: NaiveDate,
    buckets: BucketMap,
}

impl<'a> PeriodAnalyzer<'a> {
    /// Create an analyzer with an explicit reference date
    pub fn new(expenses: &'a [Expense], granularity: Granularity, today: NaiveDate) -> Self {
        Self {
            expenses,
            granularity,
            today,
            buckets: aggregate::aggregate(expenses, granularity),
        }
    }

    /// Create an analyzer anchored on the local calendar date
    pub fn for_today(expenses: &'a [Expense], granularity: Granularity) -> Self {
        Self::new(expenses, granularity, Local::now().date_naive())
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The full aggregate for the selected granularity
    pub fn buckets(&self) -> &BucketMap {
        &self.buckets
    }

    pub fn current_key(&self) -> BucketKey {
        self.granularity.key_for_date(self.today)
    }

    pub fn previous_key(&self) -> BucketKey {
        self.granularity.previous_key(self.today)
    }

    /// Sum in the bucket containing today (zero when absent)
    pub fn current_total(&self) -> Money {
        self.buckets.get(&self.current_key())
    }

    /// Sum in the bucket before the current one (zero when absent)
    pub fn previous_total(&self) -> Money {
        self.buckets.get(&self.previous_key())
    }

    pub fn comparison(&self) -> Comparison {
        Comparison {
            granularity: self.granularity,
            current_key: self.current_key(),
            previous_key: self.previous_key(),
            current_total: self.current_total(),
            previous_total: self.previous_total(),
        }
    }

    /// Records whose own bucket key is present in the aggregate
    ///
    /// The membership test recomputes each key with the aggregator's rule, so
    /// filtering can never disagree with bucketing. An empty aggregate yields
    /// no records.
    pub fn filtered_expenses(&self) -> Vec<&'a Expense> {
        self.expenses_in(self.buckets.keys().collect())
    }

    /// Category totals over the filtered records, first-encountered order
    pub fn filtered_by_category(&self) -> Vec<CategoryTotal> {
        aggregate::by_category(self.filtered_expenses())
    }

    /// Ranked categories of the filtered records, at most `limit` entries
    pub fn top_categories(&self, limit: usize) -> Vec<CategoryTotal> {
        aggregate::rank(self.filtered_by_category(), limit)
    }

    pub fn filtered_total(&self) -> Money {
        self.filtered_expenses().iter().map(|e| e.amount).sum()
    }

    /// Mean over the filtered records (zero when none)
    pub fn filtered_average(&self) -> Money {
        let filtered = self.filtered_expenses();
        let total: Money = filtered.iter().map(|e| e.amount).sum();
        total.average_over(filtered.len())
    }

    fn expenses_in(&self, keys: HashSet<&BucketKey>) -> Vec<&'a Expense> {
        if keys.is_empty() {
            return Vec::new();
        }
        self.expenses
            .iter()
            .filter(|e| keys.contains(&self.granularity.bucket_key(&e.date)))
            .collect()
    }
}

/// Spend in the calendar month containing `today`
pub fn this_month_total(expenses: &[Expense], today: NaiveDate) -> Money {
    PeriodAnalyzer::new(expenses, Granularity::Monthly, today).current_total()
}

/// Spend in the calendar month before the one containing `today`
pub fn last_month_total(expenses: &[Expense], today: NaiveDate) -> Money {
    PeriodAnalyzer::new(expenses, Granularity::Monthly, today).previous_total()
}
