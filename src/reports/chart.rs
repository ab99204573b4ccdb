//! Chart data projection
//!
//! Turns category totals and bucket maps into ordered, labelled series ready
//! for pie, bar and trend rendering. Nothing here touches storage.

use serde::Serialize;

use crate::models::{BucketKey, BucketMap, CategoryId, CategoryLookup, Money};
use crate::services::aggregate::{rank, CategoryTotal};

/// Fill color of the per-period bar series
pub const PERIOD_BAR_COLOR: &str = "#2f7f7b";

/// One pie wedge or bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: Money,
    pub color: String,
}

/// One point of a time series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub key: BucketKey,
    pub label: String,
    pub value: Money,
}

/// Projects category totals using a category lookup for names and colors
pub struct ChartProjector<'a, C: CategoryLookup + ?Sized> {
    categories: &'a C,
}

impl<'a, C: CategoryLookup + ?Sized> ChartProjector<'a, C> {
    pub fn new(categories: &'a C) -> Self {
        Self { categories }
    }

    /// One slice per category, in the order given
    ///
    /// Unknown category ids render as `unknown` in the neutral gray.
    pub fn pie_series(&self, totals: &[CategoryTotal]) -> Vec<ChartSlice> {
        totals.iter().map(|t| self.slice(&t.category, t.amount)).collect()
    }

    /// The `limit` largest categories, largest first
    pub fn bar_series(&self, totals: &[CategoryTotal], limit: usize) -> Vec<ChartSlice> {
        rank(totals.to_vec(), limit)
            .iter()
            .map(|t| self.slice(&t.category, t.amount))
            .collect()
    }

    fn slice(&self, category: &CategoryId, value: Money) -> ChartSlice {
        ChartSlice {
            label: self.categories.name_or_fallback(category),
            value,
            color: self.categories.color_or_fallback(category),
        }
    }
}

/// Trailing window of buckets for the trend line, oldest first
///
/// Window sizes are 7 days, 8 weeks, 6 months or 5 years. Fewer buckets
/// than the window are returned as-is, without zero padding.
pub fn trend_series(buckets: &BucketMap) -> Vec<TrendPoint> {
    window(buckets, buckets.granularity().trend_window())
}

/// Trailing window of buckets for the per-period bar chart
///
/// Same as [`trend_series`] except weekly data shows only 4 bars.
pub fn period_series(buckets: &BucketMap) -> Vec<ChartSlice> {
    window(buckets, buckets.granularity().period_window())
        .into_iter()
        .map(|point| ChartSlice {
            label: point.label,
            value: point.value,
            color: PERIOD_BAR_COLOR.to_string(),
        })
        .collect()
}

fn window(buckets: &BucketMap, size: usize) -> Vec<TrendPoint> {
    let granularity = buckets.granularity();
    buckets
        .trailing(size)
        .into_iter()
        .map(|(key, value)| TrendPoint {
            key: key.clone(),
            label: granularity.label_for_key(key),
            value,
        })
        .collect()
}
