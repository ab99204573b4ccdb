//! Bucketing granularity
//!
//! Daily, weekly (Sunday-anchored), monthly and yearly resolutions, with the
//! calendar rules that map a date to its bucket key and to the bucket that
//! immediately precedes it.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::bucket::{BucketKey, INVALID_DATE_KEY};
use super::expense::{parse_date, DATE_FORMAT};

/// The selected bucketing resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Daily,
        Granularity::Weekly,
        Granularity::Monthly,
        Granularity::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Number of trailing buckets in the trend line
    pub fn trend_window(&self) -> usize {
        match self {
            Self::Daily => 7,
            Self::Weekly => 8,
            Self::Monthly => 6,
            Self::Yearly => 5,
        }
    }

    /// Number of trailing buckets in the period bar chart
    pub fn period_window(&self) -> usize {
        match self {
            Self::Daily => 7,
            Self::Weekly => 4,
            Self::Monthly => 6,
            Self::Yearly => 5,
        }
    }

    /// How the preceding period is referred to in comparisons
    pub fn previous_label(&self) -> &'static str {
        match self {
            Self::Daily => "yesterday",
            Self::Weekly => "last week",
            Self::Monthly => "last month",
            Self::Yearly => "last year",
        }
    }

    /// Bucket key for a raw record date
    ///
    /// Daily keys are the date string verbatim. The other granularities parse
    /// the date first; an unparseable date yields [`INVALID_DATE_KEY`].
    pub fn bucket_key(&self, date: &str) -> BucketKey {
        if *self == Self::Daily {
            return BucketKey::from(date);
        }
        match parse_date(date) {
            Some(parsed) => self.key_for_date(parsed),
            None => BucketKey::from(INVALID_DATE_KEY),
        }
    }

    /// Bucket key for a calendar date
    ///
    /// A week whose Sunday would fall before the earliest representable date
    /// gets [`INVALID_DATE_KEY`].
    pub fn key_for_date(&self, date: NaiveDate) -> BucketKey {
        let key = match self {
            Self::Daily => date.format(DATE_FORMAT).to_string(),
            Self::Weekly => match week_start(date) {
                Some(sunday) => sunday.format(DATE_FORMAT).to_string(),
                None => INVALID_DATE_KEY.to_string(),
            },
            Self::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
            Self::Yearly => format!("{:04}", date.year()),
        };
        BucketKey::from(key)
    }

    /// Key of the bucket immediately before the one containing `today`
    ///
    /// [`INVALID_DATE_KEY`] when that bucket lies outside the calendar range.
    pub fn previous_key(&self, today: NaiveDate) -> BucketKey {
        let previous = match self {
            Self::Daily => today.pred_opt(),
            Self::Weekly => week_start(today)
                .and_then(|sunday| sunday.checked_sub_signed(Duration::days(7))),
            Self::Monthly => today
                .with_day(1)
                .and_then(|first| first.checked_sub_months(Months::new(1))),
            Self::Yearly => NaiveDate::from_ymd_opt(today.year() - 1, 1, 1),
        };
        previous
            .map(|date| self.key_for_date(date))
            .unwrap_or_else(|| BucketKey::from(INVALID_DATE_KEY))
    }

    /// Human-readable chart label for a bucket key
    ///
    /// `Mar 10` for daily and weekly keys, `Mar` for monthly keys and the bare
    /// year for yearly keys.
    pub fn label_for_key(&self, key: &BucketKey) -> String {
        match self {
            Self::Daily | Self::Weekly => parse_date(key.as_str())
                .map(|d| d.format("%b %-d").to_string())
                .unwrap_or_else(|| INVALID_DATE_KEY.to_string()),
            Self::Monthly => parse_date(&format!("{}-01", key.as_str()))
                .map(|d| d.format("%b").to_string())
                .unwrap_or_else(|| INVALID_DATE_KEY.to_string()),
            Self::Yearly => key.as_str().to_string(),
        }
    }
}

/// The Sunday that starts the week containing `date`, if representable
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(i64::from(date.weekday().num_days_from_sunday())))
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = GranularityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Self::Daily),
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "y" => Ok(Self::Yearly),
            _ => Err(GranularityParseError(s.to_string())),
        }
    }
}

/// Error type for granularity parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranularityParseError(pub String);

impl fmt::Display for GranularityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid period '{}': expected daily, weekly, monthly or yearly",
            self.0
        )
    }
}

impl std::error::Error for GranularityParseError {}
