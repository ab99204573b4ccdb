//! Time bucket keys and bucket maps
//!
//! Every key format is zero-padded, so lexicographic order over keys is
//! chronological order. [`BucketMap`] relies on that: iterating its
//! `BTreeMap` yields buckets oldest first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::granularity::Granularity;
use super::money::Money;

/// Key assigned to records whose date cannot be parsed
pub const INVALID_DATE_KEY: &str = "Invalid Date";

/// A derived bucket identifier (`2024-03-10`, `2024-03`, `2024`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketKey(String);

impl BucketKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for BucketKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BucketKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Summed amounts per bucket for one granularity
///
/// Only buckets holding at least one record are present; there is no
/// zero-filling of gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketMap {
    granularity: Granularity,
    totals: BTreeMap<BucketKey, Money>,
}

impl BucketMap {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            totals: BTreeMap::new(),
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Accumulate an amount into a bucket, creating it if needed
    pub fn add(&mut self, key: BucketKey, amount: Money) {
        *self.totals.entry(key).or_default() += amount;
    }

    /// Sum for a bucket, zero when the bucket is absent
    pub fn get(&self, key: &BucketKey) -> Money {
        self.totals.get(key).copied().unwrap_or_default()
    }

    pub fn contains(&self, key: &BucketKey) -> bool {
        self.totals.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Sum over every bucket
    pub fn total(&self) -> Money {
        self.totals.values().sum()
    }

    /// Keys in chronological order
    pub fn keys(&self) -> impl Iterator<Item = &BucketKey> {
        self.totals.keys()
    }

    /// Buckets in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (&BucketKey, Money)> {
        self.totals.iter().map(|(k, v)| (k, *v))
    }

    /// The most recent `size` buckets, oldest first
    ///
    /// Returns every bucket when fewer than `size` exist.
    pub fn trailing(&self, size: usize) -> Vec<(&BucketKey, Money)> {
        let skip = self.totals.len().saturating_sub(size);
        self.iter().skip(skip).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_with(keys: &[(&str, i64)]) -> BucketMap {
        let mut map = BucketMap::new(Granularity::Monthly);
        for (key, cents) in keys {
            map.add(BucketKey::from(*key), Money::from_cents(*cents));
        }
        map
    }

    #[test]
    fn test_add_accumulates() {
        let map = map_with(&[("2024-03", 1000), ("2024-03", 2000), ("2024-04", 500)]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&BucketKey::from("2024-03")).cents(), 3000);
        assert_eq!(map.total().cents(), 3500);
    }

    #[test]
    fn test_absent_bucket_is_zero() {
        let map = BucketMap::new(Granularity::Daily);
        assert!(map.is_empty());
        assert_eq!(map.get(&BucketKey::from("2024-03-10")), Money::zero());
        assert!(!map.contains(&BucketKey::from("2024-03-10")));
    }

    #[test]
    fn test_iteration_is_chronological() {
        let map = map_with(&[("2024-11", 1), ("2023-12", 1), ("2024-02", 1)]);
        let keys: Vec<_> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["2023-12", "2024-02", "2024-11"]);
    }

    #[test]
    fn test_trailing_window() {
        let map = map_with(&[("2024-01", 1), ("2024-02", 2), ("2024-03", 3), ("2024-04", 4)]);

        let last_two: Vec<_> = map.trailing(2).iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(last_two, vec!["2024-03", "2024-04"]);

        // No padding when fewer buckets exist than requested
        assert_eq!(map.trailing(10).len(), 4);
        assert!(map.trailing(0).is_empty());
    }
}
