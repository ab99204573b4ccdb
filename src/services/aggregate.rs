//! Time bucket aggregation
//!
//! Pure functions over an expense slice. Nothing is cached: callers
//! recompute from the current repository snapshot, so aggregates can never
//! drift from the records they summarize.

use std::collections::HashMap;

use crate::models::{BucketMap, CategoryId, Expense, Granularity, Money};

/// Summed amount for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: CategoryId,
    pub amount: Money,
}

/// Group expenses into buckets of the given granularity
///
/// Empty input yields an empty map. Records with malformed dates are kept
/// under a degenerate key rather than dropped (see [`Granularity::bucket_key`]).
pub fn aggregate(expenses: &[Expense], granularity: Granularity) -> BucketMap {
    let mut buckets = BucketMap::new(granularity);
    for expense in expenses {
        buckets.add(granularity.bucket_key(&expense.date), expense.amount);
    }
    buckets
}

/// Total per category, in the order categories are first encountered
pub fn by_category<'a, I>(expenses: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut index: HashMap<&CategoryId, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match index.get(&expense.category) {
            Some(&i) => totals[i].amount += expense.amount,
            None => {
                index.insert(&expense.category, totals.len());
                totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    amount: expense.amount,
                });
            }
        }
    }

    totals
}

/// Sort descending by amount and keep the first `limit`
///
/// The sort is stable, so equal amounts keep their incoming order.
pub fn rank(mut totals: Vec<CategoryTotal>, limit: usize) -> Vec<CategoryTotal> {
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals.truncate(limit);
    totals
}

/// All-time top categories
pub fn top_categories(expenses: &[Expense], limit: usize) -> Vec<CategoryTotal> {
    rank(by_category(expenses), limit)
}
