//! Statistical aggregation primitives
//!
//! Stateless functions over count mappings. Both the combiner and the
//! summarizer derive every statistic through these, so equivalent inputs
//! give identical outputs on either path.

use itertools::Itertools;

use crate::error::{AuditError, Result};
pub use crate::models::counts::coalesce;
use crate::models::counts::{CountMap, PercentMap};

/// Round to a fixed number of decimal places
///
/// Rounds the exact binary value, with exact ties going to the even digit,
/// so `0.0625` becomes `0.062`. Scaling by a power of ten first would
/// introduce its own error.
#[must_use]
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Sum of counts, failing on overflow instead of wrapping
pub fn checked_total<I>(counts: I, field: &str) -> Result<u64>
where
    I: IntoIterator<Item = u64>,
{
    counts
        .into_iter()
        .try_fold(0u64, u64::checked_add)
        .ok_or_else(|| AuditError::data_format(field, "a total within 64 bits", "an overflowing sum"))
}

/// Element-wise sum of count mappings
///
/// The result holds the union of all keys, ordered by first appearance.
/// Null counts contribute zero. Fails with the offending key when a sum
/// overflows.
pub fn sum_counts<'a, I>(maps: I) -> Result<CountMap>
where
    I: IntoIterator<Item = &'a CountMap>,
{
    let maps: Vec<&CountMap> = maps.into_iter().collect();

    maps.iter()
        .flat_map(|m| m.keys())
        .unique()
        .map(|key| {
            let total = checked_total(maps.iter().map(|m| m.count(key)), key)?;
            Ok((key, Some(total)))
        })
        .collect()
}

/// Weighted mean of two values rounded to 3 decimals
///
/// Returns `None` when the combined weight is zero.
#[must_use]
pub fn weighted_mean(v1: f64, n1: u64, v2: f64, n2: u64) -> Option<f64> {
    if n1 == 0 && n2 == 0 {
        return None;
    }
    let (w1, w2) = (n1 as f64, n2 as f64);
    let mean = (v1 * w1 + v2 * w2) / (w1 + w2);
    Some(round_to(mean, 3))
}

/// Share of `total` per key as a percentage rounded to 2 decimals
///
/// Every percentage is zero when `total` is zero.
#[must_use]
pub fn percentages(counts: &CountMap, total: u64) -> PercentMap {
    counts
        .iter()
        .map(|(key, count)| {
            let pct = if total == 0 {
                0.0
            } else {
                round_to(coalesce(*count) as f64 / total as f64 * 100.0, 2)
            };
            (key, pct)
        })
        .collect()
}

/// Fraction of `total` with a reported value, rounded to 3 decimals
///
/// Keys in `exclude_keys` do not count as reported. Zero when `total` is zero.
#[must_use]
pub fn completeness(counts: &CountMap, total: u64, exclude_keys: &[&str]) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let reported: u64 = counts
        .reported()
        .filter(|(key, _)| !exclude_keys.contains(key))
        .map(|(_, count)| count)
        .fold(0, u64::saturating_add);
    round_to(reported as f64 / total as f64, 3)
}
