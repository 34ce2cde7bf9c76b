//! Ranking and top/bottom selection.
//!
//! This module orders records by an arbitrary metric and extracts
//! top-N / bottom-N slices. Bottom rankings support a size floor so
//! degenerate tiny packages cannot surface as false "worst performers".

use crate::models::PackageRecord;

/// Default LOC floor for bottom-N density rankings.
pub const DENSITY_SIZE_FLOOR: u64 = 500;

/// A ranked record together with its metric value.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRecord {
    pub record: PackageRecord,
    pub metric: f64,
}

/// Take the `n` highest records by `metric_fn`.
///
/// Records where the metric is undefined (`None`) are excluded.
/// The sort is stable and descending, so metric ties keep catalog order.
pub fn top_n<F>(records: &[PackageRecord], metric_fn: F, n: usize) -> Vec<RankedRecord>
where
    F: Fn(&PackageRecord) -> Option<f64>,
{
    let mut ranked = collect_defined(records, metric_fn);
    ranked.sort_by(|a, b| b.metric.partial_cmp(&a.metric).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked
}

/// Take the `n` lowest records by `metric_fn`, among records whose
/// `loc` exceeds `min_size_floor`.
///
/// The floor is applied before truncation: small records are removed
/// from the candidate set entirely, not merely pushed out of the slice.
pub fn bottom_n<F>(
    records: &[PackageRecord],
    metric_fn: F,
    n: usize,
    min_size_floor: u64,
) -> Vec<RankedRecord>
where
    F: Fn(&PackageRecord) -> Option<f64>,
{
    let mut ranked = collect_defined(records, metric_fn);
    ranked.retain(|entry| entry.record.loc > min_size_floor);
    ranked.sort_by(|a, b| a.metric.partial_cmp(&b.metric).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked
}

/// Display-ready test density: tests per 1000 LOC, one decimal place.
///
/// `None` for records with `loc == 0` (undefined density); such records
/// are excluded from density rankings entirely.
pub fn display_density(pkg: &PackageRecord) -> Option<f64> {
    pkg.test_density().map(|d| (d * 10.0).round() / 10.0)
}

fn collect_defined<F>(records: &[PackageRecord], metric_fn: F) -> Vec<RankedRecord>
where
    F: Fn(&PackageRecord) -> Option<f64>,
{
    records
        .iter()
        .filter_map(|pkg| {
            metric_fn(pkg).map(|metric| RankedRecord {
                record: pkg.clone(),
                metric,
            })
        })
        .collect()
}
