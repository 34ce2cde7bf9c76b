//! Scalar portfolio roll-ups.
//!
//! This module computes the whole-portfolio totals behind the KPI
//! cards: code mass, value, average completion, and readiness count.

use crate::models::PackageRecord;
use serde::{Deserialize, Serialize};

/// Scalar aggregates over a record collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Number of records aggregated.
    pub count: usize,
    /// Sum of lines of code.
    pub total_loc: u64,
    /// Sum of package value.
    pub total_value: f64,
    /// Mean completion percentage; 0 over an empty collection.
    pub avg_completion: f64,
    /// Number of records at 100% completion.
    pub ready_count: usize,
}

/// Compute totals over a record collection.
///
/// Total over every input: an empty collection yields the all-zero
/// totals (average 0, never NaN), so callers can render a zero-entity
/// state without special-casing.
pub fn aggregate(records: &[PackageRecord]) -> PortfolioTotals {
    let mut totals = PortfolioTotals::default();

    for pkg in records {
        totals.count += 1;
        totals.total_loc += pkg.loc;
        totals.total_value += pkg.value;
        totals.avg_completion += pkg.percent_complete as f64;
        if pkg.percent_complete == 100 {
            totals.ready_count += 1;
        }
    }

    if totals.count > 0 {
        totals.avg_completion /= totals.count as f64;
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::record;

    #[test]
    fn test_aggregate_empty_is_all_zero() {
        let totals = aggregate(&[]);

        assert_eq!(totals, PortfolioTotals::default());
        assert_eq!(totals.avg_completion, 0.0);
        assert!(!totals.avg_completion.is_nan());
    }

    #[test]
    fn test_aggregate_single_ready_package() {
        let mut pkg = record("1");
        pkg.percent_complete = 100;
        pkg.loc = 1000;
        pkg.tests = 50;
        pkg.value = 100_000.0;
        pkg.category = "Infra".to_string();

        let totals = aggregate(&[pkg]);

        assert_eq!(totals.count, 1);
        assert_eq!(totals.total_loc, 1000);
        assert_eq!(totals.total_value, 100_000.0);
        assert_eq!(totals.avg_completion, 100.0);
        assert_eq!(totals.ready_count, 1);
    }

    #[test]
    fn test_aggregate_averages_completion() {
        let mut a = record("1");
        a.percent_complete = 80;
        a.loc = 2000;
        a.value = 10_000.0;

        let mut b = record("2");
        b.percent_complete = 100;
        b.loc = 3000;
        b.value = 20_000.0;

        let totals = aggregate(&[a, b]);

        assert_eq!(totals.count, 2);
        assert_eq!(totals.total_loc, 5000);
        assert_eq!(totals.total_value, 30_000.0);
        assert_eq!(totals.avg_completion, 90.0);
        assert_eq!(totals.ready_count, 1);
    }
}
