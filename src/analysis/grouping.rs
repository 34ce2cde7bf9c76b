//! Grouping and classification of package records.
//!
//! This module partitions a record collection by a key function and
//! reduces each partition to a `GroupAggregate`. Group order is the
//! first-seen order of keys, which downstream chart projections treat
//! as the axis order, so a plain `Vec` is used instead of a hash map.

use crate::models::PackageRecord;
use serde::{Deserialize, Serialize};

/// The fixed architectural tier table, in evaluation order.
///
/// The free-text `nature` label is matched by substring containment
/// against each row in this order, first match wins. This fuzzy policy
/// is deliberate: `nature` values are not normalized at the source.
pub const TIERS: [&str; 4] = ["Architectural", "Tier 1", "Tier 2", "Tier 3"];

/// Reduced metrics for one partition of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAggregate {
    /// Partition key (vertical, tier, or status label).
    pub key: String,
    /// Number of member records.
    pub count: usize,
    /// Sum of member value.
    pub sum_value: f64,
    /// Mean completion percentage of members.
    pub avg_completion: f64,
    /// Mean authored doc:code ratio of members.
    pub avg_doc_ratio: f64,
    /// Mean tests-per-1000-LOC over members with `loc > 0`.
    ///
    /// Members with `loc == 0` have undefined density; they are
    /// excluded from this mean but still counted in `count` and
    /// `sum_value`. Zero when no member has a defined density.
    pub avg_test_density: f64,
}

/// Partition records by a key function and reduce each partition.
///
/// Records for which the key function returns `None` are excluded from
/// the result (e.g., a `nature` label that matches no tier). Groups
/// appear in first-seen key order; zero-member groups cannot occur.
pub fn group_records<F>(records: &[PackageRecord], key_fn: F) -> Vec<GroupAggregate>
where
    F: Fn(&PackageRecord) -> Option<String>,
{
    let mut keys: Vec<String> = Vec::new();
    let mut members: Vec<Vec<&PackageRecord>> = Vec::new();

    for pkg in records {
        let Some(key) = key_fn(pkg) else {
            continue;
        };

        match keys.iter().position(|k| *k == key) {
            Some(index) => members[index].push(pkg),
            None => {
                keys.push(key);
                members.push(vec![pkg]);
            }
        }
    }

    keys.into_iter()
        .zip(members)
        .map(|(key, group)| reduce_group(key, &group))
        .collect()
}

/// Group by business vertical. Total: every record has a category.
pub fn group_by_vertical(records: &[PackageRecord]) -> Vec<GroupAggregate> {
    group_records(records, |pkg| Some(pkg.category.clone()))
}

/// Group by architectural tier, in the fixed `TIERS` order.
///
/// Records whose `nature` matches no tier row are omitted entirely,
/// mirroring the tier chart where such packages appear in no bar.
pub fn group_by_tier(records: &[PackageRecord]) -> Vec<GroupAggregate> {
    TIERS
        .iter()
        .filter_map(|tier| {
            let members: Vec<&PackageRecord> = records
                .iter()
                .filter(|pkg| tier_of(pkg) == Some(*tier))
                .collect();

            if members.is_empty() {
                None
            } else {
                Some(reduce_group(tier.to_string(), &members))
            }
        })
        .collect()
}

/// Group by completion status bucket, in first-seen order.
pub fn group_by_status(records: &[PackageRecord]) -> Vec<GroupAggregate> {
    group_records(records, |pkg| Some(pkg.completion_status().to_string()))
}

/// Classify a record's free-text `nature` into a tier.
///
/// Rows of `TIERS` are tried in order; the first row contained in the
/// label wins. Returns `None` for labels matching no row.
pub fn tier_of(pkg: &PackageRecord) -> Option<&'static str> {
    TIERS.iter().find(|tier| pkg.nature.contains(**tier)).copied()
}

fn reduce_group(key: String, members: &[&PackageRecord]) -> GroupAggregate {
    let count = members.len();
    let sum_value: f64 = members.iter().map(|pkg| pkg.value).sum();

    let avg_completion = members
        .iter()
        .map(|pkg| pkg.percent_complete as f64)
        .sum::<f64>()
        / count as f64;

    let avg_doc_ratio = members.iter().map(|pkg| pkg.doc_code_ratio).sum::<f64>() / count as f64;

    // Density mean only over members where it is defined.
    let densities: Vec<f64> = members.iter().filter_map(|pkg| pkg.test_density()).collect();
    let avg_test_density = if densities.is_empty() {
        0.0
    } else {
        densities.iter().sum::<f64>() / densities.len() as f64
    };

    GroupAggregate {
        key,
        count,
        sum_value,
        avg_completion,
        avg_doc_ratio,
        avg_test_density,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::record;

    #[test]
    fn test_group_by_vertical_first_seen_order() {
        let mut a = record("1");
        a.category = "Finance".to_string();
        let mut b = record("2");
        b.category = "Security".to_string();
        let mut c = record("3");
        c.category = "Finance".to_string();

        let groups = group_by_vertical(&[a, b, c]);

        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Finance", "Security"]);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[1].count, 1);
    }

    #[test]
    fn test_group_reduction_values() {
        let mut a = record("1");
        a.category = "Finance".to_string();
        a.percent_complete = 80;
        a.value = 10_000.0;
        a.doc_code_ratio = 0.5;

        let mut b = record("2");
        b.category = "Finance".to_string();
        b.percent_complete = 100;
        b.value = 20_000.0;
        b.doc_code_ratio = 1.5;

        let groups = group_by_vertical(&[a, b]);

        assert_eq!(groups.len(), 1);
        let finance = &groups[0];
        assert_eq!(finance.key, "Finance");
        assert_eq!(finance.count, 2);
        assert_eq!(finance.sum_value, 30_000.0);
        assert_eq!(finance.avg_completion, 90.0);
        // Mean of the stored ratios, never recomputed from doc_lines/loc.
        assert_eq!(finance.avg_doc_ratio, 1.0);
    }

    #[test]
    fn test_zero_loc_excluded_from_density_only() {
        let mut a = record("1");
        a.loc = 1000;
        a.tests = 50;
        a.value = 5_000.0;

        let mut b = record("2");
        b.loc = 0;
        b.tests = 10;
        b.value = 7_000.0;

        let groups = group_by_vertical(&[a, b]);

        // Both members count toward count/sum_value...
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].sum_value, 12_000.0);
        // ...but only the loc > 0 member feeds the density mean.
        assert_eq!(groups[0].avg_test_density, 50.0);
    }

    #[test]
    fn test_all_zero_loc_group_has_zero_density() {
        let mut a = record("1");
        a.loc = 0;

        let groups = group_by_vertical(&[a]);
        assert_eq!(groups[0].avg_test_density, 0.0);
        assert!(!groups[0].avg_test_density.is_nan());
    }

    #[test]
    fn test_grouping_completeness() {
        let records: Vec<_> = (0..7)
            .map(|i| {
                let mut pkg = record(&i.to_string());
                pkg.category = if i % 2 == 0 { "A" } else { "B" }.to_string();
                pkg
            })
            .collect();

        let groups = group_by_vertical(&records);
        let total: usize = groups.iter().map(|g| g.count).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_tier_classifier_first_match_wins() {
        let mut pkg = record("1");

        pkg.nature = "Architectural".to_string();
        assert_eq!(tier_of(&pkg), Some("Architectural"));

        pkg.nature = "Tier 1".to_string();
        assert_eq!(tier_of(&pkg), Some("Tier 1"));

        // Substring containment, not equality.
        pkg.nature = "Core Tier 2 service".to_string();
        assert_eq!(tier_of(&pkg), Some("Tier 2"));

        pkg.nature = "Experimental".to_string();
        assert_eq!(tier_of(&pkg), None);
    }

    #[test]
    fn test_group_by_tier_fixed_order_and_omits_empty() {
        let mut a = record("1");
        a.nature = "Tier 3".to_string();
        let mut b = record("2");
        b.nature = "Architectural".to_string();
        let mut c = record("3");
        c.nature = "Unclassified".to_string();

        let groups = group_by_tier(&[a, b, c]);

        // Fixed enumeration order, not first-seen; empty tiers omitted,
        // unmatched records dropped.
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Architectural", "Tier 3"]);
        let total: usize = groups.iter().map(|g| g.count).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_group_by_status() {
        let mut a = record("1");
        a.percent_complete = 100;
        let mut b = record("2");
        b.percent_complete = 60;
        let mut c = record("3");
        c.percent_complete = 20;

        let groups = group_by_status(&[a, b, c]);
        assert_eq!(groups.len(), 3);
        let total: usize = groups.iter().map(|g| g.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_by_vertical(&[]).is_empty());
        assert!(group_by_tier(&[]).is_empty());
    }
}
