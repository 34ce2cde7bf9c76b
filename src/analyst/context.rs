//! Context composition for the AI analyst.
//!
//! This module serializes selected aggregates, group summaries, and
//! ranked examples into a bounded textual digest used as grounding
//! context for the external model. It is pure and deterministic, and it
//! never serializes the full catalog: only summaries plus a fixed small
//! sample, so the payload stays bounded regardless of catalog size.

use crate::analysis::grouping::GroupAggregate;
use crate::analysis::normalize::NormalizedProfile;
use crate::analysis::ranking::{bottom_n, display_density, top_n, DENSITY_SIZE_FLOOR};
use crate::analysis::PortfolioTotals;
use crate::models::PackageRecord;
use serde::Serialize;

/// Number of cost-efficiency sample points included in the digest.
pub const COST_SAMPLE_SIZE: usize = 5;

/// Compact record projection used inside the digest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageDigest {
    name: String,
    vertical: String,
    percent_complete: u32,
    value: f64,
    dev_cost: f64,
    roi: f64,
}

impl From<&PackageRecord> for PackageDigest {
    fn from(pkg: &PackageRecord) -> Self {
        Self {
            name: pkg.name.clone(),
            vertical: pkg.category.clone(),
            percent_complete: pkg.percent_complete,
            value: pkg.value,
            dev_cost: pkg.dev_cost,
            roi: pkg.roi,
        }
    }
}

/// Fixed example records surfaced to the analyst.
#[derive(Debug, Clone, Serialize)]
struct KeyExamples {
    #[serde(skip_serializing_if = "Option::is_none")]
    most_expensive: Option<PackageDigest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    highest_roi: Option<PackageDigest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lowest_test_density: Option<PackageDigest>,
}

/// Compose the bounded analyst context from engine outputs.
///
/// `records` is only sampled for the fixed examples and the first
/// `COST_SAMPLE_SIZE` cost points; everything else comes in already
/// reduced.
pub fn compose(
    totals: &PortfolioTotals,
    vertical_profiles: &[NormalizedProfile],
    tier_groups: &[GroupAggregate],
    records: &[PackageRecord],
) -> String {
    let cost_sample: Vec<PackageDigest> = records
        .iter()
        .take(COST_SAMPLE_SIZE)
        .map(PackageDigest::from)
        .collect();

    let examples = KeyExamples {
        most_expensive: top_n(records, |pkg| Some(pkg.dev_cost), 1)
            .first()
            .map(|r| PackageDigest::from(&r.record)),
        highest_roi: top_n(records, |pkg| Some(pkg.roi), 1)
            .first()
            .map(|r| PackageDigest::from(&r.record)),
        lowest_test_density: bottom_n(records, display_density, 1, DENSITY_SIZE_FLOOR)
            .first()
            .map(|r| PackageDigest::from(&r.record)),
    };

    let mut context = String::new();

    context.push_str("Dataset Summary:\n");
    context.push_str(&format!("- Total Packages: {}\n", totals.count));
    context.push_str(&format!("- Total LOC: {}\n", totals.total_loc));
    context.push_str(&format!("- Total Value: {:.0}\n", totals.total_value));
    context.push_str(&format!(
        "- Average Completion: {:.1}% ({} production ready)\n",
        totals.avg_completion, totals.ready_count
    ));
    context.push_str(&format!(
        "- Vertical Performance: {}\n",
        to_json(vertical_profiles)
    ));
    context.push_str(&format!(
        "- Cost Efficiency Data (Sample): {}\n",
        to_json(&cost_sample)
    ));
    context.push_str(&format!("- Tier Maturity: {}\n", to_json(tier_groups)));
    context.push_str("\nKey Insights:\n");
    context.push_str(&format!("- {}\n", to_json(&examples)));

    context
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{aggregate, group_by_tier, group_by_vertical, normalize};
    use crate::models::tests::record;

    fn sample(n: usize) -> Vec<PackageRecord> {
        (0..n)
            .map(|i| {
                let mut pkg = record(&i.to_string());
                pkg.dev_cost = 1000.0 * i as f64;
                pkg.roi = 100.0 * i as f64;
                pkg
            })
            .collect()
    }

    fn compose_for(records: &[PackageRecord]) -> String {
        let totals = aggregate(records);
        let profiles = normalize(&group_by_vertical(records));
        let tiers = group_by_tier(records);
        compose(&totals, &profiles, &tiers, records)
    }

    #[test]
    fn test_context_contains_summary_sections() {
        let context = compose_for(&sample(8));

        assert!(context.contains("Total Packages: 8"));
        assert!(context.contains("Vertical Performance:"));
        assert!(context.contains("Cost Efficiency Data (Sample):"));
        assert!(context.contains("Tier Maturity:"));
        assert!(context.contains("Key Insights:"));
    }

    #[test]
    fn test_context_is_deterministic() {
        let records = sample(12);
        assert_eq!(compose_for(&records), compose_for(&records));
    }

    #[test]
    fn test_context_stays_bounded_as_catalog_grows() {
        let small = compose_for(&sample(10)).len();
        let large = compose_for(&sample(500)).len();

        // Summaries grow with group count, never with record count;
        // identical-category catalogs of any size digest to similar sizes.
        assert!(large < small * 3, "digest grew unbounded: {} vs {}", small, large);
    }

    #[test]
    fn test_context_over_empty_catalog() {
        let context = compose_for(&[]);
        assert!(context.contains("Total Packages: 0"));
    }

    #[test]
    fn test_examples_pick_extremes() {
        let context = compose_for(&sample(5));

        // Record "4" has both the highest dev cost and highest ROI.
        assert!(context.contains("Nexus\\Pkg4"));
    }
}
