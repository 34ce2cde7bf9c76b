//! Markdown and JSON portfolio report generation.
//!
//! Each chart of the portfolio dashboard becomes a report section:
//! KPI totals, highlight lists, value by vertical, completion status
//! distribution, vertical maturity profiles, tier health, and the test
//! density leaderboard.

use crate::analysis::filter::FilterConstraints;
use crate::analysis::grouping::GroupAggregate;
use crate::analysis::normalize::NormalizedProfile;
use crate::analysis::ranking::{bottom_n, display_density, top_n, DENSITY_SIZE_FLOOR};
use crate::analysis::{
    aggregate, filter_records, group_by_status, group_by_tier, group_by_vertical, normalize,
    PortfolioTotals,
};
use crate::catalog::Catalog;
use crate::models::{PackageRecord, RoadmapItem};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the catalog file.
    pub catalog_path: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Total number of packages in the catalog.
    pub total_packages: usize,
    /// Number of packages matching the active constraints.
    pub selected_packages: usize,
    /// Whether any filter narrowed the selection.
    pub filters_active: bool,
}

/// One row of the density leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityEntry {
    pub name: String,
    /// Tests per 1000 LOC, one decimal place.
    pub density: f64,
    pub loc: u64,
}

/// One row of a dashboard highlight list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightEntry {
    pub name: String,
    pub category: String,
    /// The metric the list is ranked by (value or ROI).
    pub metric: f64,
}

/// The complete portfolio report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub metadata: ReportMetadata,
    pub totals: PortfolioTotals,
    /// Top packages by stored value.
    pub most_valuable: Vec<HighlightEntry>,
    /// Top packages by stored ROI.
    pub highest_roi: Vec<HighlightEntry>,
    /// Vertical aggregates, descending by total value.
    pub value_by_vertical: Vec<GroupAggregate>,
    /// Completion status buckets.
    pub status_distribution: Vec<GroupAggregate>,
    /// Normalized maturity profiles per vertical.
    pub vertical_profiles: Vec<NormalizedProfile>,
    /// Tier aggregates in fixed tier order.
    pub tier_health: Vec<GroupAggregate>,
    /// Top packages by test density.
    pub density_leaders: Vec<DensityEntry>,
    /// Bottom packages by test density (size floor applied).
    pub density_laggards: Vec<DensityEntry>,
    /// Selected records when filters are active (empty otherwise).
    pub selection: Vec<PackageRecord>,
    /// Roadmap items, ordered by term.
    pub roadmap: Vec<RoadmapItem>,
}

/// Number of rows on each side of the density leaderboard.
const LEADERBOARD_SIZE: usize = 5;

/// Number of rows per highlight list.
const HIGHLIGHT_SIZE: usize = 5;

/// Build the full report over the catalog and active constraints.
///
/// Every section is recomputed from the selection on each call; nothing
/// is cached between runs.
pub fn build_report(
    catalog: &Catalog,
    catalog_path: &str,
    constraints: &FilterConstraints,
) -> PortfolioReport {
    let selection = filter_records(catalog.packages(), constraints);
    let records: &[PackageRecord] = &selection;

    let mut value_by_vertical = group_by_vertical(records);
    value_by_vertical.sort_by(|a, b| {
        b.sum_value
            .partial_cmp(&a.sum_value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let vertical_profiles = normalize(&group_by_vertical(records));

    let most_valuable =
        to_highlight_entries(top_n(records, |pkg| Some(pkg.value), HIGHLIGHT_SIZE));
    let highest_roi = to_highlight_entries(top_n(records, |pkg| Some(pkg.roi), HIGHLIGHT_SIZE));

    let density_leaders = to_density_entries(top_n(records, display_density, LEADERBOARD_SIZE));
    let density_laggards = to_density_entries(bottom_n(
        records,
        display_density,
        LEADERBOARD_SIZE,
        DENSITY_SIZE_FLOOR,
    ));

    let mut roadmap = catalog.roadmap().to_vec();
    roadmap.sort_by_key(|item| item.term);

    let filters_active = constraints.is_active();

    PortfolioReport {
        metadata: ReportMetadata {
            catalog_path: catalog_path.to_string(),
            generated_at: Utc::now(),
            total_packages: catalog.len(),
            selected_packages: selection.len(),
            filters_active,
        },
        totals: aggregate(records),
        most_valuable,
        highest_roi,
        value_by_vertical,
        status_distribution: group_by_status(records),
        vertical_profiles,
        tier_health: group_by_tier(records),
        density_leaders,
        density_laggards,
        selection: if filters_active { selection } else { Vec::new() },
        roadmap,
    }
}

fn to_highlight_entries(ranked: Vec<crate::analysis::RankedRecord>) -> Vec<HighlightEntry> {
    ranked
        .into_iter()
        .map(|entry| HighlightEntry {
            name: entry.record.name.clone(),
            category: entry.record.category.clone(),
            metric: entry.metric,
        })
        .collect()
}

fn to_density_entries(ranked: Vec<crate::analysis::RankedRecord>) -> Vec<DensityEntry> {
    ranked
        .into_iter()
        .map(|entry| DensityEntry {
            name: entry.record.name.clone(),
            density: entry.metric,
            loc: entry.record.loc,
        })
        .collect()
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &PortfolioReport) -> String {
    let mut output = String::new();

    output.push_str("# Portfolio Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_totals_section(&report.totals));
    output.push_str(&generate_highlights_section(
        &report.most_valuable,
        &report.highest_roi,
    ));
    output.push_str(&generate_vertical_section(&report.value_by_vertical));
    output.push_str(&generate_status_section(&report.status_distribution));
    output.push_str(&generate_profiles_section(&report.vertical_profiles));
    output.push_str(&generate_tier_section(&report.tier_health));
    output.push_str(&generate_density_section(
        &report.density_leaders,
        &report.density_laggards,
    ));
    output.push_str(&generate_selection_section(&report.selection));
    output.push_str(&generate_roadmap_section(&report.roadmap));
    output.push_str(&generate_footer());

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &PortfolioReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Catalog:** {}\n", metadata.catalog_path));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if metadata.filters_active {
        section.push_str(&format!(
            "- **Selection:** {} of {} packages (filters active)\n",
            metadata.selected_packages, metadata.total_packages
        ));
    } else {
        section.push_str(&format!("- **Packages:** {}\n", metadata.total_packages));
    }
    section.push('\n');

    section
}

fn generate_totals_section(totals: &PortfolioTotals) -> String {
    let mut section = String::new();

    section.push_str("## Portfolio Totals\n\n");
    section.push_str("| Packages | Total LOC | Total Value | Avg Completion | Ready |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | ${:.0} | {:.0}% | {}/{} |\n\n",
        totals.count,
        totals.total_loc,
        totals.total_value,
        totals.avg_completion,
        totals.ready_count,
        totals.count
    ));

    section
}

fn generate_highlights_section(
    most_valuable: &[HighlightEntry],
    highest_roi: &[HighlightEntry],
) -> String {
    if most_valuable.is_empty() && highest_roi.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Highlights\n\n");

    if !most_valuable.is_empty() {
        section.push_str("### Most Valuable Packages\n\n");
        section.push_str("| Package | Vertical | Value |\n");
        section.push_str("|:---|:---|:---:|\n");
        for entry in most_valuable {
            section.push_str(&format!(
                "| {} | {} | ${:.0} |\n",
                entry.name, entry.category, entry.metric
            ));
        }
        section.push('\n');
    }

    if !highest_roi.is_empty() {
        section.push_str("### Highest ROI\n\n");
        section.push_str("| Package | Vertical | ROI |\n");
        section.push_str("|:---|:---|:---:|\n");
        for entry in highest_roi {
            section.push_str(&format!(
                "| {} | {} | {:.0}% |\n",
                entry.name, entry.category, entry.metric
            ));
        }
        section.push('\n');
    }

    section
}

fn generate_vertical_section(groups: &[GroupAggregate]) -> String {
    if groups.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Value by Vertical\n\n");
    section.push_str("| Vertical | Packages | Total Value | Avg Completion |\n");
    section.push_str("|:---|:---:|:---:|:---:|\n");

    for group in groups {
        section.push_str(&format!(
            "| {} | {} | ${:.0} | {:.0}% |\n",
            group.key, group.count, group.sum_value, group.avg_completion
        ));
    }
    section.push('\n');

    section
}

fn generate_status_section(groups: &[GroupAggregate]) -> String {
    if groups.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Completion Status\n\n");
    section.push_str("| Status | Packages |\n");
    section.push_str("|:---|:---:|\n");

    for group in groups {
        section.push_str(&format!("| {} | {} |\n", group.key, group.count));
    }
    section.push('\n');

    section
}

fn generate_profiles_section(profiles: &[NormalizedProfile]) -> String {
    if profiles.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Vertical Maturity Profiles\n\n");
    section.push_str("All axes normalized to [0, 100].\n\n");
    section.push_str("| Vertical | Completion | Test Density | Value |\n");
    section.push_str("|:---|:---:|:---:|:---:|\n");

    for profile in profiles {
        section.push_str(&format!(
            "| {} | {:.1} | {:.1} | {:.1} |\n",
            profile.subject,
            profile.axis("completion").unwrap_or(0.0),
            profile.axis("testDensity").unwrap_or(0.0),
            profile.axis("value").unwrap_or(0.0)
        ));
    }
    section.push('\n');

    section
}

fn generate_tier_section(groups: &[GroupAggregate]) -> String {
    if groups.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Architectural Tier Health\n\n");
    section.push_str("| Tier | Packages | Avg Completion | Avg Doc Ratio |\n");
    section.push_str("|:---|:---:|:---:|:---:|\n");

    for group in groups {
        section.push_str(&format!(
            "| {} | {} | {:.0}% | {:.2} |\n",
            group.key, group.count, group.avg_completion, group.avg_doc_ratio
        ));
    }
    section.push('\n');

    section
}

fn generate_density_section(leaders: &[DensityEntry], laggards: &[DensityEntry]) -> String {
    if leaders.is_empty() && laggards.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Test Density Leaderboard\n\n");
    section.push_str("Tests per 1,000 lines of code.\n\n");

    if !leaders.is_empty() {
        section.push_str("### Leaders\n\n");
        section.push_str("| Package | Density | LOC |\n");
        section.push_str("|:---|:---:|:---:|\n");
        for entry in leaders {
            section.push_str(&format!(
                "| {} | {:.1} | {} |\n",
                entry.name, entry.density, entry.loc
            ));
        }
        section.push('\n');
    }

    if !laggards.is_empty() {
        section.push_str(&format!(
            "### Needs Improvement (> {} LOC)\n\n",
            DENSITY_SIZE_FLOOR
        ));
        section.push_str("| Package | Density | LOC |\n");
        section.push_str("|:---|:---:|:---:|\n");
        for entry in laggards {
            section.push_str(&format!(
                "| {} | {:.1} | {} |\n",
                entry.name, entry.density, entry.loc
            ));
        }
        section.push('\n');
    }

    section
}

fn generate_selection_section(selection: &[PackageRecord]) -> String {
    if selection.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Matching Packages\n\n");
    section.push_str("| Package | Vertical | Criticality | Complete | Value |\n");
    section.push_str("|:---|:---|:---:|:---:|:---:|\n");

    for pkg in selection {
        section.push_str(&format!(
            "| {} | {} | {} | {}% | ${:.0} |\n",
            pkg.name, pkg.category, pkg.criticality, pkg.percent_complete, pkg.value
        ));
    }
    section.push('\n');

    section
}

fn generate_roadmap_section(roadmap: &[RoadmapItem]) -> String {
    if roadmap.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Roadmap\n\n");

    for item in roadmap {
        section.push_str(&format!("### {} ({})\n\n", item.title, item.term));
        section.push_str(&format!("- **Impact:** {}\n", item.impact));
        section.push_str(&format!("- **Value at stake:** ${:.0}\n", item.value_impact));
        section.push_str(&format!("- **Action:** {}\n", item.action));
        if !item.packages.is_empty() {
            section.push_str(&format!("- **Packages:** {}\n", item.packages.join(", ")));
        }
        section.push('\n');
    }

    section
}

fn generate_footer() -> String {
    "---\n\n*Report generated by nexusboard*\n".to_string()
}
