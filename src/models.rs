//! Data models for the portfolio catalog.
//!
//! This module contains the core data structures used throughout the
//! application for representing package records, roadmap items, and
//! classification labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Business criticality of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Criticality {
    /// High criticality - core infrastructure, outage-level impact
    High,
    /// Medium criticality - important business features
    Medium,
    /// Low criticality - supporting or optional features
    Low,
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criticality::High => write!(f, "High"),
            Criticality::Medium => write!(f, "Medium"),
            Criticality::Low => write!(f, "Low"),
        }
    }
}

/// Completion status bucket derived from `percent_complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionStatus {
    /// 100% complete
    Ready,
    /// 50-99% complete
    InProgress,
    /// Below 50% complete
    Early,
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionStatus::Ready => write!(f, "Production Ready"),
            CompletionStatus::InProgress => write!(f, "In Progress (>50%)"),
            CompletionStatus::Early => write!(f, "Early Stage (<50%)"),
        }
    }
}

/// A single catalog record describing one software package.
///
/// Records are immutable after catalog load. `doc_code_ratio` and `roi`
/// are authored independently of the raw fields they approximate; they
/// must be read as stored data, never recomputed from `doc_lines`/`loc`
/// or `value`/`dev_cost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    /// Opaque stable identifier, unique within the catalog.
    pub id: String,
    /// Package name (e.g., `Nexus\Finance`).
    pub name: String,
    /// Short free-text description.
    pub description: String,
    /// Completion percentage in [0, 100].
    pub percent_complete: u32,
    /// Lines of code.
    pub loc: u64,
    /// Lines of documentation.
    pub doc_lines: u64,
    /// Authored documentation-to-code ratio.
    pub doc_code_ratio: f64,
    /// Number of tracked requirements.
    pub reqs: u64,
    /// Number of tests.
    pub tests: u64,
    /// Estimated package value (monetary units).
    pub value: f64,
    /// Development cost to date (same currency as `value`).
    pub dev_cost: f64,
    /// Authored return-on-investment percentage (may be negative).
    pub roi: f64,
    /// Business vertical (open string set, e.g., "Finance").
    pub category: String,
    /// Business criticality.
    pub criticality: Criticality,
    /// Free-text architectural classification label (e.g., "Tier 1").
    pub nature: String,
}

impl PackageRecord {
    /// Tests per thousand lines of code.
    ///
    /// Returns `None` when `loc == 0`: the density is undefined and the
    /// record must be excluded from density means and density rankings.
    pub fn test_density(&self) -> Option<f64> {
        if self.loc == 0 {
            None
        } else {
            Some((self.tests as f64 / self.loc as f64) * 1000.0)
        }
    }

    /// Completion status bucket for the status distribution chart.
    pub fn completion_status(&self) -> CompletionStatus {
        if self.percent_complete == 100 {
            CompletionStatus::Ready
        } else if self.percent_complete >= 50 {
            CompletionStatus::InProgress
        } else {
            CompletionStatus::Early
        }
    }
}

/// Delivery horizon of a roadmap item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Immediate,
    #[serde(rename = "Medium-Term")]
    MediumTerm,
    #[serde(rename = "Long-Term")]
    LongTerm,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Immediate => write!(f, "Immediate"),
            Term::MediumTerm => write!(f, "Medium-Term"),
            Term::LongTerm => write!(f, "Long-Term"),
        }
    }
}

/// A planned work item attached to one or more packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapItem {
    /// Stable identifier.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Delivery horizon.
    pub term: Term,
    /// What the item unblocks or protects.
    pub impact: String,
    /// Monetary value affected by the item.
    pub value_impact: f64,
    /// Concrete action to take.
    pub action: String,
    /// Names of the packages the item covers.
    pub packages: Vec<String>,
}
