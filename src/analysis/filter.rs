//! Multi-predicate package filtering.
//!
//! This module implements the interactive constraint set of the package
//! explorer: text search, vertical, criticality, and a two-sided
//! completion range with clamped setters.

use crate::models::{Criticality, PackageRecord};

/// Minimum width the completion range may be narrowed to.
///
/// Every range update clamps the incoming bound so the interval never
/// collapses below this width (a slider-handle usability invariant).
pub const COMPLETION_RANGE_GAP: u32 = 10;

/// The full constraint set applied to the catalog.
///
/// The default constraints match everything: empty search, wildcard
/// vertical and criticality, completion range [0, 100].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConstraints {
    /// Case-insensitive substring matched against name and description.
    pub search: String,
    /// Selected vertical; `None` means "All".
    pub category: Option<String>,
    /// Selected criticality; `None` means "All".
    pub criticality: Option<Criticality>,
    min_complete: u32,
    max_complete: u32,
}

impl Default for FilterConstraints {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            criticality: None,
            min_complete: 0,
            max_complete: 100,
        }
    }
}

impl FilterConstraints {
    /// Current completion range as `(min, max)`.
    pub fn completion_range(&self) -> (u32, u32) {
        (self.min_complete, self.max_complete)
    }

    /// Update the lower completion bound.
    ///
    /// The value is clamped to [0, 100] and then to `max - GAP`, so the
    /// range keeps at least `COMPLETION_RANGE_GAP` of width.
    pub fn set_min_complete(&mut self, value: u32) {
        let value = value.min(100);
        self.min_complete = value.min(self.max_complete.saturating_sub(COMPLETION_RANGE_GAP));
    }

    /// Update the upper completion bound.
    ///
    /// The value is clamped to [0, 100] and then to `min + GAP`, so the
    /// range keeps at least `COMPLETION_RANGE_GAP` of width.
    pub fn set_max_complete(&mut self, value: u32) {
        let value = value.min(100);
        self.max_complete = value.max((self.min_complete + COMPLETION_RANGE_GAP).min(100));
    }

    /// Whether any constraint narrows the catalog.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.category.is_some()
            || self.criticality.is_some()
            || self.min_complete > 0
            || self.max_complete < 100
    }

    /// Whether a single record satisfies every constraint.
    pub fn matches(&self, pkg: &PackageRecord) -> bool {
        let matches_search = self.search.is_empty() || {
            let needle = self.search.to_lowercase();
            pkg.name.to_lowercase().contains(&needle)
                || pkg.description.to_lowercase().contains(&needle)
        };

        let matches_category = self
            .category
            .as_ref()
            .map_or(true, |category| pkg.category == *category);

        let matches_criticality = self
            .criticality
            .map_or(true, |criticality| pkg.criticality == criticality);

        let matches_completion = pkg.percent_complete >= self.min_complete
            && pkg.percent_complete <= self.max_complete;

        matches_search && matches_category && matches_criticality && matches_completion
    }
}

/// Apply the constraints to a record sequence.
///
/// Non-destructive and order-preserving: the result is a clone of the
/// matching subsequence in the input's order. An empty result is a
/// valid outcome, not an error.
pub fn filter_records(
    records: &[PackageRecord],
    constraints: &FilterConstraints,
) -> Vec<PackageRecord> {
    records
        .iter()
        .filter(|pkg| constraints.matches(pkg))
        .cloned()
        .collect()
}
