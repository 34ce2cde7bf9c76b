//! Profile normalization for multi-axis comparison.
//!
//! Group metrics live on wildly different scales (percentages, density
//! per 1000 LOC, raw currency sums). This module maps them onto a
//! common bounded [0, 100] scale using fixed scale-and-clamp constants,
//! so axes stay comparable across repeated queries without recomputing
//! global min/max. Large outliers saturate at the ceiling rather than
//! stretching the scale.

use crate::analysis::grouping::GroupAggregate;
use serde::{Deserialize, Serialize};

/// Common ceiling for every normalized axis.
pub const AXIS_CEILING: f64 = 100.0;

/// Linear scale factor applied to the test density axis.
pub const DENSITY_SCALE: f64 = 2.0;

/// Divisor applied to the value axis.
pub const VALUE_SCALE: f64 = 10_000.0;

/// One axis of a normalized profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAxis {
    /// Axis label.
    pub name: String,
    /// Normalized value within [0, 100].
    pub value: f64,
}

/// A chart-ready multi-axis profile for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProfile {
    /// Group key (e.g., the vertical name).
    pub subject: String,
    /// Axes in fixed order: completion, test density, value.
    pub axes: Vec<ProfileAxis>,
}

impl NormalizedProfile {
    /// Look up an axis value by name.
    pub fn axis(&self, name: &str) -> Option<f64> {
        self.axes.iter().find(|a| a.name == name).map(|a| a.value)
    }
}

/// Normalize a sequence of group aggregates into bounded profiles.
///
/// - `completion` passes through (already a 0-100 percentage).
/// - `testDensity` is `min(avg * 2, 100)`.
/// - `value` is `min(sum / 10_000, 100)`.
pub fn normalize(groups: &[GroupAggregate]) -> Vec<NormalizedProfile> {
    groups
        .iter()
        .map(|group| NormalizedProfile {
            subject: group.key.clone(),
            axes: vec![
                ProfileAxis {
                    name: "completion".to_string(),
                    value: group.avg_completion,
                },
                ProfileAxis {
                    name: "testDensity".to_string(),
                    value: (group.avg_test_density * DENSITY_SCALE).min(AXIS_CEILING),
                },
                ProfileAxis {
                    name: "value".to_string(),
                    value: (group.sum_value / VALUE_SCALE).min(AXIS_CEILING),
                },
            ],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(key: &str, avg_completion: f64, avg_test_density: f64, sum_value: f64) -> GroupAggregate {
        GroupAggregate {
            key: key.to_string(),
            count: 1,
            sum_value,
            avg_completion,
            avg_doc_ratio: 0.8,
            avg_test_density,
        }
    }

    #[test]
    fn test_completion_passes_through() {
        let profiles = normalize(&[group("Infra", 87.5, 0.0, 0.0)]);
        assert_eq!(profiles[0].axis("completion"), Some(87.5));
    }

    #[test]
    fn test_density_scaled_and_clamped() {
        let profiles = normalize(&[group("A", 0.0, 30.0, 0.0), group("B", 0.0, 80.0, 0.0)]);

        assert_eq!(profiles[0].axis("testDensity"), Some(60.0));
        // 80 * 2 saturates at the ceiling.
        assert_eq!(profiles[1].axis("testDensity"), Some(100.0));
    }

    #[test]
    fn test_value_scaled_and_clamped() {
        let profiles = normalize(&[
            group("A", 0.0, 0.0, 250_000.0),
            group("B", 0.0, 0.0, 5_000_000.0),
        ]);

        assert_eq!(profiles[0].axis("value"), Some(25.0));
        assert_eq!(profiles[1].axis("value"), Some(100.0));
    }

    #[test]
    fn test_all_axes_bounded() {
        let groups = vec![
            group("A", 100.0, 500.0, 9_999_999.0),
            group("B", 0.0, 0.0, 0.0),
            group("C", 55.0, 49.9, 123_456.0),
        ];

        for profile in normalize(&groups) {
            for axis in &profile.axes {
                assert!(
                    (0.0..=100.0).contains(&axis.value),
                    "axis {} of {} out of bounds: {}",
                    axis.name,
                    profile.subject,
                    axis.value
                );
            }
        }
    }

    #[test]
    fn test_subject_and_order_preserved() {
        let profiles = normalize(&[group("First", 1.0, 1.0, 1.0), group("Second", 2.0, 2.0, 2.0)]);
        let subjects: Vec<_> = profiles.iter().map(|p| p.subject.as_str()).collect();
        assert_eq!(subjects, vec!["First", "Second"]);
    }
}
