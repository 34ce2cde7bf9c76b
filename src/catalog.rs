//! Catalog loading and validation.
//!
//! The catalog is the sole data source of the engine: an ordered,
//! immutable list of package records (plus optional roadmap items),
//! loaded once at startup from a JSON document and passed by reference
//! into every engine call. There is no ambient global catalog.

use crate::models::{PackageRecord, RoadmapItem};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Validation failure while loading a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("package at index {0} has an empty id")]
    EmptyId(usize),

    #[error("duplicate package id: {0}")]
    DuplicateId(String),

    #[error("package {id}: percentComplete is {value}, must be <= 100")]
    CompletionOutOfRange { id: String, value: u32 },
}

/// On-disk catalog document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogDocument {
    packages: Vec<PackageRecord>,
    #[serde(default)]
    roadmap: Vec<RoadmapItem>,
}

/// An immutable, validated catalog of package records.
///
/// Record order is the catalog order; every order-sensitive engine
/// operation (filtering, ranking tie-breaks, first-seen grouping) is
/// defined relative to it.
#[derive(Debug, Clone)]
pub struct Catalog {
    packages: Vec<PackageRecord>,
    roadmap: Vec<RoadmapItem>,
}

impl Catalog {
    /// Build a catalog from already-materialized records, validating them.
    pub fn new(
        packages: Vec<PackageRecord>,
        roadmap: Vec<RoadmapItem>,
    ) -> Result<Self, CatalogError> {
        validate(&packages)?;
        Ok(Self { packages, roadmap })
    }

    /// Load and validate a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        let document: CatalogDocument = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

        let catalog = Self::new(document.packages, document.roadmap)
            .with_context(|| format!("Invalid catalog: {}", path.display()))?;

        info!(
            "Loaded catalog with {} packages, {} roadmap items from {}",
            catalog.packages.len(),
            catalog.roadmap.len(),
            path.display()
        );

        Ok(catalog)
    }

    /// All package records, in catalog order.
    pub fn packages(&self) -> &[PackageRecord] {
        &self.packages
    }

    /// All roadmap items, in document order.
    pub fn roadmap(&self) -> &[RoadmapItem] {
        &self.roadmap
    }

    /// Number of packages in the catalog.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the catalog holds no packages.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Distinct verticals in first-seen catalog order.
    pub fn verticals(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut verticals = Vec::new();

        for pkg in &self.packages {
            if seen.insert(pkg.category.as_str()) {
                verticals.push(pkg.category.clone());
            }
        }

        verticals
    }
}

/// Check load-time invariants the engine relies on.
///
/// Only structural checks live here. The authored `docCodeRatio` and
/// `roi` fields are deliberately not cross-checked against the raw
/// fields they approximate.
fn validate(packages: &[PackageRecord]) -> Result<(), CatalogError> {
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for (index, pkg) in packages.iter().enumerate() {
        if pkg.id.is_empty() {
            return Err(CatalogError::EmptyId(index));
        }

        if !seen_ids.insert(&pkg.id) {
            return Err(CatalogError::DuplicateId(pkg.id.clone()));
        }

        if pkg.percent_complete > 100 {
            return Err(CatalogError::CompletionOutOfRange {
                id: pkg.id.clone(),
                value: pkg.percent_complete,
            });
        }

        debug!("Validated package {} ({})", pkg.id, pkg.name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::record;
    use std::io::Write;

    #[test]
    fn test_new_accepts_valid_records() {
        let catalog = Catalog::new(vec![record("1"), record("2")], vec![]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_new_accepts_empty_catalog() {
        let catalog = Catalog::new(vec![], vec![]).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.verticals().is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::new(vec![record("1"), record("1")], vec![]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = Catalog::new(vec![record("")], vec![]);
        assert!(matches!(result, Err(CatalogError::EmptyId(0))));
    }

    #[test]
    fn test_completion_out_of_range_rejected() {
        let mut pkg = record("1");
        pkg.percent_complete = 101;

        let result = Catalog::new(vec![pkg], vec![]);
        assert!(matches!(
            result,
            Err(CatalogError::CompletionOutOfRange { value: 101, .. })
        ));
    }

    #[test]
    fn test_verticals_first_seen_order() {
        let mut a = record("1");
        a.category = "Finance".to_string();
        let mut b = record("2");
        b.category = "Security".to_string();
        let mut c = record("3");
        c.category = "Finance".to_string();

        let catalog = Catalog::new(vec![a, b, c], vec![]).unwrap();
        assert_eq!(catalog.verticals(), vec!["Finance", "Security"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let document = serde_json::json!({
            "packages": [
                {
                    "id": "1",
                    "name": "Nexus\\Tenant",
                    "description": "Tenant isolation",
                    "percentComplete": 90,
                    "loc": 2532,
                    "docLines": 1800,
                    "docCodeRatio": 0.71,
                    "reqs": 85,
                    "tests": 45,
                    "value": 175000,
                    "devCost": 22000,
                    "roi": 795,
                    "category": "Infrastructure",
                    "criticality": "High",
                    "nature": "Architectural"
                }
            ],
            "roadmap": [
                {
                    "id": "r1",
                    "title": "Complete Inventory Documentation",
                    "term": "Immediate",
                    "impact": "Blocking for warehouse",
                    "valueImpact": 240000,
                    "action": "Add doc lines",
                    "packages": ["Nexus\\Inventory"]
                }
            ]
        });
        write!(file, "{}", document).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.packages()[0].name, "Nexus\\Tenant");
        assert_eq!(catalog.roadmap().len(), 1);
        assert_eq!(catalog.roadmap()[0].packages, vec!["Nexus\\Inventory"]);
    }

    #[test]
    fn test_load_sample_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog.json");
        let catalog = Catalog::load(&path).unwrap();

        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.roadmap().len(), 3);
        assert_eq!(catalog.verticals()[0], "Infrastructure");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Catalog::load(Path::new("/nonexistent/catalog.json"));
        assert!(result.is_err());
    }
}
