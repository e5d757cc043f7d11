// 🌱 Emission Catalog - Activity → kg CO₂ factor lookup
// Catalog content is configuration data: a baked-in table, or a JSON file
//
// The catalog is defined once at startup and never mutated; definition order
// is preserved because listing and search both promise catalog order.

use crate::error::FootprintError;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// EMISSION FACTOR
// ============================================================================

/// One catalog row: an activity and its per-unit emission factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// Activity name shown in the picker, unit in parentheses
    /// (e.g. "Car Usage (km)")
    pub activity: String,

    /// kg CO₂ emitted per one unit of the activity; strictly positive
    pub factor: f64,
}

impl EmissionFactor {
    pub fn new(activity: impl Into<String>, factor: f64) -> Self {
        EmissionFactor {
            activity: activity.into(),
            factor,
        }
    }
}

// ============================================================================
// EMISSION CATALOG
// ============================================================================

/// Immutable activity → factor table
///
/// Invariants: activity names are unique, factors strictly positive. Both are
/// enforced when building from external data; the built-in table upholds them
/// by construction.
#[derive(Debug, Clone)]
pub struct EmissionCatalog {
    factors: Vec<EmissionFactor>,
}

impl EmissionCatalog {
    /// Build a catalog from explicit entries, enforcing the invariants
    pub fn from_factors(factors: Vec<EmissionFactor>) -> Result<Self> {
        for (i, entry) in factors.iter().enumerate() {
            if entry.activity.trim().is_empty() {
                bail!("Catalog entry {} has an empty activity name", i + 1);
            }
            if !entry.factor.is_finite() || entry.factor <= 0.0 {
                bail!(
                    "Emission factor for '{}' must be strictly positive, got {}",
                    entry.activity,
                    entry.factor
                );
            }
            if factors[..i].iter().any(|prev| prev.activity == entry.activity) {
                bail!("Duplicate activity in catalog: '{}'", entry.activity);
            }
        }

        Ok(EmissionCatalog { factors })
    }

    /// Load a catalog from a JSON file: an array of {"activity", "factor"}
    ///
    /// Alternate factor tables ship as data files, not code changes.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read catalog file: {:?}", path.as_ref()))?;

        let factors: Vec<EmissionFactor> =
            serde_json::from_str(&content).context("Failed to parse catalog JSON")?;

        Self::from_factors(factors)
    }

    /// The daily emission factor table the desktop app ships with
    pub fn with_defaults() -> Self {
        let factors = vec![
            EmissionFactor::new("Car Usage (km)", 0.2),
            EmissionFactor::new("Motorcycle Usage (km)", 0.1),
            EmissionFactor::new("Public Bus (km)", 0.05),
            EmissionFactor::new("Train/Subway (km)", 0.04),
            EmissionFactor::new("Air Travel (short-haul, km)", 0.15),
            EmissionFactor::new("Air Travel (long-haul, km)", 0.11),
            EmissionFactor::new("Bicycle Manufacturing (unit)", 5.0),
            EmissionFactor::new("Walking Shoes (pair)", 20.0),
            EmissionFactor::new("Electricity Usage (kWh)", 0.5),
            EmissionFactor::new("Natural Gas Usage (kWh)", 0.2),
            EmissionFactor::new("Water Usage (liter)", 0.001),
            EmissionFactor::new("Internet Usage (GB)", 0.01),
            EmissionFactor::new("Meat Consumption (Chicken, meal)", 6.0),
            EmissionFactor::new("Meat Consumption (Beef, meal)", 27.0),
            EmissionFactor::new("Vegetarian Meal (meal)", 1.5),
            EmissionFactor::new("Cooking (meal)", 0.5),
            EmissionFactor::new("Plastic Bag (unit)", 0.01),
            EmissionFactor::new("Streaming Video (hour)", 0.36),
            EmissionFactor::new("Shower (10 minutes)", 0.9),
        ];

        EmissionCatalog { factors }
    }

    /// Per-unit factor for an activity (exact name match)
    ///
    /// Idempotent for the process lifetime: the catalog never changes after
    /// construction.
    pub fn factor_of(&self, activity: &str) -> Result<f64, FootprintError> {
        self.factors
            .iter()
            .find(|entry| entry.activity == activity)
            .map(|entry| entry.factor)
            .ok_or_else(|| FootprintError::UnknownActivity(activity.to_string()))
    }

    /// True if the activity exists in the catalog
    pub fn contains(&self, activity: &str) -> bool {
        self.factors.iter().any(|entry| entry.activity == activity)
    }

    /// All activity names in catalog-definition order
    pub fn all_activities(&self) -> impl Iterator<Item = &str> {
        self.factors.iter().map(|entry| entry.activity.as_str())
    }

    /// Case-insensitive substring search over activity names
    ///
    /// Lazy and restartable: each call yields a fresh iterator, and results
    /// stay in catalog-definition order. An empty term matches everything.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a str> + 'a {
        let term = term.to_lowercase();
        self.factors
            .iter()
            .filter(move |entry| entry.activity.to_lowercase().contains(&term))
            .map(|entry| entry.activity.as_str())
    }

    /// Full catalog rows, for listings that need the factors too
    pub fn entries(&self) -> &[EmissionFactor] {
        &self.factors
    }

    /// Number of activities in the catalog
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl Default for EmissionCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_catalog_has_19_activities() {
        let catalog = EmissionCatalog::with_defaults();
        assert_eq!(catalog.len(), 19);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_factor_of_known_activities() {
        let catalog = EmissionCatalog::with_defaults();

        assert_eq!(catalog.factor_of("Car Usage (km)").unwrap(), 0.2);
        assert_eq!(catalog.factor_of("Water Usage (liter)").unwrap(), 0.001);
        assert_eq!(
            catalog.factor_of("Meat Consumption (Beef, meal)").unwrap(),
            27.0
        );
    }

    #[test]
    fn test_factor_of_unknown_activity() {
        let catalog = EmissionCatalog::with_defaults();

        let err = catalog.factor_of("Teleportation (km)").unwrap_err();
        assert_eq!(
            err,
            FootprintError::UnknownActivity("Teleportation (km)".to_string())
        );
    }

    #[test]
    fn test_factor_of_is_idempotent() {
        let catalog = EmissionCatalog::with_defaults();

        let first = catalog.factor_of("Electricity Usage (kWh)").unwrap();
        for _ in 0..10 {
            assert_eq!(catalog.factor_of("Electricity Usage (kWh)").unwrap(), first);
        }
    }

    #[test]
    fn test_factor_of_uses_exact_names() {
        // Lookup matches the picker's exact strings; only search is fuzzy
        let catalog = EmissionCatalog::with_defaults();
        assert!(catalog.factor_of("car usage (km)").is_err());
        assert!(catalog.factor_of("Car Usage").is_err());
    }

    #[test]
    fn test_contains() {
        let catalog = EmissionCatalog::with_defaults();
        assert!(catalog.contains("Public Bus (km)"));
        assert!(!catalog.contains("Sailing (km)"));
    }

    #[test]
    fn test_all_activities_in_definition_order() {
        let catalog = EmissionCatalog::with_defaults();
        let names: Vec<&str> = catalog.all_activities().collect();

        assert_eq!(names.len(), 19);
        assert_eq!(names[0], "Car Usage (km)");
        assert_eq!(names[1], "Motorcycle Usage (km)");
        assert_eq!(names[18], "Shower (10 minutes)");
    }

    #[test]
    fn test_search_bus_returns_exactly_public_bus() {
        let catalog = EmissionCatalog::with_defaults();
        let matches: Vec<&str> = catalog.search("bus").collect();
        assert_eq!(matches, vec!["Public Bus (km)"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = EmissionCatalog::with_defaults();

        let lower: Vec<&str> = catalog.search("meat").collect();
        let upper: Vec<&str> = catalog.search("MEAT").collect();

        assert_eq!(lower, upper);
        assert_eq!(
            lower,
            vec![
                "Meat Consumption (Chicken, meal)",
                "Meat Consumption (Beef, meal)",
            ]
        );
    }

    #[test]
    fn test_search_preserves_catalog_order() {
        let catalog = EmissionCatalog::with_defaults();
        let usage: Vec<&str> = catalog.search("usage").collect();

        assert_eq!(
            usage,
            vec![
                "Car Usage (km)",
                "Motorcycle Usage (km)",
                "Electricity Usage (kWh)",
                "Natural Gas Usage (kWh)",
                "Water Usage (liter)",
                "Internet Usage (GB)",
            ]
        );
    }

    #[test]
    fn test_search_empty_term_matches_everything() {
        let catalog = EmissionCatalog::with_defaults();
        assert_eq!(catalog.search("").count(), catalog.len());
    }

    #[test]
    fn test_search_is_restartable() {
        let catalog = EmissionCatalog::with_defaults();

        // "travel" hits both air-travel rows, every time it is called
        assert_eq!(catalog.search("travel").count(), 2);
        assert_eq!(catalog.search("travel").count(), 2);
    }

    #[test]
    fn test_from_factors_rejects_duplicate_activity() {
        let result = EmissionCatalog::from_factors(vec![
            EmissionFactor::new("Car Usage (km)", 0.2),
            EmissionFactor::new("Car Usage (km)", 0.3),
        ]);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Duplicate activity"));
    }

    #[test]
    fn test_from_factors_rejects_nonpositive_factor() {
        let zero = EmissionCatalog::from_factors(vec![EmissionFactor::new("Idling (h)", 0.0)]);
        assert!(zero.is_err());

        let negative =
            EmissionCatalog::from_factors(vec![EmissionFactor::new("Idling (h)", -0.5)]);
        assert!(negative.is_err());

        let nan = EmissionCatalog::from_factors(vec![EmissionFactor::new("Idling (h)", f64::NAN)]);
        assert!(nan.is_err());
    }

    #[test]
    fn test_from_factors_rejects_empty_activity_name() {
        let result = EmissionCatalog::from_factors(vec![EmissionFactor::new("  ", 1.0)]);
        assert!(result.unwrap_err().to_string().contains("empty activity name"));
    }

    #[test]
    fn test_from_file_loads_json_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[
                {"activity": "Car Usage (km)", "factor": 0.2},
                {"activity": "Ferry (km)", "factor": 0.12}
            ]"#,
        )
        .unwrap();

        let catalog = EmissionCatalog::from_file(&path).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.factor_of("Ferry (km)").unwrap(), 0.12);

        let names: Vec<&str> = catalog.all_activities().collect();
        assert_eq!(names, vec!["Car Usage (km)", "Ferry (km)"]);
    }

    #[test]
    fn test_from_file_missing_path_fails_with_context() {
        let err = EmissionCatalog::from_file("/no/such/catalog.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog file"));
    }

    #[test]
    fn test_from_file_rejects_invalid_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"[{"activity": "Ferry (km)", "factor": -1.0}]"#).unwrap();

        assert!(EmissionCatalog::from_file(&path).is_err());
    }
}
