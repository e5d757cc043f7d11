// 📒 Footprint Ledger - Aggregation + append-only CSV log
// compute() weighs entries against the catalog; append() persists one session
//
// The log file is the system of record. It is only ever opened in append
// mode: prior rows are never rewritten, so a crash mid-write leaves
// previously-written rows intact.

use crate::catalog::EmissionCatalog;
use crate::error::FootprintError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Default log file, created in the working directory
pub const DATA_FILE: &str = "carbon_footprint_data.csv";

/// Header row, written once when the log file is first created
const LOG_HEADER: [&str; 4] = ["Date", "Activity", "Value", "Total Footprint (kg CO₂)"];

// ============================================================================
// SESSION ENTRY
// ============================================================================

/// One (activity, quantity) pair contributed by the user in a session
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    /// Activity name; must exist in the catalog at compute time
    pub activity: String,

    /// Units of the activity. Any f64 the input layer accepts is allowed;
    /// negative quantities are not rejected and can model avoided emissions.
    pub quantity: f64,
}

impl ActivityEntry {
    pub fn new(activity: impl Into<String>, quantity: f64) -> Self {
        ActivityEntry {
            activity: activity.into(),
            quantity,
        }
    }
}

// ============================================================================
// PERSISTED RECORD
// ============================================================================

/// One row of the append-only log
///
/// `total_footprint` is the SESSION grand total, repeated on every row the
/// session wrote. That duplication is the on-disk format the desktop app
/// produced and is kept for compatibility; per-activity analysis of
/// historical data needs external recomputation (known limitation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintRecord {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Activity")]
    pub activity: String,

    #[serde(rename = "Value")]
    pub quantity: f64,

    #[serde(rename = "Total Footprint (kg CO₂)")]
    pub total_footprint: f64,
}

// ============================================================================
// COMPUTED SUMMARY
// ============================================================================

/// Result of one calculation: per-entry contributions + grand total
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintSummary {
    /// kg CO₂ per entry (quantity × factor), in input order
    pub contributions: Vec<f64>,

    /// Sum of all contributions, accumulated in input order
    pub grand_total: f64,
}

impl FootprintSummary {
    /// Headline the caller displays after a calculation
    pub fn headline(&self) -> String {
        format!("Your daily carbon footprint: {:.2} kg CO₂", self.grand_total)
    }

    /// Labels + values for the chart-rendering collaborator
    ///
    /// `entries` must be the slice this summary was computed from; labels
    /// pair positionally with contributions.
    pub fn chart_data(&self, entries: &[ActivityEntry]) -> ChartData {
        ChartData {
            labels: entries.iter().map(|e| e.activity.clone()).collect(),
            values: self.contributions.clone(),
        }
    }
}

/// What the chart-rendering collaborator consumes: parallel labels/values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

// ============================================================================
// FOOTPRINT LEDGER
// ============================================================================

/// Computes session footprints and owns the append-only CSV log
#[derive(Debug, Clone)]
pub struct FootprintLedger {
    data_file: PathBuf,
}

impl FootprintLedger {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        FootprintLedger {
            data_file: data_file.into(),
        }
    }

    /// Ledger over `carbon_footprint_data.csv` in the working directory
    pub fn with_default_file() -> Self {
        Self::new(DATA_FILE)
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Weigh every entry against the catalog and sum in input order
    ///
    /// Fails with `EmptyInput` when there is nothing to compute, and with
    /// `UnknownActivity` on the first entry missing from the catalog. Both
    /// are validation failures the caller surfaces to the user; nothing is
    /// persisted and the pipeline stops.
    pub fn compute(
        &self,
        catalog: &EmissionCatalog,
        entries: &[ActivityEntry],
    ) -> Result<FootprintSummary, FootprintError> {
        if entries.is_empty() {
            return Err(FootprintError::EmptyInput);
        }

        let mut contributions = Vec::with_capacity(entries.len());
        let mut grand_total = 0.0;

        for entry in entries {
            let factor = catalog.factor_of(&entry.activity)?;
            let contribution = entry.quantity * factor;
            grand_total += contribution;
            contributions.push(contribution);
        }

        Ok(FootprintSummary {
            contributions,
            grand_total,
        })
    }

    /// Append one row per entry, every row carrying the session grand total
    ///
    /// Writes the header first iff the log does not exist yet. The date is
    /// whatever string the date-selection collaborator yielded; it is not
    /// validated here.
    pub fn append(&self, date: &str, entries: &[ActivityEntry], grand_total: f64) -> Result<()> {
        let write_header = !self.data_file.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.data_file)
            .with_context(|| format!("Failed to open log file: {:?}", self.data_file))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer
                .write_record(LOG_HEADER)
                .context("Failed to write log header")?;
        }

        for entry in entries {
            writer
                .serialize(FootprintRecord {
                    date: date.to_string(),
                    activity: entry.activity.clone(),
                    quantity: entry.quantity,
                    total_footprint: grand_total,
                })
                .with_context(|| format!("Failed to append entry for '{}'", entry.activity))?;
        }

        writer.flush().context("Failed to flush log file")?;
        Ok(())
    }

    /// Every record in the log, oldest first; empty when no log exists yet
    pub fn read_all(&self) -> Result<Vec<FootprintRecord>> {
        if !self.data_file.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.data_file)
            .with_context(|| format!("Failed to open log file: {:?}", self.data_file))?;

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: FootprintRecord = result.context("Failed to deserialize log record")?;
            records.push(record);
        }

        Ok(records)
    }

    /// Records whose date column equals `date`
    ///
    /// Dates are pass-through strings, so matching is string equality.
    pub fn records_for_date(&self, date: &str) -> Result<Vec<FootprintRecord>> {
        let records = self.read_all()?;
        Ok(records.into_iter().filter(|r| r.date == date).collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EmissionFactor;
    use std::fs;
    use tempfile::tempdir;

    fn two_activity_catalog() -> EmissionCatalog {
        EmissionCatalog::from_factors(vec![
            EmissionFactor::new("Car Usage (km)", 0.2),
            EmissionFactor::new("Electricity Usage (kWh)", 0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_compute_single_entry_is_quantity_times_factor() {
        let catalog = EmissionCatalog::with_defaults();
        let ledger = FootprintLedger::new("unused.csv");
        let entries = vec![ActivityEntry::new("Car Usage (km)", 10.0)];

        let summary = ledger.compute(&catalog, &entries).unwrap();

        assert_eq!(summary.contributions, vec![2.0]);
        assert_eq!(summary.grand_total, 2.0);
    }

    #[test]
    fn test_compute_matches_worked_example() {
        // Catalog {Car: 0.2, Electricity: 0.5}, entries [(Car, 10), (Electricity, 4)]
        // → per-entry [2.0, 2.0], grand total 4.0
        let catalog = two_activity_catalog();
        let ledger = FootprintLedger::new("unused.csv");
        let entries = vec![
            ActivityEntry::new("Car Usage (km)", 10.0),
            ActivityEntry::new("Electricity Usage (kWh)", 4.0),
        ];

        let summary = ledger.compute(&catalog, &entries).unwrap();

        assert_eq!(summary.contributions, vec![2.0, 2.0]);
        assert_eq!(summary.grand_total, 4.0);
    }

    #[test]
    fn test_compute_sums_in_input_order() {
        let catalog = EmissionCatalog::with_defaults();
        let ledger = FootprintLedger::new("unused.csv");
        let entries = vec![
            ActivityEntry::new("Meat Consumption (Beef, meal)", 1.0),
            ActivityEntry::new("Shower (10 minutes)", 2.0),
            ActivityEntry::new("Plastic Bag (unit)", 3.0),
        ];

        let summary = ledger.compute(&catalog, &entries).unwrap();

        assert_eq!(summary.contributions, vec![27.0, 1.8, 0.03]);
        assert_eq!(summary.grand_total, 27.0 + 1.8 + 0.03);
    }

    #[test]
    fn test_compute_empty_entries_fails() {
        let catalog = EmissionCatalog::with_defaults();
        let ledger = FootprintLedger::new("unused.csv");

        let err = ledger.compute(&catalog, &[]).unwrap_err();
        assert_eq!(err, FootprintError::EmptyInput);
    }

    #[test]
    fn test_compute_unknown_activity_fails() {
        let catalog = two_activity_catalog();
        let ledger = FootprintLedger::new("unused.csv");
        let entries = vec![
            ActivityEntry::new("Car Usage (km)", 10.0),
            ActivityEntry::new("Rocket Launch (unit)", 1.0),
        ];

        let err = ledger.compute(&catalog, &entries).unwrap_err();
        assert_eq!(
            err,
            FootprintError::UnknownActivity("Rocket Launch (unit)".to_string())
        );
    }

    #[test]
    fn test_compute_accepts_negative_quantity() {
        // Non-negativity is deliberately not enforced (avoided emissions)
        let catalog = EmissionCatalog::with_defaults();
        let ledger = FootprintLedger::new("unused.csv");
        let entries = vec![ActivityEntry::new("Car Usage (km)", -10.0)];

        let summary = ledger.compute(&catalog, &entries).unwrap();
        assert_eq!(summary.grand_total, -2.0);
    }

    #[test]
    fn test_headline_formatting() {
        let summary = FootprintSummary {
            contributions: vec![4.0],
            grand_total: 4.0,
        };
        assert_eq!(
            summary.headline(),
            "Your daily carbon footprint: 4.00 kg CO₂"
        );
    }

    #[test]
    fn test_chart_data_pairs_labels_with_contributions() {
        let entries = vec![
            ActivityEntry::new("Car Usage (km)", 10.0),
            ActivityEntry::new("Electricity Usage (kWh)", 4.0),
        ];
        let summary = FootprintSummary {
            contributions: vec![2.0, 2.0],
            grand_total: 4.0,
        };

        let chart = summary.chart_data(&entries);

        assert_eq!(
            chart.labels,
            vec!["Car Usage (km)", "Electricity Usage (kWh)"]
        );
        assert_eq!(chart.values, vec![2.0, 2.0]);
    }

    #[test]
    fn test_append_writes_header_once_and_duplicates_session_total() {
        let dir = tempdir().unwrap();
        let ledger = FootprintLedger::new(dir.path().join("log.csv"));
        let entries = vec![
            ActivityEntry::new("Car Usage (km)", 10.0),
            ActivityEntry::new("Electricity Usage (kWh)", 4.0),
        ];

        ledger.append("2025-05-10", &entries, 4.0).unwrap();

        let content = fs::read_to_string(ledger.data_file()).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date,Activity,Value,Total Footprint (kg CO₂)");
        assert_eq!(lines[1], "2025-05-10,Car Usage (km),10.0,4.0");
        assert_eq!(lines[2], "2025-05-10,Electricity Usage (kWh),4.0,4.0");
    }

    #[test]
    fn test_append_is_strictly_additive_across_sessions() {
        let dir = tempdir().unwrap();
        let ledger = FootprintLedger::new(dir.path().join("log.csv"));

        ledger
            .append(
                "2025-05-10",
                &[ActivityEntry::new("Car Usage (km)", 10.0)],
                2.0,
            )
            .unwrap();
        let after_first = fs::read_to_string(ledger.data_file()).unwrap();

        ledger
            .append(
                "2025-05-11",
                &[ActivityEntry::new("Electricity Usage (kWh)", 4.0)],
                2.0,
            )
            .unwrap();
        let after_second = fs::read_to_string(ledger.data_file()).unwrap();

        // Earlier content is a strict prefix: no row rewritten or removed
        assert!(after_second.starts_with(&after_first));

        let lines: Vec<&str> = after_second.lines().collect();
        assert_eq!(lines.len(), 3);

        // Header appears exactly once
        assert_eq!(after_second.matches("Date,Activity").count(), 1);
    }

    #[test]
    fn test_append_quotes_activities_containing_commas() {
        let dir = tempdir().unwrap();
        let ledger = FootprintLedger::new(dir.path().join("log.csv"));
        let entries = vec![ActivityEntry::new("Meat Consumption (Chicken, meal)", 2.0)];

        ledger.append("2025-05-10", &entries, 12.0).unwrap();

        let content = fs::read_to_string(ledger.data_file()).unwrap();
        assert!(content.contains("\"Meat Consumption (Chicken, meal)\""));

        // And the quoted row still reads back as one record
        let records = ledger.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].activity, "Meat Consumption (Chicken, meal)");
    }

    #[test]
    fn test_append_passes_date_strings_through_unvalidated() {
        let dir = tempdir().unwrap();
        let ledger = FootprintLedger::new(dir.path().join("log.csv"));

        ledger
            .append("10/05/2025", &[ActivityEntry::new("Car Usage (km)", 1.0)], 0.2)
            .unwrap();

        let records = ledger.read_all().unwrap();
        assert_eq!(records[0].date, "10/05/2025");
    }

    #[test]
    fn test_read_all_returns_empty_when_log_missing() {
        let dir = tempdir().unwrap();
        let ledger = FootprintLedger::new(dir.path().join("absent.csv"));
        assert!(ledger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_all_roundtrips_appended_records() {
        let dir = tempdir().unwrap();
        let ledger = FootprintLedger::new(dir.path().join("log.csv"));
        let entries = vec![
            ActivityEntry::new("Car Usage (km)", 10.0),
            ActivityEntry::new("Vegetarian Meal (meal)", 2.0),
        ];

        ledger.append("2025-05-10", &entries, 5.0).unwrap();
        let records = ledger.read_all().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            FootprintRecord {
                date: "2025-05-10".to_string(),
                activity: "Car Usage (km)".to_string(),
                quantity: 10.0,
                total_footprint: 5.0,
            }
        );
        assert_eq!(records[1].activity, "Vegetarian Meal (meal)");
        assert_eq!(records[1].total_footprint, 5.0);
    }

    #[test]
    fn test_records_for_date_filters_by_exact_string() {
        let dir = tempdir().unwrap();
        let ledger = FootprintLedger::new(dir.path().join("log.csv"));

        ledger
            .append(
                "2025-05-10",
                &[ActivityEntry::new("Car Usage (km)", 10.0)],
                2.0,
            )
            .unwrap();
        ledger
            .append(
                "2025-05-11",
                &[
                    ActivityEntry::new("Electricity Usage (kWh)", 4.0),
                    ActivityEntry::new("Cooking (meal)", 1.0),
                ],
                2.5,
            )
            .unwrap();

        let first_day = ledger.records_for_date("2025-05-10").unwrap();
        assert_eq!(first_day.len(), 1);
        assert_eq!(first_day[0].activity, "Car Usage (km)");

        let second_day = ledger.records_for_date("2025-05-11").unwrap();
        assert_eq!(second_day.len(), 2);

        assert!(ledger.records_for_date("2025-05-12").unwrap().is_empty());
    }
}
