// 🧮 Calculation Session - Explicit state for one user session
// Replaces the desktop app's process-wide globals (selected date, selected
// activity, widget-held entry table) with a value passed into the core API.

use crate::catalog::EmissionCatalog;
use crate::error::FootprintError;
use crate::ledger::{ActivityEntry, ChartData, FootprintLedger, FootprintSummary};
use crate::tips;
use anyhow::Result;
use chrono::Local;

// ============================================================================
// QUANTITY PARSING
// ============================================================================

/// Parse a quantity typed by the user
///
/// Accepts any finite f64, including negative values (non-negativity is
/// deliberately not enforced). Everything else fails with `InvalidQuantity`.
pub fn parse_quantity(input: &str) -> Result<f64, FootprintError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|quantity| quantity.is_finite())
        .ok_or_else(|| FootprintError::InvalidQuantity(input.trim().to_string()))
}

// ============================================================================
// SESSION
// ============================================================================

/// The state of the session being assembled: the date its records will
/// carry, the activity currently highlighted in the picker, and the ordered
/// entry list.
#[derive(Debug, Clone)]
pub struct CalcSession {
    date: String,
    selected_activity: Option<String>,
    entries: Vec<ActivityEntry>,
}

impl CalcSession {
    /// Session dated today (`YYYY-MM-DD`)
    pub fn new() -> Self {
        Self::with_date(Local::now().format("%Y-%m-%d").to_string())
    }

    /// Session with a date string from the date-selection collaborator
    pub fn with_date(date: impl Into<String>) -> Self {
        CalcSession {
            date: date.into(),
            selected_activity: None,
            entries: Vec::new(),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Replace the session date; the string is passed through to the log
    /// unvalidated, whatever format the picker yields
    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn selected_activity(&self) -> Option<&str> {
        self.selected_activity.as_deref()
    }

    /// Highlight an activity from the picker; must exist in the catalog
    pub fn select_activity(
        &mut self,
        catalog: &EmissionCatalog,
        activity: &str,
    ) -> Result<(), FootprintError> {
        if !catalog.contains(activity) {
            return Err(FootprintError::UnknownActivity(activity.to_string()));
        }
        self.selected_activity = Some(activity.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_activity = None;
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Append an entry to the session table
    pub fn add_entry(&mut self, activity: impl Into<String>, quantity: f64) {
        self.entries.push(ActivityEntry::new(activity, quantity));
    }

    /// Add an entry for the highlighted activity from raw quantity input
    ///
    /// Returns `Ok(false)` when no activity is highlighted yet; the caller
    /// prompts the user to select one first. Unparseable quantities fail
    /// with `InvalidQuantity` and leave the table unchanged.
    pub fn add_selected(&mut self, quantity_input: &str) -> Result<bool, FootprintError> {
        let activity = match self.selected_activity.clone() {
            Some(activity) => activity,
            None => return Ok(false),
        };

        let quantity = parse_quantity(quantity_input)?;
        self.add_entry(activity, quantity);
        Ok(true)
    }

    /// Remove one entry by table index
    pub fn remove_entry(&mut self, index: usize) -> Option<ActivityEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Drop all entries; the table is cleared or replaced per calculation
    pub fn clear_entries(&mut self) {
        self.entries.clear();
    }

    /// Run one calculation over the current entries
    ///
    /// Pipeline: validate non-empty → compute → persist → pick tip, with
    /// early exit and nothing persisted on validation failure. The returned
    /// outcome carries everything the caller displays. A failed append (e.g.
    /// permission denied) also surfaces as a recoverable error, with the
    /// session state untouched.
    pub fn calculate(
        &self,
        catalog: &EmissionCatalog,
        ledger: &FootprintLedger,
    ) -> Result<CalcOutcome> {
        let summary = ledger.compute(catalog, &self.entries)?;
        ledger.append(&self.date, &self.entries, summary.grand_total)?;

        let chart = summary.chart_data(&self.entries);
        let tip = tips::random_tip();

        Ok(CalcOutcome {
            summary,
            chart,
            tip,
        })
    }
}

impl Default for CalcSession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Everything the caller displays after a successful calculation
#[derive(Debug, Clone)]
pub struct CalcOutcome {
    pub summary: FootprintSummary,
    pub chart: ChartData,
    pub tip: &'static str,
}

// ============================================================================
// TESTS
// ============================================================================
