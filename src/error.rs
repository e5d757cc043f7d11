// ⚠️ Footprint Errors - Recoverable validation taxonomy
// Every variant is a user-facing message; none terminates the session

use std::fmt;

// ============================================================================
// ERROR TAXONOMY
// ============================================================================

/// Validation failures surfaced to the user
///
/// All variants are recoverable: the caller shows the message and keeps the
/// session alive with no state change: no partial persistence, no partial
/// UI update.
#[derive(Debug, Clone, PartialEq)]
pub enum FootprintError {
    /// Activity name is not present in the emission catalog.
    /// Should not occur when entries come from the catalog-backed picker,
    /// but is checked on every lookup anyway.
    UnknownActivity(String),

    /// Calculation requested with no entries in the session
    EmptyInput,

    /// Quantity input could not be parsed as a number
    InvalidQuantity(String),
}

impl fmt::Display for FootprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FootprintError::UnknownActivity(name) => {
                write!(f, "Activity '{}' not found in emission factors.", name)
            }
            FootprintError::EmptyInput => {
                write!(f, "Please add activities to calculate the footprint.")
            }
            FootprintError::InvalidQuantity(input) => {
                write!(f, "Please enter a valid numeric value (got '{}').", input)
            }
        }
    }
}

impl std::error::Error for FootprintError {}

// ============================================================================
// TESTS
// ============================================================================
