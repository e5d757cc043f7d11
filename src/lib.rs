// Eco Buddy - Core Library
// Exposes the catalog, ledger and session modules for use in CLI, TUI, and tests

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod session;
pub mod tips;

// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use catalog::{EmissionCatalog, EmissionFactor};
pub use error::FootprintError;
pub use ledger::{
    ActivityEntry, ChartData, FootprintLedger, FootprintRecord, FootprintSummary, DATA_FILE,
};
pub use session::{parse_quantity, CalcOutcome, CalcSession};
pub use tips::{random_tip, TIPS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
