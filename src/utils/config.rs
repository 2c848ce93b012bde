//! Configuration and column-name constants for the pipeline.
//!
//! The column labels below are the fixed external contract of the
//! upstream export, mixed capitalization included ("feb", "Sept").
//! They are never normalized on read; a renamed column upstream must
//! fail loudly at the loader rather than slip through.

use serde::{Deserialize, Serialize};

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: &str = "1.0.0";

/// Month label column of the monthly table
pub const MONTH_COLUMN: &str = "Mes";
/// Quarter label column of the quarterly table
pub const QUARTER_COLUMN: &str = "Trimestre";
/// Completed-activities column (monthly and quarterly tables)
pub const COMPLETED_COLUMN: &str = "Actividades_Realizadas";
/// Planned-activities column (monthly and quarterly tables)
pub const PLANNED_COLUMN: &str = "Total_Actividades";

/// Person identity column of the detail table
pub const PERSON_COLUMN: &str = "Nombre";
/// Advisor identity column of the detail table
pub const ADVISOR_COLUMN: &str = "Asesor HSW";
/// Area grouping column of the detail table
pub const AREA_COLUMN: &str = "Gerencia área / area";

/// Number of month-count columns in the detail table
pub const MONTH_COUNT: usize = 12;

// Month-count columns of the detail table, January through December.
// The capitalization is inconsistent at the source; it is part of the
// contract, not ours to fix.
pub const MONTH_COLUMNS: [&str; MONTH_COUNT] = [
    "Ene", "feb", "mar", "Abr", "May", "Jun",
    "Jul", "Ago", "Sept", "Oct", "Nov", "Dic",
];

/// Pipeline configuration, passed explicitly into every stage.
///
/// Defaults mirror the constants above, so a plain
/// `PipelineConfig::default()` matches the standard export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Identity column rewritten with `person_prefix` labels
    pub person_column: String,

    /// Identity column rewritten with `advisor_prefix` labels
    pub advisor_column: String,

    /// Grouping column for the area pivot
    pub area_column: String,

    /// Synthetic label prefix for person identities
    pub person_prefix: String,

    /// Synthetic label prefix for advisor identities
    pub advisor_prefix: String,

    /// Version stamped into persisted snapshots
    pub snapshot_version: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            person_column: PERSON_COLUMN.to_string(),
            advisor_column: ADVISOR_COLUMN.to_string(),
            area_column: AREA_COLUMN.to_string(),
            person_prefix: "User".to_string(),
            advisor_prefix: "Advisor".to_string(),
            snapshot_version: SNAPSHOT_VERSION.to_string(),
        }
    }
}
