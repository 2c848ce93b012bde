//! Typed row definitions produced by the loader.
//!
//! These are the shapes the aggregation stages and the presentation
//! adapter consume. Everything is serde-enabled so the adapter can
//! serialize results directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::config::MONTH_COUNT;

/// One row of the monthly aggregate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// Month label, as provided by the source (chronological order assumed)
    pub month: String,

    /// Activities completed in the month
    pub completed: u32,

    /// Activities planned for the month
    pub planned: u32,

    /// completed / planned × 100; 0 when nothing was planned
    pub completion_ratio: f64,

    /// Trailing 3-month average of `completed`; absent until three
    /// months of history exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_average_3: Option<f64>,
}

/// One row of the quarterly aggregate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyAggregate {
    /// Quarter label, as provided by the source
    pub quarter: String,

    /// Activities completed in the quarter
    pub completed: u32,

    /// Activities planned for the quarter
    pub planned: u32,

    /// completed / planned × 100; 0 when nothing was planned
    pub completion_ratio: f64,
}

/// One anonymized detail row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Synthetic person label (identity columns are rewritten before loading)
    pub person: String,

    /// Synthetic advisor label
    pub advisor: String,

    /// Area grouping label
    pub area: String,

    /// Activity counts, January through December
    pub month_counts: [u32; MONTH_COUNT],

    /// Source columns the pipeline does not interpret, preserved as-is
    pub passthrough: BTreeMap<String, String>,
}

/// The three loaded tables, bundled for the adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedTables {
    pub monthly: Vec<MonthlyAggregate>,
    pub quarterly: Vec<QuarterlyAggregate>,
    pub detail: Vec<ActivityRecord>,
}
