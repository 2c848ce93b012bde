//! Activity Insights
//!
//! De-identification and trend aggregation core for activity
//! dashboards.
//!
//! The crate ingests already-parsed tabular activity data, produces a
//! de-identified copy of the raw detail rows, and derives the
//! monthly/quarterly/area aggregates and trend indicators a
//! presentation layer renders. Parsing delimited files, page layout
//! and charting live with external collaborators; everything here is
//! an in-memory transformation.
//!
//! Typical flow:
//!
//! ```ignore
//! let config = PipelineConfig::default();
//! let anonymized = anonymize_and_persist(&detail, "detail_anonymized.json", &config)?;
//! let tables = load_aggregates(&monthly, &quarterly, &anonymized, &config)?;
//! let trends = compute_trends(&tables.monthly)?;
//! let heatmap = build_area_matrix(&tables.detail);
//! ```

pub mod aggregator;
pub mod anonymizer;
pub mod loader;
pub mod output;
pub mod table;
pub mod utils;

// Adapter-facing surface
pub use aggregator::{
    build_area_matrix, compute_trends, filter_by_area, summarize, ActivitySummary,
    AreaMonthMatrix, TrendDirection, TrendReport, TrendSignal,
};
pub use anonymizer::{anonymize_and_persist, anonymize_table, IdentityMap};
pub use loader::{
    load_aggregates, ActivityRecord, LoadedTables, MonthlyAggregate, QuarterlyAggregate,
};
pub use table::RawTable;
pub use utils::config::PipelineConfig;
pub use utils::error::{OutputError, PipelineError, SchemaError, TrendError};
