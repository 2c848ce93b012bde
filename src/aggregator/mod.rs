//! Aggregation and trend derivation over loaded tables.
//!
//! This module turns loaded rows into:
//! - Trend signals (month-over-month variation, moving-average delta)
//! - The area × month pivot behind the heatmap view
//! - Headline summary metrics

pub mod pivot;
pub mod summary;
pub mod trends;

// Re-export main types and functions
pub use pivot::{build_area_matrix, filter_by_area, AreaMonthMatrix};
pub use summary::{summarize, ActivitySummary};
pub use trends::{
    attach_moving_average, compute_trends, month_over_month_variation, moving_average_trend,
    moving_averages, TrendDirection, TrendReport, TrendSignal,
};
