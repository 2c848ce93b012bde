//! Headline metrics for the summary view.
//!
//! Scalar derivations over the monthly table: totals, the monthly
//! mean, and completion percentages for the whole period and the most
//! recent month. The presentation adapter renders these as metric
//! tiles next to the trend signals.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::loader::MonthlyAggregate;
use crate::utils::error::TrendError;

/// Headline metrics derived from the monthly table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Completed activities across all months
    pub total_completed: u64,

    /// Planned activities across all months
    pub total_planned: u64,

    /// Mean completed activities per month
    pub monthly_mean: f64,

    /// Σcompleted / Σplanned × 100; 0 when nothing was planned
    pub overall_completion_pct: f64,

    /// Label of the most recent month
    pub latest_month: String,

    /// Completion percentage of the most recent month
    pub latest_month_completion_pct: f64,
}

impl ActivitySummary {
    /// One-line rendering for logs and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} of {} | Mean: {:.1}/month | Overall: {:.1}% | {}: {:.1}%",
            self.total_completed,
            self.total_planned,
            self.monthly_mean,
            self.overall_completion_pct,
            self.latest_month,
            self.latest_month_completion_pct
        )
    }
}

/// Derive the headline metrics from the monthly rows
///
/// **Public** - adapter entry point
///
/// # Errors
/// `TrendError::InsufficientData` when no monthly rows exist
pub fn summarize(monthly: &[MonthlyAggregate]) -> Result<ActivitySummary, TrendError> {
    let Some(latest) = monthly.last() else {
        return Err(TrendError::InsufficientData {
            operation: "activity summary",
            required: 1,
            actual: 0,
        });
    };

    let total_completed: u64 = monthly.iter().map(|m| u64::from(m.completed)).sum();
    let total_planned: u64 = monthly.iter().map(|m| u64::from(m.planned)).sum();

    let overall_completion_pct = if total_planned == 0 {
        warn!("no planned activities across the period, overall completion defaults to 0");
        0.0
    } else {
        total_completed as f64 / total_planned as f64 * 100.0
    };

    Ok(ActivitySummary {
        total_completed,
        total_planned,
        monthly_mean: total_completed as f64 / monthly.len() as f64,
        overall_completion_pct,
        latest_month: latest.month.clone(),
        latest_month_completion_pct: latest.completion_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(label: &str, completed: u32, planned: u32) -> MonthlyAggregate {
        let completion_ratio = if planned == 0 {
            0.0
        } else {
            f64::from(completed) / f64::from(planned) * 100.0
        };
        MonthlyAggregate {
            month: label.to_string(),
            completed,
            planned,
            completion_ratio,
            moving_average_3: None,
        }
    }

    #[test]
    fn test_summary_totals_and_percentages() {
        let monthly = vec![month("Jan", 10, 20), month("Feb", 15, 20)];
        let summary = summarize(&monthly).unwrap();

        assert_eq!(summary.total_completed, 25);
        assert_eq!(summary.total_planned, 40);
        assert_eq!(summary.monthly_mean, 12.5);
        assert_eq!(summary.overall_completion_pct, 62.5);
        assert_eq!(summary.latest_month, "Feb");
        assert_eq!(summary.latest_month_completion_pct, 75.0);
    }

    #[test]
    fn test_summary_requires_data() {
        assert!(matches!(
            summarize(&[]),
            Err(TrendError::InsufficientData {
                required: 1,
                actual: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_planned_is_guarded() {
        let summary = summarize(&[month("Jan", 5, 0)]).unwrap();
        assert_eq!(summary.overall_completion_pct, 0.0);
        assert_eq!(summary.latest_month_completion_pct, 0.0);
    }

    #[test]
    fn test_one_line_summary_mentions_latest_month() {
        let summary = summarize(&[month("Jan", 10, 20)]).unwrap();
        let line = summary.summary();
        assert!(line.contains("Jan"));
        assert!(line.contains("50.0%"));
    }
}
