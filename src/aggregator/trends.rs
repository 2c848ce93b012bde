//! Trend derivation over the monthly aggregate sequence.
//!
//! Two signals come out of every analysis run: the month-over-month
//! variation of completed activities (a percentage) and the delta
//! between the two most recent 3-month moving averages (an absolute
//! value). Both are ephemeral and recomputed on every request.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::loader::MonthlyAggregate;
use crate::utils::error::TrendError;

/// Window width of the trailing moving average
pub const MOVING_AVERAGE_WINDOW: usize = 3;

/// Direction of a trend signal.
///
/// Pure function of the magnitude's sign; no hysteresis or
/// thresholding is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Flat,
}

impl TrendDirection {
    /// Classify a magnitude by sign
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude > 0.0 {
            Self::Increasing
        } else if magnitude < 0.0 {
            Self::Decreasing
        } else {
            Self::Flat
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Flat => "flat",
        })
    }
}

/// A single derived trend value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSignal {
    /// Signed size of the movement (percentage or absolute, per signal)
    pub magnitude: f64,

    /// Sign classification of `magnitude`
    pub direction: TrendDirection,
}

impl TrendSignal {
    fn new(magnitude: f64) -> Self {
        Self {
            magnitude,
            direction: TrendDirection::from_magnitude(magnitude),
        }
    }
}

/// The two signals produced per analysis run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Last month vs. the month before, in percent
    pub monthly_variation: TrendSignal,

    /// Difference between the two most recent 3-month moving averages
    pub moving_average_delta: TrendSignal,
}

/// Month-over-month variation of completed activities
///
/// **Public** - adapter entry point
///
/// # Returns
/// `(current - previous) / previous × 100` over the last two rows.
/// A previous count of 0 yields magnitude 0 rather than a division
/// error; the fallback is logged.
///
/// # Errors
/// `TrendError::InsufficientData` with fewer than 2 rows
pub fn month_over_month_variation(
    monthly: &[MonthlyAggregate],
) -> Result<TrendSignal, TrendError> {
    if monthly.len() < 2 {
        return Err(TrendError::InsufficientData {
            operation: "month-over-month variation",
            required: 2,
            actual: monthly.len(),
        });
    }

    let previous = &monthly[monthly.len() - 2];
    let current = &monthly[monthly.len() - 1];

    let magnitude = if previous.completed == 0 {
        warn!(
            "month '{}' completed 0 activities, variation defaults to 0",
            previous.month
        );
        0.0
    } else {
        (f64::from(current.completed) - f64::from(previous.completed))
            / f64::from(previous.completed)
            * 100.0
    };

    debug!(
        "Monthly variation {:.2}% ({} -> {})",
        magnitude, previous.month, current.month
    );

    Ok(TrendSignal::new(magnitude))
}

/// Trailing moving averages of completed activities
///
/// One entry per input row; `None` until the window is full, so the
/// first two positions are always absent.
pub fn moving_averages(monthly: &[MonthlyAggregate]) -> Vec<Option<f64>> {
    (0..monthly.len())
        .map(|i| {
            if i + 1 < MOVING_AVERAGE_WINDOW {
                None
            } else {
                Some(window_mean(&monthly[i + 1 - MOVING_AVERAGE_WINDOW..=i]))
            }
        })
        .collect()
}

/// Rows with `moving_average_3` populated, for tabular display
pub fn attach_moving_average(monthly: &[MonthlyAggregate]) -> Vec<MonthlyAggregate> {
    monthly
        .iter()
        .cloned()
        .zip(moving_averages(monthly))
        .map(|(mut row, average)| {
            row.moving_average_3 = average;
            row
        })
        .collect()
}

/// Delta between the two most recent 3-month moving averages
///
/// **Public** - adapter entry point
///
/// # Errors
/// `TrendError::InsufficientData` with fewer than 4 rows (three to
/// seed the first average, one more for a comparable second); succeeds
/// at exactly 4.
pub fn moving_average_trend(monthly: &[MonthlyAggregate]) -> Result<TrendSignal, TrendError> {
    let required = MOVING_AVERAGE_WINDOW + 1;
    if monthly.len() < required {
        return Err(TrendError::InsufficientData {
            operation: "moving-average trend",
            required,
            actual: monthly.len(),
        });
    }

    let n = monthly.len();
    let latest = window_mean(&monthly[n - MOVING_AVERAGE_WINDOW..]);
    let prior = window_mean(&monthly[n - MOVING_AVERAGE_WINDOW - 1..n - 1]);

    debug!(
        "Moving-average trend {:.2} ({:.2} -> {:.2})",
        latest - prior,
        prior,
        latest
    );

    Ok(TrendSignal::new(latest - prior))
}

/// Compute both per-run signals
///
/// **Public** - adapter entry point
///
/// # Errors
/// `TrendError::InsufficientData` with fewer than 4 rows (the
/// moving-average delta's bound; the variation alone only needs 2)
pub fn compute_trends(monthly: &[MonthlyAggregate]) -> Result<TrendReport, TrendError> {
    Ok(TrendReport {
        monthly_variation: month_over_month_variation(monthly)?,
        moving_average_delta: moving_average_trend(monthly)?,
    })
}

/// Mean of `completed` over a full window
///
/// **Private** - callers guarantee a non-empty slice
fn window_mean(window: &[MonthlyAggregate]) -> f64 {
    let total: u64 = window.iter().map(|m| u64::from(m.completed)).sum();
    total as f64 / window.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(completed: &[u32]) -> Vec<MonthlyAggregate> {
        completed
            .iter()
            .enumerate()
            .map(|(i, &count)| MonthlyAggregate {
                month: format!("M{}", i + 1),
                completed: count,
                planned: 20,
                completion_ratio: f64::from(count) / 20.0 * 100.0,
                moving_average_3: None,
            })
            .collect()
    }

    #[test]
    fn test_variation_matches_percentage_delta() {
        let signal = month_over_month_variation(&months(&[10, 15])).unwrap();
        assert_eq!(signal.magnitude, 50.0);
        assert_eq!(signal.direction, TrendDirection::Increasing);
    }

    #[test]
    fn test_variation_decreasing() {
        let signal = month_over_month_variation(&months(&[20, 15])).unwrap();
        assert_eq!(signal.magnitude, -25.0);
        assert_eq!(signal.direction, TrendDirection::Decreasing);
    }

    #[test]
    fn test_variation_zero_previous_is_guarded() {
        let signal = month_over_month_variation(&months(&[0, 15])).unwrap();
        assert_eq!(signal.magnitude, 0.0);
        assert_eq!(signal.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_variation_needs_two_rows() {
        let result = month_over_month_variation(&months(&[10]));
        assert!(matches!(
            result,
            Err(TrendError::InsufficientData {
                required: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_moving_averages_fill_after_window() {
        let averages = moving_averages(&months(&[10, 20, 30, 40]));
        assert_eq!(averages, vec![None, None, Some(20.0), Some(30.0)]);
    }

    #[test]
    fn test_attach_moving_average_keeps_rows_aligned() {
        let rows = attach_moving_average(&months(&[10, 20, 30, 40]));
        assert_eq!(rows.len(), 4);
        assert!(rows[1].moving_average_3.is_none());
        assert_eq!(rows[2].moving_average_3, Some(20.0));
        assert_eq!(rows[3].month, "M4");
        assert_eq!(rows[3].moving_average_3, Some(30.0));
    }

    #[test]
    fn test_moving_average_trend_at_boundary() {
        let signal = moving_average_trend(&months(&[10, 20, 30, 40])).unwrap();
        assert_eq!(signal.magnitude, 10.0);
        assert_eq!(signal.direction, TrendDirection::Increasing);

        let result = moving_average_trend(&months(&[10, 20, 30]));
        assert!(matches!(
            result,
            Err(TrendError::InsufficientData {
                required: 4,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_flat_series_is_flat() {
        let report = compute_trends(&months(&[12, 12, 12, 12])).unwrap();
        assert_eq!(report.monthly_variation.direction, TrendDirection::Flat);
        assert_eq!(report.moving_average_delta.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_compute_trends_requires_four_rows() {
        assert!(compute_trends(&months(&[10, 20, 30])).is_err());
        assert!(compute_trends(&months(&[10, 20, 30, 40])).is_ok());
    }

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(
            TrendDirection::from_magnitude(0.001),
            TrendDirection::Increasing
        );
        assert_eq!(
            TrendDirection::from_magnitude(-0.001),
            TrendDirection::Decreasing
        );
        assert_eq!(TrendDirection::from_magnitude(0.0), TrendDirection::Flat);
    }
}
