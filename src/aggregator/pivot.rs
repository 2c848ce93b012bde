//! Area × month pivot for heatmap display.
//!
//! Groups anonymized detail rows by area and sums each month column
//! independently. Summation is commutative, so row order within a
//! group never changes the result.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::loader::ActivityRecord;
use crate::utils::config::{MONTH_COLUMNS, MONTH_COUNT};

/// Area → summed activity counts per calendar month.
///
/// Areas iterate in natural key order; months are positional, January
/// through December.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaMonthMatrix {
    cells: BTreeMap<String, [u64; MONTH_COUNT]>,
}

impl AreaMonthMatrix {
    /// Area labels in natural key order
    pub fn areas(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Summed counts for one area, January through December
    pub fn counts_for(&self, area: &str) -> Option<&[u64; MONTH_COUNT]> {
        self.cells.get(area)
    }

    /// (area, counts) pairs in natural key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u64; MONTH_COUNT])> {
        self.cells.iter().map(|(area, counts)| (area.as_str(), counts))
    }

    /// Total across all areas for one month position (0 = January).
    ///
    /// Panics if `month_index` is 12 or more, like any out-of-bounds
    /// index.
    pub fn month_total(&self, month_index: usize) -> u64 {
        self.cells.values().map(|counts| counts[month_index]).sum()
    }

    /// Total across all areas and months
    pub fn grand_total(&self) -> u64 {
        self.cells.values().flat_map(|counts| counts.iter()).sum()
    }

    /// Number of distinct areas
    pub fn area_count(&self) -> usize {
        self.cells.len()
    }

    /// Month labels matching the positional order of each row
    pub fn month_labels() -> [&'static str; MONTH_COUNT] {
        MONTH_COLUMNS
    }
}

/// Build the area × month pivot from detail records
///
/// **Public** - adapter entry point
pub fn build_area_matrix(records: &[ActivityRecord]) -> AreaMonthMatrix {
    let mut cells: BTreeMap<String, [u64; MONTH_COUNT]> = BTreeMap::new();

    for record in records {
        let totals = cells
            .entry(record.area.clone())
            .or_insert([0u64; MONTH_COUNT]);
        for (total, &count) in totals.iter_mut().zip(&record.month_counts) {
            *total += u64::from(count);
        }
    }

    debug!("Pivoted {} records into {} areas", records.len(), cells.len());

    AreaMonthMatrix { cells }
}

/// Records for a single area, for the focused detail view.
///
/// A pure selection over the input; the pivot computed for other
/// areas is unaffected by filtering.
pub fn filter_by_area(records: &[ActivityRecord], area: &str) -> Vec<ActivityRecord> {
    records
        .iter()
        .filter(|record| record.area == area)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(area: &str, counts: [u32; MONTH_COUNT]) -> ActivityRecord {
        ActivityRecord {
            person: "User 1".to_string(),
            advisor: "Advisor 1".to_string(),
            area: area.to_string(),
            month_counts: counts,
            passthrough: BTreeMap::new(),
        }
    }

    fn counts(january: u32, february: u32) -> [u32; MONTH_COUNT] {
        let mut counts = [0u32; MONTH_COUNT];
        counts[0] = january;
        counts[1] = february;
        counts
    }

    #[test]
    fn test_sums_per_area_and_month() {
        let records = vec![
            record("A", counts(2, 3)),
            record("A", counts(1, 0)),
            record("B", counts(5, 5)),
        ];

        let matrix = build_area_matrix(&records);

        assert_eq!(matrix.area_count(), 2);
        assert_eq!(matrix.counts_for("A").unwrap()[0], 3);
        assert_eq!(matrix.counts_for("A").unwrap()[1], 3);
        assert_eq!(matrix.counts_for("B").unwrap()[0], 5);
        assert!(matrix.counts_for("C").is_none());
    }

    #[test]
    fn test_row_order_within_group_is_irrelevant() {
        let forward = vec![record("A", counts(2, 3)), record("A", counts(1, 0))];
        let reversed: Vec<ActivityRecord> = forward.iter().rev().cloned().collect();

        assert_eq!(build_area_matrix(&forward), build_area_matrix(&reversed));
    }

    #[test]
    fn test_conservation_per_month() {
        let records = vec![
            record("A", counts(2, 3)),
            record("B", counts(1, 4)),
            record("A", counts(7, 0)),
        ];

        let matrix = build_area_matrix(&records);

        for month in 0..MONTH_COUNT {
            let column_sum: u64 = records
                .iter()
                .map(|r| u64::from(r.month_counts[month]))
                .sum();
            assert_eq!(matrix.month_total(month), column_sum);
        }
        assert_eq!(matrix.grand_total(), 17);
    }

    #[test]
    fn test_areas_iterate_in_key_order() {
        let records = vec![
            record("Sur", counts(1, 0)),
            record("Norte", counts(1, 0)),
            record("Centro", counts(1, 0)),
        ];

        let matrix = build_area_matrix(&records);
        let areas: Vec<&str> = matrix.areas().collect();
        assert_eq!(areas, vec!["Centro", "Norte", "Sur"]);
    }

    #[test]
    fn test_empty_records_build_empty_matrix() {
        let matrix = build_area_matrix(&[]);
        assert_eq!(matrix.area_count(), 0);
        assert_eq!(matrix.grand_total(), 0);
    }

    #[test]
    fn test_filter_is_a_pure_subset() {
        let records = vec![
            record("A", counts(1, 0)),
            record("B", counts(2, 0)),
            record("A", counts(3, 0)),
        ];

        let filtered = filter_by_area(&records, "A");
        let complement = filter_by_area(&records, "B");

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.area == "A"));
        assert_eq!(filtered.len() + complement.len(), records.len());
        assert!(filter_by_area(&records, "missing").is_empty());
    }
}
