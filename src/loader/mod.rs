//! Shape validation and typed loading of the three input tables.
//!
//! Reading delimited text is the collaborator's job; this module
//! receives already-parsed `RawTable`s, checks for the columns the
//! downstream stages need, and coerces count cells to integers. Rows
//! are kept in source order: the monthly and quarterly tables are
//! expected to arrive chronologically sorted and are never re-sorted
//! here.

pub mod schema;

// Re-export main types
pub use schema::{ActivityRecord, LoadedTables, MonthlyAggregate, QuarterlyAggregate};

use log::{debug, warn};
use std::collections::HashSet;

use crate::table::RawTable;
use crate::utils::config::{
    PipelineConfig, COMPLETED_COLUMN, MONTH_COLUMN, MONTH_COLUMNS, MONTH_COUNT, PLANNED_COLUMN,
    QUARTER_COLUMN,
};
use crate::utils::error::SchemaError;

/// Load and validate all three tables in one call
///
/// **Public** - adapter entry point
///
/// # Arguments
/// * `monthly` - Raw monthly table (`Mes`, counts)
/// * `quarterly` - Raw quarterly table (`Trimestre`, counts)
/// * `detail` - Raw detail table, already anonymized
///
/// # Errors
/// `SchemaError` naming the offending table and column(s)
pub fn load_aggregates(
    monthly: &RawTable,
    quarterly: &RawTable,
    detail: &RawTable,
    config: &PipelineConfig,
) -> Result<LoadedTables, SchemaError> {
    Ok(LoadedTables {
        monthly: load_monthly(monthly)?,
        quarterly: load_quarterly(quarterly)?,
        detail: load_detail(detail, config)?,
    })
}

/// Load the monthly aggregate table
///
/// # Errors
/// * `SchemaError::MissingColumns` - required column absent (all
///   missing columns reported at once)
/// * `SchemaError::InvalidCount` - count cell not readable as an integer
pub fn load_monthly(table: &RawTable) -> Result<Vec<MonthlyAggregate>, SchemaError> {
    const TABLE: &str = "monthly";

    let [month_idx, completed_idx, planned_idx] =
        require_columns(table, TABLE, [MONTH_COLUMN, COMPLETED_COLUMN, PLANNED_COLUMN])?;

    let mut rows = Vec::with_capacity(table.len());
    for (row_idx, row) in table.rows().iter().enumerate() {
        let completed = parse_count(TABLE, COMPLETED_COLUMN, row_idx, &row[completed_idx])?;
        let planned = parse_count(TABLE, PLANNED_COLUMN, row_idx, &row[planned_idx])?;

        rows.push(MonthlyAggregate {
            month: row[month_idx].clone(),
            completed,
            planned,
            completion_ratio: completion_ratio(TABLE, &row[month_idx], completed, planned),
            moving_average_3: None,
        });
    }

    debug!("Loaded {} monthly rows", rows.len());
    Ok(rows)
}

/// Load the quarterly aggregate table
///
/// Same contract as [`load_monthly`] at coarser granularity.
pub fn load_quarterly(table: &RawTable) -> Result<Vec<QuarterlyAggregate>, SchemaError> {
    const TABLE: &str = "quarterly";

    let [quarter_idx, completed_idx, planned_idx] = require_columns(
        table,
        TABLE,
        [QUARTER_COLUMN, COMPLETED_COLUMN, PLANNED_COLUMN],
    )?;

    let mut rows = Vec::with_capacity(table.len());
    for (row_idx, row) in table.rows().iter().enumerate() {
        let completed = parse_count(TABLE, COMPLETED_COLUMN, row_idx, &row[completed_idx])?;
        let planned = parse_count(TABLE, PLANNED_COLUMN, row_idx, &row[planned_idx])?;

        rows.push(QuarterlyAggregate {
            quarter: row[quarter_idx].clone(),
            completed,
            planned,
            completion_ratio: completion_ratio(TABLE, &row[quarter_idx], completed, planned),
        });
    }

    debug!("Loaded {} quarterly rows", rows.len());
    Ok(rows)
}

/// Load the anonymized detail table
///
/// Requires the identity and area columns from `config` plus the
/// twelve canonical month columns (exact labels). Columns outside
/// that set are preserved per row in `passthrough`.
///
/// # Errors
/// * `SchemaError::MissingColumns` - any required column absent
/// * `SchemaError::InvalidCount` - month cell not readable as an integer
pub fn load_detail(
    table: &RawTable,
    config: &PipelineConfig,
) -> Result<Vec<ActivityRecord>, SchemaError> {
    const TABLE: &str = "detail";

    let mut missing = Vec::new();
    let mut resolve = |name: &str| match table.column_index(name) {
        Some(idx) => idx,
        None => {
            missing.push(name.to_string());
            0
        }
    };

    let person_idx = resolve(&config.person_column);
    let advisor_idx = resolve(&config.advisor_column);
    let area_idx = resolve(&config.area_column);
    let month_indices: Vec<usize> = MONTH_COLUMNS.iter().map(|name| resolve(name)).collect();

    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns {
            table: TABLE,
            columns: missing,
        });
    }

    let consumed: HashSet<usize> = [person_idx, advisor_idx, area_idx]
        .into_iter()
        .chain(month_indices.iter().copied())
        .collect();

    let mut records = Vec::with_capacity(table.len());
    for (row_idx, row) in table.rows().iter().enumerate() {
        let mut month_counts = [0u32; MONTH_COUNT];
        for (slot, (&col_idx, name)) in month_counts
            .iter_mut()
            .zip(month_indices.iter().zip(MONTH_COLUMNS))
        {
            *slot = parse_count(TABLE, name, row_idx, &row[col_idx])?;
        }

        let passthrough = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(col_idx, _)| !consumed.contains(col_idx))
            .map(|(col_idx, name)| (name.clone(), row[col_idx].clone()))
            .collect();

        records.push(ActivityRecord {
            person: row[person_idx].clone(),
            advisor: row[advisor_idx].clone(),
            area: row[area_idx].clone(),
            month_counts,
            passthrough,
        });
    }

    debug!("Loaded {} detail records", records.len());
    Ok(records)
}

/// Resolve required column names to indices, reporting every missing
/// name in one error
///
/// **Private** - internal validation
fn require_columns<const N: usize>(
    table: &RawTable,
    table_name: &'static str,
    names: [&str; N],
) -> Result<[usize; N], SchemaError> {
    let mut indices = [0usize; N];
    let mut missing = Vec::new();

    for (slot, name) in indices.iter_mut().zip(names) {
        match table.column_index(name) {
            Some(idx) => *slot = idx,
            None => missing.push(name.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(SchemaError::MissingColumns {
            table: table_name,
            columns: missing,
        })
    }
}

/// Coerce a count cell to an integer
///
/// **Private** - internal coercion
///
/// Accepts plain integers and float-formatted whole numbers ("12.0"),
/// which some exports produce. Anything else is a schema error naming
/// table, column and row.
fn parse_count(
    table: &'static str,
    column: &str,
    row: usize,
    value: &str,
) -> Result<u32, SchemaError> {
    let trimmed = value.trim();

    if let Ok(count) = trimmed.parse::<u32>() {
        return Ok(count);
    }

    match trimmed.parse::<f64>() {
        Ok(float) if float >= 0.0 && float <= u32::MAX as f64 && float.fract() == 0.0 => {
            Ok(float as u32)
        }
        _ => Err(SchemaError::InvalidCount {
            table,
            column: column.to_string(),
            row,
            value: value.to_string(),
        }),
    }
}

/// completed / planned × 100 with the zero-planned guard.
///
/// A zero denominator is a defined fallback, not an error; it is
/// logged so the gap stays visible downstream.
fn completion_ratio(table: &'static str, label: &str, completed: u32, planned: u32) -> f64 {
    if planned == 0 {
        warn!("{table} row '{label}': planned count is 0, completion ratio defaults to 0");
        return 0.0;
    }
    f64::from(completed) / f64::from(planned) * 100.0
}
