//! Identity anonymization over raw detail tables.
//!
//! This module handles:
//! - Building one independently numbered map per identity column
//! - Rewriting the identity columns of a detail table
//! - Persisting the anonymized result for reuse
//!
//! Replacement is irreversible: once a column is rewritten, the real
//! values exist nowhere in the outputs and no reverse lookup is
//! exposed.

pub mod identity_map;

// Re-export main types
pub use identity_map::{anonymize_column, IdentityMap};

use log::info;
use std::path::Path;

use crate::output;
use crate::table::RawTable;
use crate::utils::config::PipelineConfig;
use crate::utils::error::{PipelineError, SchemaError};

/// Anonymize the identity columns of a detail table.
///
/// **Public** - adapter entry point
///
/// # Arguments
/// * `table` - Raw detail table, identity columns still real
/// * `config` - Names the identity columns and label prefixes
///
/// # Returns
/// A new table with the person and advisor columns replaced by
/// synthetic labels. All other columns are copied untouched. The two
/// maps are numbered independently, so "User 3" and "Advisor 3" may
/// coexist; the numeric collision carries no meaning.
///
/// # Errors
/// `SchemaError::MissingColumns` if either identity column is absent.
/// A renamed identity column must stop the run here, before a
/// snapshot with real names can ever be published.
pub fn anonymize_table(
    table: &RawTable,
    config: &PipelineConfig,
) -> Result<RawTable, SchemaError> {
    let mut missing = Vec::new();
    let person_idx = table.column_index(&config.person_column);
    if person_idx.is_none() {
        missing.push(config.person_column.clone());
    }
    let advisor_idx = table.column_index(&config.advisor_column);
    if advisor_idx.is_none() {
        missing.push(config.advisor_column.clone());
    }
    let (Some(person_idx), Some(advisor_idx)) = (person_idx, advisor_idx) else {
        return Err(SchemaError::MissingColumns {
            table: "detail",
            columns: missing,
        });
    };

    let person_values: Vec<&str> = table.rows().iter().map(|r| r[person_idx].as_str()).collect();
    let advisor_values: Vec<&str> = table
        .rows()
        .iter()
        .map(|r| r[advisor_idx].as_str())
        .collect();

    let (person_map, person_labels) = anonymize_column(&config.person_prefix, &person_values);
    let (advisor_map, advisor_labels) = anonymize_column(&config.advisor_prefix, &advisor_values);

    info!(
        "Anonymized {} person and {} advisor identities across {} rows",
        person_map.len(),
        advisor_map.len(),
        table.len()
    );

    let mut anonymized = RawTable::new(table.columns().to_vec());
    for (row_idx, row) in table.rows().iter().enumerate() {
        let mut cells = row.clone();
        cells[person_idx] = person_labels[row_idx].clone();
        cells[advisor_idx] = advisor_labels[row_idx].clone();
        anonymized.push_row(cells)?;
    }

    Ok(anonymized)
}

/// Anonymize a detail table and persist the result for reuse.
///
/// **Public** - the offline publication step
///
/// Running this twice over the same input produces the same columns
/// and rows (only the snapshot timestamp differs). Running it over
/// changed input produces a fresh labeling with no relation to any
/// previous run.
///
/// # Errors
/// * `PipelineError::Schema` - identity column absent
/// * `PipelineError::Output` - snapshot could not be written
pub fn anonymize_and_persist(
    table: &RawTable,
    output_path: impl AsRef<Path>,
    config: &PipelineConfig,
) -> Result<RawTable, PipelineError> {
    let anonymized = anonymize_table(table, config)?;
    output::write_snapshot(&anonymized, output_path, config)?;
    Ok(anonymized)
}
