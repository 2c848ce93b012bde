//! JSON snapshot writer for the anonymized detail table.
//!
//! The anonymized table is the pipeline's one persisted side effect:
//! written once, then reused by the presentation layer instead of
//! re-anonymizing per view. It is stored as a versioned, timestamped
//! envelope. Delimited-text encoding stays with the I/O collaborator;
//! this format is owned here.

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::table::RawTable;
use crate::utils::config::PipelineConfig;
use crate::utils::error::OutputError;

/// Envelope persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot schema version for compatibility checking
    pub version: String,

    /// Timestamp when the snapshot was generated
    pub generated_at: String,

    /// Column header of the anonymized table
    pub columns: Vec<String>,

    /// Data rows of the anonymized table
    pub rows: Vec<Vec<String>>,
}

/// Write an anonymized table to a JSON snapshot file
///
/// **Public** - main entry point for snapshot output
///
/// # Arguments
/// * `table` - Anonymized detail table
/// * `output_path` - Path to the snapshot file
/// * `config` - Supplies the version stamp
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_snapshot(
    table: &RawTable,
    output_path: impl AsRef<Path>,
    config: &PipelineConfig,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing anonymized snapshot to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let snapshot = Snapshot {
        version: config.snapshot_version.clone(),
        generated_at: Utc::now().to_rfc3339(),
        columns: table.columns().to_vec(),
        rows: table.rows().to_vec(),
    };

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &snapshot).map_err(OutputError::SerializationFailed)?;

    info!("Snapshot written ({} rows)", table.len());

    Ok(())
}

/// Read a snapshot back into a table
///
/// **Public** - used to reuse a published snapshot across views
///
/// # Errors
/// * `OutputError::WriteFailed` - file read error
/// * `OutputError::SerializationFailed` - JSON parse error
/// * `OutputError::MalformedSnapshot` - rows of uneven width
pub fn read_snapshot(input_path: impl AsRef<Path>) -> Result<RawTable, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading snapshot from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let snapshot: Snapshot =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Snapshot loaded: version {}, generated {}",
        snapshot.version, snapshot.generated_at
    );

    RawTable::from_parts(snapshot.columns, snapshot.rows)
        .map_err(|e| OutputError::MalformedSnapshot(e.to_string()))
}

/// Validate that the output path is usable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RawTable {
        let mut table = RawTable::new(vec!["Nombre".to_string(), "Ene".to_string()]);
        table
            .push_row(vec!["User 1".to_string(), "3".to_string()])
            .unwrap();
        table
            .push_row(vec!["User 2".to_string(), "5".to_string()])
            .unwrap();
        table
    }

    #[test]
    fn test_write_and_read_snapshot() {
        let table = sample_table();
        let temp_file = tempfile::NamedTempFile::new().unwrap();

        write_snapshot(&table, temp_file.path(), &PipelineConfig::default()).unwrap();
        let loaded = read_snapshot(temp_file.path()).unwrap();

        assert_eq!(loaded, table);
    }

    #[test]
    fn test_rewriting_same_table_is_stable() {
        let table = sample_table();
        let config = PipelineConfig::default();
        let first = tempfile::NamedTempFile::new().unwrap();
        let second = tempfile::NamedTempFile::new().unwrap();

        write_snapshot(&table, first.path(), &config).unwrap();
        write_snapshot(&table, second.path(), &config).unwrap();

        // Timestamps may differ; the table contents must not
        assert_eq!(
            read_snapshot(first.path()).unwrap(),
            read_snapshot(second.path()).unwrap()
        );
    }

    #[test]
    fn test_validate_output_path_empty() {
        assert!(validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_output_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/snapshot.json");

        write_snapshot(&sample_table(), &nested_path, &PipelineConfig::default()).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_snapshot_carries_version_stamp() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        write_snapshot(&sample_table(), temp_file.path(), &PipelineConfig::default()).unwrap();

        let raw = std::fs::read_to_string(temp_file.path()).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(snapshot.version, PipelineConfig::default().snapshot_version);
        assert!(!snapshot.generated_at.is_empty());
    }
}
