//! In-memory tabular representation exchanged with the I/O collaborator.
//!
//! The core never reads delimited files itself. The caller parses
//! whatever source it has into a `RawTable` (header plus string cells)
//! and hands it in; results flow back out the same way.

use serde::{Deserialize, Serialize};

use crate::utils::error::SchemaError;

/// A rectangular table of string cells with named columns.
///
/// Missing/null cells are represented as empty strings. Rows keep
/// their source order; nothing in the pipeline re-sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create an empty table with the given header
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a data row
    ///
    /// # Errors
    /// `SchemaError::RaggedRow` if the row width does not match the header
    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), SchemaError> {
        if row.len() != self.columns.len() {
            return Err(SchemaError::RaggedRow {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Rebuild a table from a header and rows (snapshot read-back)
    ///
    /// # Errors
    /// `SchemaError::RaggedRow` on the first row of mismatched width
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, SchemaError> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Column header, in source order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, in source order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    ///
    /// Lookups are case- and accent-sensitive: the column contract is
    /// fixed at the source and never normalized here.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// True if the table carries the named column
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// All values of one column, in row order
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Names from `required` that this table lacks
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect()
    }
}
