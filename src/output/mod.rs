//! Persisted output for the anonymized detail table.
//!
//! One format, one side effect: a versioned JSON snapshot of the
//! anonymized table, with read-back for reuse across views.

pub mod json;

// Re-export main functions
pub use json::{read_snapshot, write_snapshot, Snapshot};
