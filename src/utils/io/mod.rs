//! IO utilities for the run outputs
//!
//! This module writes the enriched collections as pretty JSON and, when
//! enabled, a flat Parquet projection of the fully enriched records.

pub mod json;
pub mod output;
pub mod parquet;

// Re-export commonly used functions for convenience
pub use json::write_json;
pub use output::{OutputPaths, write_outputs};
pub use self::parquet::{ExportRow, write_parquet};
