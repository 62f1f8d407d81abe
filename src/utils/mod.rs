//! Utility functions for logging, progress and output files

pub mod io;
pub mod logging;

// Re-export commonly used functions for convenience
pub use io::{OutputPaths, write_json, write_outputs, write_parquet};
pub use logging::{log_coverage, log_operation_complete, log_operation_start};
