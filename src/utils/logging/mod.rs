//! Logging utilities for output and progress tracking
//!
//! This module provides utilities for consistent log lines and progress bars.

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use log::{log_coverage, log_operation_complete, log_operation_start};
pub use progress::{finish_progress_bar, pass_progress_bar};
