//! Log line helpers
//!
//! File reads and writes log one line when they start and one when they
//! finish. Enrichment passes log their coverage and a sample of the keys
//! that found nothing.

use std::path::Path;
use std::time::Duration;

use crate::algorithm::report::CoverageReport;

/// Log the start of a file read or write
///
/// # Arguments
/// * `operation` - What is being done, e.g. `"Writing JSON to"`
/// * `path` - The file being read or written
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation} {}", path.display());
}

/// Log a finished file read or write
///
/// # Arguments
/// * `operation` - Past tense verb, e.g. `"loaded"`
/// * `path` - The file that was read or written
/// * `records` - Number of records in the file
/// * `elapsed` - Time taken, if measured
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    records: usize,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(elapsed) => log::info!(
            "Successfully {operation} {records} records ({}) in {elapsed:?}",
            path.display()
        ),
        None => log::info!(
            "Successfully {operation} {records} records ({})",
            path.display()
        ),
    }
}

/// Log the outcome of one lookup dimension of a pass
///
/// Coverage goes to `info`; unmatched keys, if any, to `warn`.
pub fn log_coverage(report: &CoverageReport, what: &str) {
    log::info!(
        "Matched {} / {} {what} ({})",
        report.matched,
        report.total,
        report.coverage
    );
    if report.ambiguous > 0 {
        log::info!("{} {what} matched several reference entries", report.ambiguous);
    }
    if !report.unmatched_sample.is_empty() {
        log::warn!(
            "{} unmatched {} keys (sample): {}",
            report.unmatched_keys,
            report.dimension,
            report.unmatched_sample.join(", ")
        );
    }
}
