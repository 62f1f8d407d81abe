//! Pretty JSON output

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use crate::error::{EnrichError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Bytes per megabyte, for size logging
const MEGABYTE: f64 = 1024.0 * 1024.0;

/// Write a value as indented UTF-8 JSON
///
/// # Errors
/// Returns an error if the file cannot be created or the value cannot be
/// serialized.
pub fn write_json<T>(path: &Path, value: &T, items: usize) -> Result<()>
where
    T: Serialize + ?Sized,
{
    log_operation_start("Writing JSON to", path);
    let start = Instant::now();

    let file = File::create(path).map_err(|e| EnrichError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(|e| EnrichError::io(path, e))?;

    log_operation_complete("wrote", path, items, Some(start.elapsed()));
    log_file_size(path);
    Ok(())
}

/// Log the size of a written file at debug level
#[allow(clippy::cast_precision_loss)]
pub(crate) fn log_file_size(path: &Path) {
    if let Ok(metadata) = std::fs::metadata(path) {
        log::debug!(
            "{} is {:.2} MB",
            path.display(),
            metadata.len() as f64 / MEGABYTE
        );
    }
}
