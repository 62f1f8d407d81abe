//! Parquet export of fully enriched people groups
//!
//! The open source fields do not have a fixed schema, so the export uses a
//! flat projection with one column per key, name and embedded profile field.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow_schema::FieldRef;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};

use super::json::log_file_size;
use crate::algorithm::enrich::denormalize::DenormalizedGroup;
use crate::error::{EnrichError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// One row of the Parquet export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub country_code: Option<String>,
    pub people_id: Option<String>,
    pub people_name: Option<String>,
    pub population: Option<f64>,
    pub language_code: Option<String>,
    pub least_reached: bool,
    pub country_name: Option<String>,
    pub continent: Option<String>,
    pub region: Option<String>,
    pub percent_christianity: Option<f64>,
    pub percent_evangelical: Option<f64>,
    pub jp_scale: Option<String>,
    pub language_name: Option<String>,
    pub bible_status: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub glottocode: Option<String>,
    pub family_name: Option<String>,
    pub family_id: Option<String>,
    pub macroarea: Option<String>,
}

impl From<&DenormalizedGroup> for ExportRow {
    fn from(enriched: &DenormalizedGroup) -> Self {
        let group = &enriched.record;
        let country = enriched.extension.country_data.as_ref();
        let language = enriched.extension.language_data.as_ref();

        Self {
            country_code: group.key.country_code.clone(),
            people_id: group.key.people_id.clone(),
            people_name: group.name(),
            population: group.population(),
            language_code: group.language_code.clone(),
            least_reached: group.least_reached,
            country_name: country.and_then(|c| c.name.clone()),
            continent: country.and_then(|c| c.continent.clone()),
            region: country.and_then(|c| c.region.clone()),
            percent_christianity: country.and_then(|c| c.percent_christianity),
            percent_evangelical: country.and_then(|c| c.percent_evangelical),
            jp_scale: country.and_then(|c| c.jp_scale.clone()),
            language_name: language.and_then(|l| l.name.clone()),
            bible_status: language.and_then(|l| l.bible_status),
            latitude: language.and_then(|l| l.latitude),
            longitude: language.and_then(|l| l.longitude),
            glottocode: language.and_then(|l| l.glottocode.clone()),
            family_name: language.and_then(|l| l.family_name.clone()),
            family_id: language.and_then(|l| l.family_id.clone()),
            macroarea: language.and_then(|l| l.macroarea.clone()),
        }
    }
}

/// Arrow fields of [`ExportRow`]
///
/// # Errors
/// Returns an error if the schema cannot be traced
pub fn export_fields() -> Result<Vec<FieldRef>> {
    Ok(Vec::<FieldRef>::from_type::<ExportRow>(
        TracingOptions::default(),
    )?)
}

/// Write the export projection of `records` as a Snappy compressed Parquet file
///
/// # Errors
/// Returns an error if the conversion to Arrow or the Parquet write fails
pub fn write_parquet(path: &Path, records: &[&DenormalizedGroup]) -> Result<()> {
    log_operation_start("Writing Parquet to", path);
    let start = Instant::now();

    let rows: Vec<ExportRow> = records.iter().map(|record| ExportRow::from(*record)).collect();
    let fields = export_fields()?;
    let batch = serde_arrow::to_record_batch(&fields, &rows)?;

    let file = File::create(path).map_err(|e| EnrichError::io(path, e))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    log_operation_complete("wrote", path, rows.len(), Some(start.elapsed()));
    log_file_size(path);
    Ok(())
}
