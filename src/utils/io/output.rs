//! Persisting a finished run

use std::fs;
use std::path::{Path, PathBuf};

use super::json::write_json;
use super::parquet::write_parquet;
use crate::error::{EnrichError, Result};
use crate::pipeline::RunOutput;

pub const PEOPLE_GROUPS_GEO_FILE: &str = "joshua_project_enriched_geo.json";
pub const LANGUAGES_GEO_FILE: &str = "joshua_project_languages_enriched_geo.json";
pub const ENRICHED_FILE: &str = "joshua_project_enriched.json";
pub const UNREACHED_FILE: &str = "joshua_project_unreached.json";
pub const METADATA_FILE: &str = "enrichment_metadata.json";
pub const ENRICHED_PARQUET_FILE: &str = "joshua_project_enriched.parquet";
pub const UNREACHED_PARQUET_FILE: &str = "joshua_project_unreached.parquet";

/// Locations of every output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub people_groups_geo: PathBuf,
    pub languages_geo: PathBuf,
    pub enriched: PathBuf,
    pub unreached: PathBuf,
    pub metadata: PathBuf,
    pub enriched_parquet: PathBuf,
    pub unreached_parquet: PathBuf,
}

impl OutputPaths {
    /// Default file layout inside an output directory
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            people_groups_geo: dir.join(PEOPLE_GROUPS_GEO_FILE),
            languages_geo: dir.join(LANGUAGES_GEO_FILE),
            enriched: dir.join(ENRICHED_FILE),
            unreached: dir.join(UNREACHED_FILE),
            metadata: dir.join(METADATA_FILE),
            enriched_parquet: dir.join(ENRICHED_PARQUET_FILE),
            unreached_parquet: dir.join(UNREACHED_PARQUET_FILE),
        }
    }
}

/// Write every output of a run into `output_dir`
///
/// Returns the paths of the files that were written.
///
/// # Errors
/// Returns the first write failure
pub fn write_outputs(
    output: &RunOutput,
    output_dir: &Path,
    with_parquet: bool,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|e| EnrichError::io(output_dir, e))?;
    let paths = OutputPaths::in_dir(output_dir);
    let unreached = output.unreached();

    write_json(
        &paths.people_groups_geo,
        &output.people_groups_geo.records,
        output.people_groups_geo.len(),
    )?;
    write_json(
        &paths.languages_geo,
        &output.languages_geo.records,
        output.languages_geo.len(),
    )?;
    write_json(&paths.enriched, &output.enriched.records, output.enriched.len())?;
    write_json(&paths.unreached, &unreached, unreached.len())?;
    write_json(&paths.metadata, &output.metadata, 1)?;

    let mut written = vec![
        paths.people_groups_geo,
        paths.languages_geo,
        paths.enriched,
        paths.unreached,
        paths.metadata,
    ];

    if with_parquet {
        let all: Vec<_> = output.enriched.records.iter().collect();
        write_parquet(&paths.enriched_parquet, &all)?;
        write_parquet(&paths.unreached_parquet, &unreached)?;
        written.push(paths.enriched_parquet);
        written.push(paths.unreached_parquet);
    }

    Ok(written)
}
