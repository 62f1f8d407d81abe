//! Input collection loader
//!
//! All six collections are read concurrently with `tokio::fs`. JSON arrays
//! are decoded with `serde_json`, the languoid table with `csv`. Any failure
//! aborts the whole load.

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

use serde::de::DeserializeOwned;
use tokio::fs;

use crate::algorithm::report::SourceCounts;
use crate::config::InputPaths;
use crate::error::{EnrichError, Result};
use crate::models::{Country, CountryCentroid, Dialect, Language, Languoid, PeopleGroup};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Collection names used in logs and errors
pub const PEOPLE_GROUPS: &str = "people groups";
pub const LANGUAGES: &str = "languages";
pub const COUNTRIES: &str = "countries";
pub const CENTROIDS: &str = "country centroids";
pub const DIALECTS: &str = "glottolog coordinates";
pub const LANGUOIDS: &str = "glottolog languoids";

/// Non-finite number tokens some exporters write into JSON
const NON_FINITE_TOKENS: [&[u8]; 3] = [b"-Infinity", b"Infinity", b"NaN"];

/// Every input collection of a run, fully loaded
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub people_groups: Vec<PeopleGroup>,
    pub languages: Vec<Language>,
    pub countries: Vec<Country>,
    pub centroids: Vec<CountryCentroid>,
    pub dialects: Vec<Dialect>,
    pub languoids: Vec<Languoid>,
}

impl Collections {
    /// Record count of every collection
    #[must_use]
    pub fn counts(&self) -> SourceCounts {
        SourceCounts {
            people_groups: self.people_groups.len(),
            languages: self.languages.len(),
            countries: self.countries.len(),
            centroids: self.centroids.len(),
            glottolog_entries: self.dialects.len(),
            languoids: self.languoids.len(),
        }
    }
}

/// Load all input collections concurrently
///
/// # Errors
/// Returns the first load failure; a missing file is reported as
/// [`EnrichError::MissingCollection`].
pub async fn load_collections(inputs: &InputPaths) -> Result<Collections> {
    let start = Instant::now();

    let (people_groups, languages, countries, centroids, dialects, languoids) = futures::try_join!(
        load_json_collection::<PeopleGroup>(PEOPLE_GROUPS, &inputs.people_groups),
        load_json_collection::<Language>(LANGUAGES, &inputs.languages),
        load_json_collection::<Country>(COUNTRIES, &inputs.countries),
        load_json_collection::<CountryCentroid>(CENTROIDS, &inputs.centroids),
        load_json_collection::<Dialect>(DIALECTS, &inputs.dialects),
        load_csv_collection::<Languoid>(LANGUOIDS, &inputs.languoids),
    )?;

    log::info!("Loaded all input collections in {:?}", start.elapsed());

    Ok(Collections {
        people_groups,
        languages,
        countries,
        centroids,
        dialects,
        languoids,
    })
}

async fn read_collection(collection: &'static str, path: &Path) -> Result<Vec<u8>> {
    fs::read(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            EnrichError::MissingCollection {
                collection,
                path: path.to_path_buf(),
            }
        } else {
            EnrichError::io(path, e)
        }
    })
}

/// Load a JSON array file into typed records
///
/// Bare `NaN`, `Infinity` and `-Infinity` tokens are read as `null`.
pub async fn load_json_collection<T>(collection: &'static str, path: &Path) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    log_operation_start(&format!("Loading {collection} from"), path);
    let start = Instant::now();

    let bytes = read_collection(collection, path).await?;
    let sanitized = sanitize_non_finite(&bytes);
    if matches!(sanitized, Cow::Owned(_)) {
        log::debug!("Replaced non-finite number tokens in {}", path.display());
    }

    let records: Vec<T> =
        serde_json::from_slice(&sanitized).map_err(|source| EnrichError::Json {
            collection,
            path: path.to_path_buf(),
            source,
        })?;

    log_operation_complete("loaded", path, records.len(), Some(start.elapsed()));
    Ok(records)
}

/// Load a CSV file with a header row into typed records
///
/// Empty cells deserialize as `None` for optional fields.
pub async fn load_csv_collection<T>(collection: &'static str, path: &Path) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    log_operation_start(&format!("Loading {collection} from"), path);
    let start = Instant::now();

    let bytes = read_collection(collection, path).await?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());

    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|source| EnrichError::Csv {
            collection,
            path: path.to_path_buf(),
            source,
        })?;

    log_operation_complete("loaded", path, records.len(), Some(start.elapsed()));
    Ok(records)
}

/// Replace non-finite number tokens outside string literals with `null`
///
/// Returns the input unchanged (borrowed) when there is nothing to replace.
#[must_use]
pub fn sanitize_non_finite(input: &[u8]) -> Cow<'_, [u8]> {
    let mut output: Option<Vec<u8>> = None;
    let mut in_string = false;
    let mut escaped = false;
    let mut pos = 0;

    while pos < input.len() {
        let byte = input[pos];
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
        } else if byte == b'"' {
            in_string = true;
        } else if let Some(token) = NON_FINITE_TOKENS
            .iter()
            .find(|token| input[pos..].starts_with(token))
        {
            output
                .get_or_insert_with(|| input[..pos].to_vec())
                .extend_from_slice(b"null");
            pos += token.len();
            continue;
        }

        if let Some(out) = output.as_mut() {
            out.push(byte);
        }
        pos += 1;
    }

    output.map_or(Cow::Borrowed(input), Cow::Owned)
}
