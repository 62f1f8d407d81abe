//! Configuration for an enrichment run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::algorithm::index::CollisionPolicy;
use crate::error::{EnrichError, Result};

/// Default file names of the input collections inside the data directory
pub const PEOPLE_GROUPS_FILE: &str = "joshua_project_full_dump.json";
pub const LANGUAGES_FILE: &str = "joshua_project_languages.json";
pub const COUNTRIES_FILE: &str = "joshua_project_countries.json";
pub const CENTROIDS_FILE: &str = "country_centroids.json";
pub const GLOTTOLOG_COORDINATES_FILE: &str = "glottolog_coordinates.json";
pub const GLOTTOLOG_LANGUOID_FILE: &str = "glottolog_languoid.csv";

/// Number of unmatched keys sampled into each coverage report
pub const DEFAULT_UNMATCHED_SAMPLE: usize = 5;

/// Environment variables read by [`EnrichConfig::from_env`]
pub const ENV_DATA_DIR: &str = "ATLAS_DATA_DIR";
pub const ENV_OUTPUT_DIR: &str = "ATLAS_OUTPUT_DIR";
pub const ENV_UNMATCHED_SAMPLE: &str = "ATLAS_UNMATCHED_SAMPLE";
pub const ENV_COLLISION_POLICY: &str = "ATLAS_COLLISION_POLICY";
pub const ENV_WRITE_PARQUET: &str = "ATLAS_WRITE_PARQUET";
pub const ENV_PROGRESS: &str = "ATLAS_PROGRESS";

/// Locations of the six input collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    /// People-group records (primary)
    pub people_groups: PathBuf,
    /// Language records (primary for the language pass)
    pub languages: PathBuf,
    /// Country profile records
    pub countries: PathBuf,
    /// Natural Earth country centroids
    pub centroids: PathBuf,
    /// Glottolog languages and dialects with coordinates
    pub dialects: PathBuf,
    /// Glottolog languoid table (family hierarchy)
    pub languoids: PathBuf,
}

impl InputPaths {
    /// Default file layout inside a data directory
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            people_groups: dir.join(PEOPLE_GROUPS_FILE),
            languages: dir.join(LANGUAGES_FILE),
            countries: dir.join(COUNTRIES_FILE),
            centroids: dir.join(CENTROIDS_FILE),
            dialects: dir.join(GLOTTOLOG_COORDINATES_FILE),
            languoids: dir.join(GLOTTOLOG_LANGUOID_FILE),
        }
    }
}

/// Configuration for an enrichment run
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Directory the inputs were resolved from
    pub data_dir: PathBuf,
    /// Directory the outputs are written to
    pub output_dir: PathBuf,
    /// Input collection paths
    pub inputs: InputPaths,
    /// How many unmatched keys each coverage report lists
    pub unmatched_sample: usize,
    /// Policy for key collisions in single-valued indices
    pub collision_policy: CollisionPolicy,
    /// Whether to also export Parquet files
    pub write_parquet: bool,
    /// Whether to draw progress bars during the passes
    pub show_progress: bool,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self::from_data_dir(".")
    }
}

impl EnrichConfig {
    /// Configuration reading from and writing to the same directory
    #[must_use]
    pub fn from_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            inputs: InputPaths::in_dir(&data_dir),
            output_dir: data_dir.clone(),
            data_dir,
            unmatched_sample: DEFAULT_UNMATCHED_SAMPLE,
            collision_policy: CollisionPolicy::default(),
            write_parquet: true,
            show_progress: true,
        }
    }

    /// Point the inputs at another data directory
    ///
    /// The output directory follows along unless it was set explicitly.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        if self.output_dir == self.data_dir {
            self.output_dir.clone_from(&data_dir);
        }
        self.inputs = InputPaths::in_dir(&data_dir);
        self.data_dir = data_dir;
        self
    }

    /// Write outputs to another directory
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Build the configuration from `ATLAS_*` environment variables
    ///
    /// Unset variables keep their defaults; set but unparsable values are an
    /// error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            config = config.with_data_dir(dir);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            config = config.with_output_dir(dir);
        }
        if let Some(sample) = parse_var::<usize>(&lookup, ENV_UNMATCHED_SAMPLE)? {
            config.unmatched_sample = sample;
        }
        if let Some(policy) = parse_var::<CollisionPolicy>(&lookup, ENV_COLLISION_POLICY)? {
            config.collision_policy = policy;
        }
        if let Some(flag) = lookup(ENV_WRITE_PARQUET) {
            config.write_parquet = parse_flag(ENV_WRITE_PARQUET, &flag)?;
        }
        if let Some(flag) = lookup(ENV_PROGRESS) {
            config.show_progress = parse_flag(ENV_PROGRESS, &flag)?;
        }

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| EnrichError::Config(format!("{name}={raw}: {e}")))
        })
        .transpose()
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(EnrichError::Config(format!(
            "{name}={raw}: expected true/false"
        ))),
    }
}

impl fmt::Display for EnrichConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Enrichment Configuration:")?;
        writeln!(f, "  Data Directory: {}", self.data_dir.display())?;
        writeln!(f, "  Output Directory: {}", self.output_dir.display())?;
        writeln!(f, "  Unmatched Sample: {}", self.unmatched_sample)?;
        writeln!(f, "  Collision Policy: {}", self.collision_policy)?;
        writeln!(f, "  Write Parquet: {}", self.write_parquet)?;
        write!(f, "  Show Progress: {}", self.show_progress)
    }
}
