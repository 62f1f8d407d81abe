//! Error handling for the enrichment pipeline.
//!
//! Only structural failures surface here: a collection that cannot be read or
//! decoded, an export that cannot be written, or a key collision under the
//! rejecting index policy. Missing or unresolvable keys on individual records
//! are never errors.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Specialized error type for the enrichment pipeline
#[derive(Debug, Error)]
pub enum EnrichError {
    /// A required input collection does not exist
    #[error("required collection '{collection}' not found at {}", path.display())]
    MissingCollection {
        collection: &'static str,
        path: PathBuf,
    },

    /// Error opening, reading or writing a file
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A JSON collection could not be decoded
    #[error("failed to decode {collection} from {}: {source}", path.display())]
    Json {
        collection: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A CSV collection could not be decoded
    #[error("failed to decode {collection} from {}: {source}", path.display())]
    Csv {
        collection: &'static str,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Two reference records produced the same key under `CollisionPolicy::Reject`
    #[error("duplicate key '{key}' in index '{index}'")]
    DuplicateKey { index: &'static str, key: String },

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Error serializing output
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Error converting records to Arrow
    #[error("arrow conversion error: {0}")]
    SerdeArrow(#[from] serde_arrow::Error),

    /// Error building Arrow data
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error writing Parquet data
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

impl EnrichError {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the error is a structural load failure of an input collection
    #[must_use]
    pub const fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingCollection { .. } | Self::Json { .. } | Self::Csv { .. }
        )
    }
}

/// Result type for enrichment operations
pub type Result<T> = std::result::Result<T, EnrichError>;
