//! A Rust library for enriching people-group, language and country data with
//! geographic coordinates, language families and denormalized profiles.

pub mod algorithm;
pub mod async_io;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{EnrichConfig, InputPaths};
pub use error::{EnrichError, Result};
pub use pipeline::{RunOutput, run};

// Model types
pub use models::{
    Country, CountryCentroid, CountryGeo, Denormalized, Dialect, Dimension, Enriched, Language,
    LanguageGeo, Languoid, PeopleGroup,
};

// Algorithm building blocks
pub use algorithm::{
    CollisionPolicy, CoverageReport, FamilyMap, FamilyResolver, MatchTally, MultiIndex,
    RunMetadata, UniqueIndex, normalize_keys,
};

// Loading and output
pub use async_io::{Collections, load_collections};
pub use utils::io::{OutputPaths, write_outputs};
