//! Enrichment algorithms
//!
//! This module contains the building blocks of an enrichment run: key
//! normalization, lookup indices, language family resolution, the record
//! enrichers and coverage reporting.

pub mod enrich;
pub mod family;
pub mod index;
pub mod normalize;
pub mod report;

// Re-export key types
pub use enrich::{DimensionTally, EnrichmentPass, MatchTally};
pub use family::{FamilyMap, FamilyResolution, FamilyResolver, Tier};
pub use index::{Candidates, CollisionPolicy, KeyRule, MultiIndex, UniqueIndex};
pub use normalize::{KeySet, normalize_keys};
pub use report::{CoverageReport, RunMetadata};
