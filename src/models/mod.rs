//! Data models for the enrichment pipeline
//!
//! Primary and country-profile records keep every source field verbatim and
//! expose their join keys as typed values. Reference records from Natural
//! Earth and Glottolog are fully typed. Enrichment results pair a record with
//! an extension struct whose fields never overlap the record's own.

pub mod country;
pub mod enriched;
pub mod fields;
pub mod glottolog;
pub mod language;
pub mod people_group;

pub use country::{Country, CountryCentroid};
pub use enriched::{
    CountryData, CountryGeo, Denormalized, Dimension, Enriched, LanguageData, LanguageGeo,
    LookupTrace,
};
pub use fields::{FieldMap, FieldSet, Record};
pub use glottolog::{Dialect, Languoid, LanguoidLevel};
pub use language::Language;
pub use people_group::{PeopleGroup, PeopleGroupKey};
