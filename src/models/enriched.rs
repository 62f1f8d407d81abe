//! Enriched records and the field sets attached by each pass

use std::borrow::Cow;
use std::fmt;

use atlas_macros::FieldSet;
use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use smallvec::SmallVec;

use super::fields::{FieldSet, Record};
use crate::algorithm::normalize::KeySet;

/// The lookup a trace or coverage report refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// People group → country centroid
    Country,
    /// Language → Glottolog dialect
    Language,
    /// People group → country profile
    CountryData,
    /// People group → geo-enriched language profile
    LanguageData,
}

impl Dimension {
    /// Stable snake case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Language => "language",
            Self::CountryData => "country_data",
            Self::LanguageData => "language_data",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one lookup for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTrace {
    pub dimension: Dimension,
    /// Normalized keys that were tried, in order
    pub keys: KeySet,
    /// The key that produced the match
    pub matched_key: Option<String>,
    /// Number of reference candidates under the matched key
    pub candidates: usize,
}

impl LookupTrace {
    /// A lookup that matched `key` with `candidates` reference records
    #[must_use]
    pub fn hit(dimension: Dimension, keys: KeySet, key: &str, candidates: usize) -> Self {
        Self {
            dimension,
            keys,
            matched_key: Some(key.to_owned()),
            candidates,
        }
    }

    /// A lookup that matched nothing
    #[must_use]
    pub const fn miss(dimension: Dimension, keys: KeySet) -> Self {
        Self {
            dimension,
            keys,
            matched_key: None,
            candidates: 0,
        }
    }

    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.matched_key.is_some()
    }

    /// A miss on a record that had no key at all
    #[must_use]
    pub fn is_keyless(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Prefix given to a source field whose name is also an added field name
pub const SOURCE_FIELD_PREFIX: &str = "source_";

/// A primary record together with the fields one pass attached to it
///
/// Serializes as the record's original fields followed by the extension's
/// fields. The lookup traces are kept for reporting only.
#[derive(Debug, Clone, PartialEq)]
pub struct Enriched<R, E> {
    pub record: R,
    pub extension: E,
    pub traces: SmallVec<[LookupTrace; 2]>,
}

impl<R, E> Enriched<R, E>
where
    R: Record,
    E: FieldSet,
{
    /// Pair an unmodified copy of `source` with an extension
    pub fn from_source<I>(source: &R, extension: E, traces: I) -> Self
    where
        I: IntoIterator<Item = LookupTrace>,
    {
        if E::FIELD_NAMES
            .iter()
            .any(|name| source.field(name).is_some())
        {
            log::debug!("Source record already carries added field names; keeping them prefixed");
        }

        Self {
            record: R::from_fields(source.fields().clone()),
            extension,
            traces: traces.into_iter().collect(),
        }
    }

    /// Serialized name of a source field
    ///
    /// Source fields named like an added field are written with
    /// [`SOURCE_FIELD_PREFIX`], so neither value is lost and no key repeats.
    #[must_use]
    pub fn source_field_name(name: &str) -> Cow<'_, str> {
        if E::FIELD_NAMES.contains(&name) {
            Cow::Owned(format!("{SOURCE_FIELD_PREFIX}{name}"))
        } else {
            Cow::Borrowed(name)
        }
    }
}

impl<R, E> Serialize for Enriched<R, E>
where
    R: Record,
    E: FieldSet + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let added = match serde_json::to_value(&self.extension).map_err(S::Error::custom)? {
            Value::Object(fields) => fields,
            other => {
                return Err(S::Error::custom(format!(
                    "extension must serialize as a map, got {other}"
                )));
            }
        };

        let source = self.record.fields();
        let mut map = serializer.serialize_map(Some(source.len() + added.len()))?;
        for (name, value) in source {
            map.serialize_entry(Self::source_field_name(name).as_ref(), value)?;
        }
        for (name, value) in &added {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<R, E> Enriched<R, E> {
    /// Trace of the lookup for `dimension`, if the pass performed one
    #[must_use]
    pub fn trace(&self, dimension: Dimension) -> Option<&LookupTrace> {
        self.traces.iter().find(|trace| trace.dimension == dimension)
    }
}

/// Country centroid fields attached to a people group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FieldSet)]
#[field_set(provenance = "Natural Earth (country centroid)")]
pub struct CountryGeo {
    pub country_latitude: Option<f64>,
    pub country_longitude: Option<f64>,
    pub continent: Option<String>,
    pub region_un: Option<String>,
    pub coordinate_source: Option<String>,
}

impl CountryGeo {
    /// Every field null, including the provenance
    #[must_use]
    pub fn unmatched() -> Self {
        Self::default()
    }
}

/// Glottolog fields attached to a language
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FieldSet)]
#[field_set(provenance = "Glottolog")]
pub struct LanguageGeo {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub glottocode: Option<String>,
    pub family_name: Option<String>,
    pub family_id: Option<String>,
    pub macroarea: Option<String>,
    pub coordinate_source: Option<String>,
    /// Number of Glottolog entries sharing the ISO code, 0 when unmatched
    pub glottolog_match_count: usize,
}

impl LanguageGeo {
    /// Every field null and a match count of zero
    #[must_use]
    pub fn unmatched() -> Self {
        Self::default()
    }
}

/// Selected country profile fields embedded into a people group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryData {
    pub name: Option<String>,
    pub continent: Option<String>,
    pub region: Option<String>,
    pub percent_christianity: Option<f64>,
    pub percent_evangelical: Option<f64>,
    pub total_peoples: Option<u64>,
    pub unreached_peoples: Option<u64>,
    pub jp_scale: Option<String>,
}

/// Selected language profile fields embedded into a people group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageData {
    pub name: Option<String>,
    pub hub_country: Option<String>,
    pub bible_status: Option<i64>,
    pub bible_year: Option<String>,
    pub nt_year: Option<String>,
    pub portions_year: Option<String>,
    pub has_jesus_film: Option<String>,
    pub has_audio_recordings: Option<String>,
    pub status: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub glottocode: Option<String>,
    pub family_name: Option<String>,
    pub family_id: Option<String>,
    pub macroarea: Option<String>,
}

/// Country and language profiles embedded as nested groups
///
/// The two lookups are independent; either group may be null on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FieldSet)]
pub struct Denormalized {
    pub country_data: Option<CountryData>,
    pub language_data: Option<LanguageData>,
}
