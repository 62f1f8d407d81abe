//! Glottolog reference records

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::algorithm::normalize::de;

/// A Glottolog language or dialect with coordinates
///
/// `isocodes` may hold several comma separated ISO 639-3 codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dialect {
    #[serde(default, deserialize_with = "de::opt_text")]
    pub glottocode: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub name: Option<String>,
    #[serde(default)]
    pub isocodes: Value,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub macroarea: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub longitude: Option<f64>,
}

/// Level of a languoid in the Glottolog hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguoidLevel {
    Family,
    Language,
    Dialect,
    Other,
}

impl From<&str> for LanguoidLevel {
    fn from(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "family" => Self::Family,
            "language" => Self::Language,
            "dialect" => Self::Dialect,
            _ => Self::Other,
        }
    }
}

/// One row of the Glottolog languoid table
///
/// `family_id` points at the top-level family of the languoid and is empty
/// for top-level entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Languoid {
    pub id: String,
    #[serde(default)]
    pub family_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

impl Languoid {
    /// Parsed hierarchy level
    #[must_use]
    pub fn level(&self) -> LanguoidLevel {
        self.level
            .as_deref()
            .map_or(LanguoidLevel::Other, LanguoidLevel::from)
    }
}
