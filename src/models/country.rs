//! Country profiles and country centroids

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{FieldMap, Record, open_record};
use crate::algorithm::normalize::{as_text, de};

/// Country code of the profile (ISO 3166 alpha-2)
pub const COUNTRY_CODE: &str = "ROG3";

/// A country profile, keyed by `ROG3`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "FieldMap")]
pub struct Country {
    /// Trimmed `ROG3`
    pub code: Option<String>,
    fields: FieldMap,
}

impl Record for Country {
    fn from_fields(fields: FieldMap) -> Self {
        Self {
            code: as_text(fields.get(COUNTRY_CODE)),
            fields,
        }
    }

    fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

open_record!(Country);

/// Label point of a country from Natural Earth
///
/// The ISO code fields stay raw; they are normalized when the index is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryCentroid {
    #[serde(default)]
    pub iso_a2: Value,
    #[serde(default)]
    pub iso_a3: Value,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub continent: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub region_un: Option<String>,
}
