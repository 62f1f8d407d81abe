//! People-group records

use std::fmt;

use serde::Deserialize;

use super::fields::{FieldMap, Record, open_record};
use crate::algorithm::normalize::{as_f64, as_text};

/// Country code of the people group (ISO 3166 alpha-2)
pub const COUNTRY_CODE: &str = "ROG3";
/// Group identifier, unique within a country
pub const PEOPLE_ID: &str = "PeopleID3";
/// Primary language (ISO 639-3)
pub const LANGUAGE_CODE: &str = "ROL3";
/// `"Y"` when the group is least reached
pub const LEAST_REACHED: &str = "LeastReached";
/// Display name of the group within its country
pub const NAME: &str = "PeopNameInCountry";
/// Population estimate
pub const POPULATION: &str = "Population";

/// Compound natural key of a people group
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeopleGroupKey {
    /// Trimmed `ROG3`
    pub country_code: Option<String>,
    /// `PeopleID3` in canonical text form
    pub people_id: Option<String>,
}

impl fmt::Display for PeopleGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            self.country_code.as_deref().unwrap_or("?"),
            self.people_id.as_deref().unwrap_or("?")
        )
    }
}

/// A people group in a country
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "FieldMap")]
pub struct PeopleGroup {
    /// Natural key
    pub key: PeopleGroupKey,
    /// Trimmed `ROL3`
    pub language_code: Option<String>,
    /// Whether `LeastReached` is `"Y"`
    pub least_reached: bool,
    fields: FieldMap,
}

impl PeopleGroup {
    /// Display name of the group
    #[must_use]
    pub fn name(&self) -> Option<String> {
        as_text(self.field(NAME))
    }

    /// Population estimate
    #[must_use]
    pub fn population(&self) -> Option<f64> {
        as_f64(self.field(POPULATION))
    }
}

impl Record for PeopleGroup {
    fn from_fields(fields: FieldMap) -> Self {
        let key = PeopleGroupKey {
            country_code: as_text(fields.get(COUNTRY_CODE)),
            people_id: as_text(fields.get(PEOPLE_ID)),
        };
        let language_code = as_text(fields.get(LANGUAGE_CODE));
        let least_reached = as_text(fields.get(LEAST_REACHED)).is_some_and(|flag| flag == "Y");

        Self {
            key,
            language_code,
            least_reached,
            fields,
        }
    }

    fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

open_record!(PeopleGroup);
