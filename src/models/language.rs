//! Language records

use serde::Deserialize;

use super::fields::{FieldMap, Record, open_record};
use crate::algorithm::normalize::as_text;

/// ISO 639-3 code of the language
pub const LANGUAGE_CODE: &str = "ROL3";
/// Display name of the language
pub const NAME: &str = "Language";

/// A language entry, keyed by its ISO 639-3 code
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "FieldMap")]
pub struct Language {
    /// Trimmed `ROL3`
    pub code: Option<String>,
    fields: FieldMap,
}

impl Record for Language {
    fn from_fields(fields: FieldMap) -> Self {
        Self {
            code: as_text(fields.get(LANGUAGE_CODE)),
            fields,
        }
    }

    fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

open_record!(Language);
