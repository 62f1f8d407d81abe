//! Key normalization and lenient scalar coercion
//!
//! Every join key in the pipeline goes through [`normalize_keys`]: values are
//! trimmed, comma lists are split into separate keys, numbers are printed in
//! canonical form, and empty values produce no key at all.
//!
//! The text `nan` is a valid ISO 639-3 code, so it only counts as "no value"
//! in reference columns exported from float tables (see [`is_not_a_number`]).

use std::borrow::Cow;

use serde_json::{Number, Value};
use smallvec::SmallVec;

/// Separator of compound code lists such as `"eng, en"`
pub const KEY_DELIMITER: char = ',';

/// Normalized keys derived from one raw value, in source order
pub type KeySet = SmallVec<[String; 2]>;

/// Text a float column holding NaN is stringified to
pub const NOT_A_NUMBER: &str = "nan";

/// Whether a trimmed text stands for "no value"
#[must_use]
pub fn is_missing(text: &str) -> bool {
    text.is_empty()
}

/// Whether a reference value is the stringified NaN of a float column
///
/// Exact match only: `"NaN"` or `"Nan"` are left alone.
#[must_use]
pub fn is_not_a_number(text: &str) -> bool {
    text.trim() == NOT_A_NUMBER
}

/// Canonical text of a number: integral values print without a fraction
#[must_use]
pub fn canonical_number(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    match number.as_f64() {
        Some(float) if float.is_finite() && float.fract() == 0.0 && float.abs() < 1e15 => {
            // exact for magnitudes below 2^53
            #[allow(clippy::cast_possible_truncation)]
            let int = float as i64;
            int.to_string()
        }
        _ => number.to_string(),
    }
}

fn scalar_text(raw: &Value) -> Option<Cow<'_, str>> {
    match raw {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(canonical_number(number))),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Produce the canonical keys of a raw field value
///
/// Absent, null and empty values yield no key. A comma separated list
/// yields one key per non-empty part; duplicates within the list are kept
/// once.
#[must_use]
pub fn normalize_keys(raw: Option<&Value>) -> KeySet {
    let Some(text) = raw.and_then(scalar_text) else {
        return KeySet::new();
    };

    let mut keys = KeySet::new();
    for part in text.split(KEY_DELIMITER).map(str::trim) {
        if !is_missing(part) && !keys.iter().any(|k| k == part) {
            keys.push(part.to_owned());
        }
    }
    keys
}

/// Trimmed text of a scalar, `None` for missing values
///
/// Unlike [`normalize_keys`], commas are kept as part of the text and
/// booleans render as `"true"` / `"false"`.
#[must_use]
pub fn as_text(raw: Option<&Value>) -> Option<String> {
    if let Some(Value::Bool(flag)) = raw {
        return Some(flag.to_string());
    }
    let text = raw.and_then(scalar_text)?;
    let trimmed = text.trim();
    (!is_missing(trimmed)).then(|| trimmed.to_owned())
}

/// Finite float from a number or numeric string, `None` otherwise
#[must_use]
pub fn as_f64(raw: Option<&Value>) -> Option<f64> {
    let value = match raw? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// Integer from an integral number or numeric string, `None` otherwise
#[must_use]
pub fn as_i64(raw: Option<&Value>) -> Option<i64> {
    match raw? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

/// Non-negative integer, `None` for negative or non-integral values
#[must_use]
pub fn as_u64(raw: Option<&Value>) -> Option<u64> {
    as_i64(raw).and_then(|value| u64::try_from(value).ok())
}

#[allow(clippy::cast_possible_truncation)]
fn integral(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15).then(|| value as i64)
}

/// Lenient serde adapters for typed reference records
///
/// Each adapter accepts any JSON scalar and applies the matching coercion, so
/// a malformed value becomes `None` instead of failing the whole collection.
pub mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Deserialize through [`super::as_f64`]
    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(super::as_f64(raw.as_ref()))
    }

    /// Deserialize through [`super::as_text`], reading a stringified NaN as `None`
    pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(super::as_text(raw.as_ref()).filter(|text| !super::is_not_a_number(text)))
    }
}
