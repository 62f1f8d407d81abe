//! Denormalization of people groups with country and language profiles
//!
//! The country profile is found through `ROG3`, the language profile through
//! `ROL3`. The language profiles are the geo-enriched languages, so the
//! embedded `language_data` carries Glottolog coordinates and family names.
//! Both lookups are independent: either group can be null on its own.

use serde_json::Value;

use super::{EnrichmentPass, MatchTally, lookup_unique, run_pass};
use crate::algorithm::index::{CollisionPolicy, KeyRule, UniqueIndex};
use crate::algorithm::normalize::{as_f64, as_i64, as_text, as_u64};
use crate::error::Result;
use crate::models::{
    Country, CountryData, Denormalized, Dimension, Enriched, Language, LanguageData, LanguageGeo,
    PeopleGroup, Record, country, language, people_group,
};

/// Geo-enriched language, the reference record of the language profile index
pub type LanguageProfile = Enriched<Language, LanguageGeo>;

/// Fully enriched people group
pub type DenormalizedGroup = Enriched<PeopleGroup, Denormalized>;

pub const COUNTRY_PROFILE_INDEX: &str = "country profiles";
pub const LANGUAGE_PROFILE_INDEX: &str = "language profiles";

// Country profile source fields
const CTRY: &str = "Ctry";
const CONTINENT: &str = "Continent";
const REGION_NAME: &str = "RegionName";
const PERCENT_CHRISTIANITY: &str = "PercentChristianity";
const PERCENT_EVANGELICAL: &str = "PercentEvangelical";
const CNT_PEOPLES: &str = "CntPeoples";
const CNT_PEOPLES_LR: &str = "CntPeoplesLR";
const JP_SCALE_CTRY: &str = "JPScaleCtry";

// Language profile source fields
const HUB_COUNTRY: &str = "HubCountry";
const BIBLE_STATUS: &str = "BibleStatus";
const BIBLE_YEAR: &str = "BibleYear";
const NT_YEAR: &str = "NTYear";
const PORTIONS_YEAR: &str = "PortionsYear";
const HAS_JESUS_FILM: &str = "HasJesusFilm";
const AUDIO_RECORDINGS: &str = "AudioRecordings";
const STATUS: &str = "Status";

fn country_code(profile: &Country) -> Option<&Value> {
    profile.field(country::COUNTRY_CODE)
}

fn language_code(profile: &LanguageProfile) -> Option<&Value> {
    profile.record.field(language::LANGUAGE_CODE)
}

pub const COUNTRY_PROFILE_KEYS: [KeyRule<Country>; 1] = [country_code];
pub const LANGUAGE_PROFILE_KEYS: [KeyRule<LanguageProfile>; 1] = [language_code];

/// Build the country profile index
pub fn build_country_profile_index(
    countries: &[Country],
    policy: CollisionPolicy,
) -> Result<UniqueIndex<'_, Country>> {
    UniqueIndex::build(COUNTRY_PROFILE_INDEX, countries, &COUNTRY_PROFILE_KEYS, policy)
}

/// Build the language profile index over geo-enriched languages
pub fn build_language_profile_index(
    languages: &[LanguageProfile],
    policy: CollisionPolicy,
) -> Result<UniqueIndex<'_, LanguageProfile>> {
    UniqueIndex::build(LANGUAGE_PROFILE_INDEX, languages, &LANGUAGE_PROFILE_KEYS, policy)
}

/// The two indices of the denormalization pass
#[derive(Debug)]
pub struct DenormalizeIndices<'c, 'l> {
    pub countries: UniqueIndex<'c, Country>,
    pub languages: UniqueIndex<'l, LanguageProfile>,
}

impl<'c, 'l> DenormalizeIndices<'c, 'l> {
    /// Build both indices with the same collision policy
    pub fn build(
        countries: &'c [Country],
        languages: &'l [LanguageProfile],
        policy: CollisionPolicy,
    ) -> Result<Self> {
        Ok(Self {
            countries: build_country_profile_index(countries, policy)?,
            languages: build_language_profile_index(languages, policy)?,
        })
    }
}

impl From<&Country> for CountryData {
    fn from(profile: &Country) -> Self {
        Self {
            name: as_text(profile.field(CTRY)),
            continent: as_text(profile.field(CONTINENT)),
            region: as_text(profile.field(REGION_NAME)),
            percent_christianity: as_f64(profile.field(PERCENT_CHRISTIANITY)),
            percent_evangelical: as_f64(profile.field(PERCENT_EVANGELICAL)),
            total_peoples: as_u64(profile.field(CNT_PEOPLES)),
            unreached_peoples: as_u64(profile.field(CNT_PEOPLES_LR)),
            jp_scale: as_text(profile.field(JP_SCALE_CTRY)),
        }
    }
}

impl From<&LanguageProfile> for LanguageData {
    fn from(profile: &LanguageProfile) -> Self {
        let record = &profile.record;
        let geo = &profile.extension;
        Self {
            name: as_text(record.field(language::NAME)),
            hub_country: as_text(record.field(HUB_COUNTRY)),
            bible_status: as_i64(record.field(BIBLE_STATUS)),
            bible_year: as_text(record.field(BIBLE_YEAR)),
            nt_year: as_text(record.field(NT_YEAR)),
            portions_year: as_text(record.field(PORTIONS_YEAR)),
            has_jesus_film: as_text(record.field(HAS_JESUS_FILM)),
            has_audio_recordings: as_text(record.field(AUDIO_RECORDINGS)),
            status: as_text(record.field(STATUS)),
            latitude: geo.latitude,
            longitude: geo.longitude,
            glottocode: geo.glottocode.clone(),
            family_name: geo.family_name.clone(),
            family_id: geo.family_id.clone(),
            macroarea: geo.macroarea.clone(),
        }
    }
}

/// Embed the country and language profiles of one people group
pub fn denormalize(
    group: &PeopleGroup,
    indices: &DenormalizeIndices<'_, '_>,
    tally: MatchTally,
) -> (DenormalizedGroup, MatchTally) {
    let (country_profile, country_trace) = lookup_unique(
        &indices.countries,
        Dimension::CountryData,
        group.field(people_group::COUNTRY_CODE),
    );
    let (language_profile, language_trace) = lookup_unique(
        &indices.languages,
        Dimension::LanguageData,
        group.field(people_group::LANGUAGE_CODE),
    );

    let extension = Denormalized {
        country_data: country_profile.map(CountryData::from),
        language_data: language_profile.map(LanguageData::from),
    };

    let tally = tally.record(&country_trace).record(&language_trace);
    let traces = [country_trace, language_trace];
    (Enriched::from_source(group, extension, traces), tally)
}

/// Denormalization pass over a whole people-group collection
pub fn denormalize_people_groups<'s, I>(
    groups: I,
    indices: &DenormalizeIndices<'_, '_>,
) -> EnrichmentPass<PeopleGroup, Denormalized>
where
    I: IntoIterator<Item = &'s PeopleGroup>,
{
    run_pass(groups, |group, tally| denormalize(group, indices, tally))
}

/// Fully enriched records of least-reached groups, in input order
#[must_use]
pub fn unreached(records: &[DenormalizedGroup]) -> Vec<&DenormalizedGroup> {
    records
        .iter()
        .filter(|enriched| enriched.record.least_reached)
        .collect()
}
