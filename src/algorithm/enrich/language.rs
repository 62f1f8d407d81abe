//! Glottolog enrichment of languages

use serde_json::Value;

use super::{EnrichmentPass, MatchTally, lookup_multi, run_pass};
use crate::algorithm::family::FamilyResolver;
use crate::algorithm::index::{Candidates, KeyRule, MultiIndex};
use crate::algorithm::normalize::is_not_a_number;
use crate::models::language::LANGUAGE_CODE;
use crate::models::{Dialect, Dimension, Enriched, FieldSet, Language, LanguageGeo, Record};

/// Index name used in logs
pub const DIALECT_INDEX: &str = "glottolog dialects";

fn dialect_isocodes(dialect: &Dialect) -> Option<&Value> {
    match &dialect.isocodes {
        Value::String(codes) if is_not_a_number(codes) => None,
        codes => Some(codes),
    }
}

/// Dialects are keyed by every ISO 639-3 code in their `isocodes` list
///
/// An `isocodes` cell holding the stringified NaN of the export means the
/// dialect has no code.
pub const DIALECT_KEYS: [KeyRule<Dialect>; 1] = [dialect_isocodes];

/// Build the multi-valued dialect index
#[must_use]
pub fn build_dialect_index(dialects: &[Dialect]) -> MultiIndex<'_, Dialect> {
    MultiIndex::build(DIALECT_INDEX, dialects, &DIALECT_KEYS)
}

/// Glottolog fields for a hit, taken from the primary candidate
fn language_geo(found: &Candidates<'_, '_, Dialect>, resolver: &FamilyResolver<'_>) -> LanguageGeo {
    let dialect = found.primary();
    let family = resolver.resolve(dialect.glottocode.as_deref());

    LanguageGeo {
        latitude: dialect.latitude,
        longitude: dialect.longitude,
        glottocode: dialect.glottocode.clone(),
        family_name: Some(family.name),
        family_id: Some(family.id),
        macroarea: dialect.macroarea.clone(),
        coordinate_source: LanguageGeo::PROVENANCE.map(str::to_owned),
        glottolog_match_count: found.count(),
    }
}

/// Attach Glottolog fields to one language
pub fn enrich_language(
    language: &Language,
    index: &MultiIndex<'_, Dialect>,
    resolver: &FamilyResolver<'_>,
    tally: MatchTally,
) -> (Enriched<Language, LanguageGeo>, MatchTally) {
    let (found, trace) = lookup_multi(index, Dimension::Language, language.field(LANGUAGE_CODE));

    let extension = match found {
        Some(found) => {
            if found.is_ambiguous() {
                log::trace!(
                    "{} Glottolog entries for {:?}, using the first",
                    found.count(),
                    trace.matched_key
                );
            }
            language_geo(&found, resolver)
        }
        None => LanguageGeo::unmatched(),
    };

    let tally = tally.record(&trace);
    (Enriched::from_source(language, extension, [trace]), tally)
}

/// Language pass over a whole language collection
pub fn enrich_languages<'s, I>(
    languages: I,
    index: &MultiIndex<'_, Dialect>,
    resolver: &FamilyResolver<'_>,
) -> EnrichmentPass<Language, LanguageGeo>
where
    I: IntoIterator<Item = &'s Language>,
{
    run_pass(languages, |language, tally| {
        enrich_language(language, index, resolver, tally)
    })
}
