//! End-to-end enrichment run
//!
//! Runs the passes in dependency order over fully loaded collections:
//! country centroids, Glottolog languages, then the denormalization that
//! embeds country profiles and the geo-enriched language profiles. Coverage
//! reports and the run metadata are computed last.

use std::time::Instant;

use indicatif::ProgressIterator;

use crate::algorithm::enrich::denormalize::DenormalizedGroup;
use crate::algorithm::enrich::{
    DenormalizeIndices, EnrichmentPass, MatchTally, build_centroid_index, build_dialect_index,
    denormalize_people_groups, enrich_languages, enrich_people_groups, unreached,
};
use crate::algorithm::family::{FamilyMap, FamilyResolver};
use crate::algorithm::report::{CoordinateCounts, CoverageReport, RunMetadata, SubsetSummary};
use crate::async_io::Collections;
use crate::config::EnrichConfig;
use crate::error::Result;
use crate::models::{CountryGeo, Denormalized, Dimension, Language, LanguageGeo, PeopleGroup};
use crate::utils::logging::{finish_progress_bar, log_coverage, pass_progress_bar};

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// People groups with country centroid fields
    pub people_groups_geo: EnrichmentPass<PeopleGroup, CountryGeo>,
    /// Languages with Glottolog fields
    pub languages_geo: EnrichmentPass<Language, LanguageGeo>,
    /// People groups with embedded country and language profiles
    pub enriched: EnrichmentPass<PeopleGroup, Denormalized>,
    pub metadata: RunMetadata,
}

impl RunOutput {
    /// Fully enriched least-reached people groups
    #[must_use]
    pub fn unreached(&self) -> Vec<&DenormalizedGroup> {
        unreached(&self.enriched.records)
    }
}

/// Log the outcome of one lookup dimension of a pass
fn log_pass(tally: &MatchTally, dimension: Dimension, what: &str, sample: usize) {
    if let Some(dim) = tally.get(dimension) {
        log_coverage(&CoverageReport::from_tally(dimension, dim, sample), what);
    }
}

/// Run every enrichment pass over the loaded collections
///
/// # Errors
/// Fails only when an index build rejects a key collision.
pub fn run(collections: &Collections, config: &EnrichConfig) -> Result<RunOutput> {
    let start = Instant::now();
    let policy = config.collision_policy;
    let sample = config.unmatched_sample;

    let centroid_index = build_centroid_index(&collections.centroids, policy)?;
    let dialect_index = build_dialect_index(&collections.dialects);
    let family_map = FamilyMap::from_languoids(&collections.languoids);
    let resolver = FamilyResolver::new(&family_map);

    let bar = pass_progress_bar(
        collections.people_groups.len(),
        "Attaching country centroids",
        config.show_progress,
    );
    let people_groups_geo = enrich_people_groups(
        collections.people_groups.iter().progress_with(bar.clone()),
        &centroid_index,
    );
    finish_progress_bar(&bar, Some("Country centroids attached"));
    log_pass(&people_groups_geo.tally, Dimension::Country, "people groups", sample);

    let bar = pass_progress_bar(
        collections.languages.len(),
        "Attaching Glottolog coordinates",
        config.show_progress,
    );
    let languages_geo = enrich_languages(
        collections.languages.iter().progress_with(bar.clone()),
        &dialect_index,
        &resolver,
    );
    finish_progress_bar(&bar, Some("Glottolog coordinates attached"));
    log_pass(&languages_geo.tally, Dimension::Language, "languages", sample);

    let enriched = {
        let indices =
            DenormalizeIndices::build(&collections.countries, &languages_geo.records, policy)?;
        let bar = pass_progress_bar(
            collections.people_groups.len(),
            "Embedding country and language profiles",
            config.show_progress,
        );
        let enriched = denormalize_people_groups(
            collections.people_groups.iter().progress_with(bar.clone()),
            &indices,
        );
        finish_progress_bar(&bar, Some("Profiles embedded"));
        enriched
    };
    log_pass(&enriched.tally, Dimension::CountryData, "country profiles", sample);
    log_pass(&enriched.tally, Dimension::LanguageData, "language profiles", sample);

    let unreached_summary = SubsetSummary::new(unreached(&enriched.records).len(), enriched.len());
    log::info!(
        "Filtered to {} unreached people groups ({} of total)",
        unreached_summary.records,
        unreached_summary.percentage_of_total
    );

    let coverage = vec![
        CoverageReport::from_enriched(&people_groups_geo.records, Dimension::Country, sample),
        CoverageReport::from_enriched(&languages_geo.records, Dimension::Language, sample),
        CoverageReport::from_enriched(&enriched.records, Dimension::CountryData, sample),
        CoverageReport::from_enriched(&enriched.records, Dimension::LanguageData, sample),
    ];
    let with_coordinates =
        CoordinateCounts::count(&people_groups_geo.records, &languages_geo.records);
    let metadata = RunMetadata::new(
        collections.counts(),
        coverage,
        with_coordinates,
        unreached_summary,
    );

    log::info!("Enrichment passes finished in {:?}", start.elapsed());

    Ok(RunOutput {
        people_groups_geo,
        languages_geo,
        enriched,
        metadata,
    })
}
