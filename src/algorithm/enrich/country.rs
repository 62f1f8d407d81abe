//! Country centroid enrichment of people groups

use serde_json::Value;

use super::{EnrichmentPass, MatchTally, lookup_unique, run_pass};
use crate::algorithm::index::{CollisionPolicy, KeyRule, UniqueIndex};
use crate::error::Result;
use crate::models::people_group::COUNTRY_CODE;
use crate::models::{CountryCentroid, CountryGeo, Dimension, Enriched, FieldSet, PeopleGroup, Record};

/// Index name used in logs
pub const CENTROID_INDEX: &str = "country centroids";

fn centroid_iso_a2(centroid: &CountryCentroid) -> Option<&Value> {
    Some(&centroid.iso_a2)
}

fn centroid_iso_a3(centroid: &CountryCentroid) -> Option<&Value> {
    Some(&centroid.iso_a3)
}

/// Centroids are reachable through both their alpha-2 and alpha-3 codes
pub const CENTROID_KEYS: [KeyRule<CountryCentroid>; 2] = [centroid_iso_a2, centroid_iso_a3];

/// Build the single-valued centroid index
pub fn build_centroid_index(
    centroids: &[CountryCentroid],
    policy: CollisionPolicy,
) -> Result<UniqueIndex<'_, CountryCentroid>> {
    UniqueIndex::build(CENTROID_INDEX, centroids, &CENTROID_KEYS, policy)
}

impl From<&CountryCentroid> for CountryGeo {
    fn from(centroid: &CountryCentroid) -> Self {
        Self {
            country_latitude: centroid.latitude,
            country_longitude: centroid.longitude,
            continent: centroid.continent.clone(),
            region_un: centroid.region_un.clone(),
            coordinate_source: Self::PROVENANCE.map(str::to_owned),
        }
    }
}

/// Attach country centroid fields to one people group
pub fn enrich_country(
    group: &PeopleGroup,
    index: &UniqueIndex<'_, CountryCentroid>,
    tally: MatchTally,
) -> (Enriched<PeopleGroup, CountryGeo>, MatchTally) {
    let (centroid, trace) = lookup_unique(index, Dimension::Country, group.field(COUNTRY_CODE));

    let extension = match centroid {
        Some(centroid) => CountryGeo::from(centroid),
        None => {
            log::debug!("No centroid for people group {} (keys {:?})", group.key, trace.keys);
            CountryGeo::unmatched()
        }
    };

    let tally = tally.record(&trace);
    (Enriched::from_source(group, extension, [trace]), tally)
}

/// Country pass over a whole people-group collection
pub fn enrich_people_groups<'s, I>(
    groups: I,
    index: &UniqueIndex<'_, CountryCentroid>,
) -> EnrichmentPass<PeopleGroup, CountryGeo>
where
    I: IntoIterator<Item = &'s PeopleGroup>,
{
    run_pass(groups, |group, tally| enrich_country(group, index, tally))
}
