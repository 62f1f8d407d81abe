//! Record enrichers
//!
//! Each pass walks a primary collection in order and produces one
//! [`Enriched`] record per source record. Match statistics are not kept in
//! shared state: every step takes a [`MatchTally`] by value and hands back the
//! updated tally with its record.

pub mod country;
pub mod denormalize;
pub mod language;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use super::index::{Candidates, MultiIndex, UniqueIndex};
use super::normalize::normalize_keys;
use crate::models::{Dimension, Enriched, LookupTrace};

pub use country::{build_centroid_index, enrich_country, enrich_people_groups};
pub use denormalize::{
    DenormalizeIndices, build_country_profile_index, build_language_profile_index, denormalize,
    denormalize_people_groups, unreached,
};
pub use language::{build_dialect_index, enrich_language, enrich_languages};

/// Match statistics of one lookup dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DimensionTally {
    /// Records looked up
    pub total: usize,
    /// Records with a hit
    pub matched: usize,
    /// Misses on records without any key
    pub keyless: usize,
    /// Hits with more than one candidate
    pub ambiguous: usize,
    /// Distinct normalized keys that found nothing
    pub unmatched: BTreeSet<String>,
}

impl DimensionTally {
    /// Records without a hit, keyless ones included
    #[must_use]
    pub const fn unmatched_count(&self) -> usize {
        self.total.saturating_sub(self.matched)
    }
}

/// Accumulated match statistics, one entry per lookup dimension
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchTally {
    dimensions: BTreeMap<Dimension, DimensionTally>,
}

impl MatchTally {
    /// Fold one lookup outcome into the tally
    #[must_use]
    pub fn record(mut self, trace: &LookupTrace) -> Self {
        let entry = self.dimensions.entry(trace.dimension).or_default();
        entry.total += 1;
        if trace.is_match() {
            entry.matched += 1;
            if trace.candidates > 1 {
                entry.ambiguous += 1;
            }
        } else if trace.is_keyless() {
            entry.keyless += 1;
        } else {
            entry.unmatched.extend(trace.keys.iter().cloned());
        }
        self
    }

    /// Fold several lookup outcomes into the tally
    #[must_use]
    pub fn record_all<'t, I>(self, traces: I) -> Self
    where
        I: IntoIterator<Item = &'t LookupTrace>,
    {
        traces.into_iter().fold(self, Self::record)
    }

    /// Statistics of one dimension, if any lookup was recorded for it
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> Option<&DimensionTally> {
        self.dimensions.get(&dimension)
    }

    /// Dimensions with recorded lookups, in declaration order
    pub fn dimensions(&self) -> impl Iterator<Item = (Dimension, &DimensionTally)> {
        self.dimensions.iter().map(|(dimension, tally)| (*dimension, tally))
    }
}

/// Output of one enrichment pass
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentPass<R, E> {
    /// Enriched records, same count and order as the input
    pub records: Vec<Enriched<R, E>>,
    /// Statistics of every lookup the pass performed
    pub tally: MatchTally,
}

impl<R, E> EnrichmentPass<R, E> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Look a raw key value up in a single-valued index
///
/// The normalized keys are tried in order; the first hit wins.
pub(crate) fn lookup_unique<'a, T>(
    index: &UniqueIndex<'a, T>,
    dimension: Dimension,
    raw: Option<&Value>,
) -> (Option<&'a T>, LookupTrace) {
    let keys = normalize_keys(raw);
    match index.lookup_any(&keys) {
        Some((key, record)) => {
            let key = key.to_owned();
            (Some(record), LookupTrace::hit(dimension, keys, &key, 1))
        }
        None => (None, LookupTrace::miss(dimension, keys)),
    }
}

/// Look a raw key value up in a multi-valued index
pub(crate) fn lookup_multi<'i, 'a, T>(
    index: &'i MultiIndex<'a, T>,
    dimension: Dimension,
    raw: Option<&Value>,
) -> (Option<Candidates<'i, 'a, T>>, LookupTrace) {
    let keys = normalize_keys(raw);
    match index.lookup_any(&keys) {
        Some((key, found)) => {
            let key = key.to_owned();
            let trace = LookupTrace::hit(dimension, keys, &key, found.count());
            (Some(found), trace)
        }
        None => (None, LookupTrace::miss(dimension, keys)),
    }
}

/// Run `step` over every source record, threading the tally through
pub fn run_pass<'s, R, E, I, F>(sources: I, mut step: F) -> EnrichmentPass<R, E>
where
    R: 's,
    I: IntoIterator<Item = &'s R>,
    F: FnMut(&'s R, MatchTally) -> (Enriched<R, E>, MatchTally),
{
    let (records, tally) = sources.into_iter().fold(
        (Vec::new(), MatchTally::default()),
        |(mut records, tally), source| {
            let (enriched, tally) = step(source, tally);
            records.push(enriched);
            (records, tally)
        },
    );

    EnrichmentPass { records, tally }
}
