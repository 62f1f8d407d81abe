//! Coverage reports and run metadata
//!
//! Reports are read-only views over enriched collections. They never feed
//! back into the enrichment itself.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::enrich::{DimensionTally, MatchTally};
use crate::models::{
    CountryGeo, Denormalized, Dimension, Enriched, FieldSet, Language, LanguageGeo, PeopleGroup,
};

/// Match percentage with one decimal, `"0.0%"` for an empty collection
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_percentage(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", 100.0 * part as f64 / whole as f64)
}

/// Match coverage of one lookup dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub dimension: Dimension,
    /// Records in the collection
    pub total: usize,
    /// Records with a hit
    pub matched: usize,
    /// Records without a hit
    pub unmatched: usize,
    /// Hits with more than one candidate
    pub ambiguous: usize,
    /// `matched / total` as a percentage string
    pub coverage: String,
    /// Distinct keys without a hit
    pub unmatched_keys: usize,
    /// The first unmatched keys in sorted order
    pub unmatched_sample: Vec<String>,
}

impl CoverageReport {
    /// Report built from accumulated statistics
    #[must_use]
    pub fn from_tally(dimension: Dimension, tally: &DimensionTally, sample: usize) -> Self {
        Self {
            dimension,
            total: tally.total,
            matched: tally.matched,
            unmatched: tally.unmatched_count(),
            ambiguous: tally.ambiguous,
            coverage: format_percentage(tally.matched, tally.total),
            unmatched_keys: tally.unmatched.len(),
            unmatched_sample: tally.unmatched.iter().take(sample).cloned().collect(),
        }
    }

    /// Report computed from the traces of an enriched collection
    ///
    /// Every record counts towards the total, including records for which
    /// the dimension was never looked up.
    #[must_use]
    pub fn from_enriched<R, E>(
        records: &[Enriched<R, E>],
        dimension: Dimension,
        sample: usize,
    ) -> Self {
        let tally = MatchTally::default()
            .record_all(records.iter().filter_map(|record| record.trace(dimension)));
        let tally = DimensionTally {
            total: records.len(),
            ..tally.get(dimension).cloned().unwrap_or_default()
        };
        Self::from_tally(dimension, &tally, sample)
    }

    /// Whether every record matched
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.matched == self.total
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Coverage ({}):", self.dimension)?;
        writeln!(f, "  Total: {}", self.total)?;
        writeln!(f, "  Matched: {}", self.matched)?;
        writeln!(f, "  Coverage: {}", self.coverage)?;
        writeln!(f, "  Ambiguous: {}", self.ambiguous)?;
        if self.unmatched_sample.is_empty() {
            write!(f, "  Unmatched Keys: none")
        } else {
            write!(
                f,
                "  Unmatched Keys: {} (sample: {})",
                self.unmatched_keys,
                self.unmatched_sample.join(", ")
            )
        }
    }
}

/// Record counts of the input collections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub people_groups: usize,
    pub languages: usize,
    pub countries: usize,
    pub centroids: usize,
    pub glottolog_entries: usize,
    pub languoids: usize,
}

/// Records that received coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoordinateCounts {
    pub people_groups: usize,
    pub languages: usize,
}

impl CoordinateCounts {
    #[must_use]
    pub fn count(
        people_groups: &[Enriched<PeopleGroup, CountryGeo>],
        languages: &[Enriched<Language, LanguageGeo>],
    ) -> Self {
        Self {
            people_groups: people_groups
                .iter()
                .filter(|enriched| enriched.extension.country_latitude.is_some())
                .count(),
            languages: languages
                .iter()
                .filter(|enriched| enriched.extension.latitude.is_some())
                .count(),
        }
    }
}

/// Names of the fields each pass adds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewFields {
    pub people_groups: &'static [&'static str],
    pub languages: &'static [&'static str],
    pub denormalized: &'static [&'static str],
}

impl Default for NewFields {
    fn default() -> Self {
        Self {
            people_groups: CountryGeo::FIELD_NAMES,
            languages: LanguageGeo::FIELD_NAMES,
            denormalized: Denormalized::FIELD_NAMES,
        }
    }
}

/// Size of the least-reached subset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsetSummary {
    pub records: usize,
    pub percentage_of_total: String,
}

impl SubsetSummary {
    #[must_use]
    pub fn new(records: usize, total: usize) -> Self {
        Self {
            records,
            percentage_of_total: format_percentage(records, total),
        }
    }
}

/// Summary of one enrichment run, persisted next to the outputs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetadata {
    pub generated_at: DateTime<Utc>,
    pub source_datasets: SourceCounts,
    pub coverage: Vec<CoverageReport>,
    pub with_coordinates: CoordinateCounts,
    pub new_fields: NewFields,
    pub unreached: SubsetSummary,
    pub description: &'static str,
}

impl RunMetadata {
    pub const DESCRIPTION: &'static str = "People groups and languages enriched with Natural Earth \
         country centroids, Glottolog coordinates and language families";

    /// Assemble the metadata, stamped with the current time
    #[must_use]
    pub fn new(
        source_datasets: SourceCounts,
        coverage: Vec<CoverageReport>,
        with_coordinates: CoordinateCounts,
        unreached: SubsetSummary,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            source_datasets,
            coverage,
            with_coordinates,
            new_fields: NewFields::default(),
            unreached,
            description: Self::DESCRIPTION,
        }
    }

    /// Report of one dimension
    #[must_use]
    pub fn coverage_of(&self, dimension: Dimension) -> Option<&CoverageReport> {
        self.coverage
            .iter()
            .find(|report| report.dimension == dimension)
    }

    /// Human readable summary for the end of a run
    #[must_use]
    pub fn summary(&self) -> String {
        let sources = &self.source_datasets;
        let mut summary = String::new();
        summary.push_str("Enrichment Summary:\n");
        summary.push_str(&format!("  Generated At: {}\n", self.generated_at.to_rfc3339()));
        summary.push_str(&format!("  People Groups: {}\n", sources.people_groups));
        summary.push_str(&format!("  Languages: {}\n", sources.languages));
        summary.push_str(&format!("  Countries: {}\n", sources.countries));
        summary.push_str(&format!("  Country Centroids: {}\n", sources.centroids));
        summary.push_str(&format!("  Glottolog Entries: {}\n", sources.glottolog_entries));
        summary.push_str(&format!("  Glottolog Languoids: {}\n", sources.languoids));

        for report in &self.coverage {
            summary.push('\n');
            summary.push_str(&report.to_string());
            summary.push('\n');
        }

        summary.push_str("\nNew Fields:\n");
        summary.push_str(&format!(
            "  People Groups: {}\n",
            self.new_fields.people_groups.join(", ")
        ));
        summary.push_str(&format!(
            "  Languages: {}\n",
            self.new_fields.languages.join(", ")
        ));
        summary.push_str(&format!(
            "  Denormalized: {}\n",
            self.new_fields.denormalized.join(", ")
        ));

        summary.push_str(&format!(
            "\nUnreached People Groups: {} ({} of total)\n",
            self.unreached.records, self.unreached.percentage_of_total
        ));

        summary
    }
}
