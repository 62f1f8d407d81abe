//! Tests for coverage reports and run metadata

use atlas_enrich::algorithm::enrich::{build_centroid_index, enrich_people_groups};
use atlas_enrich::algorithm::report::{
    CoordinateCounts, CoverageReport, NewFields, SubsetSummary, format_percentage,
};
use atlas_enrich::models::FieldSet;
use atlas_enrich::{
    CollisionPolicy, CountryGeo, Dimension, LanguageGeo, PeopleGroup, RunMetadata,
};

use crate::utils::{centroid, people_group, sample_collections};

#[test]
fn test_country_coverage_over_three_records() {
    let centroids = vec![centroid("IN", "IND", 22.0, 79.0), centroid("NP", "NPL", 28.3, 84.1)];
    let index = build_centroid_index(&centroids, CollisionPolicy::LastWins).unwrap();
    let groups = [
        people_group("IN", 1, "hin", "N"),
        people_group("NP", 2, "nep", "N"),
        people_group("ZZ", 3, "xyz", "N"),
    ];

    let pass = enrich_people_groups(&groups, &index);
    let report = CoverageReport::from_enriched(&pass.records, Dimension::Country, 5);

    assert_eq!(report.total, 3);
    assert_eq!(report.matched, 2);
    assert_eq!(report.unmatched, 1);
    assert_eq!(report.coverage, "66.7%");
    assert_eq!(report.unmatched_sample, ["ZZ"]);
    assert!(!report.is_complete());

    let from_tally = CoverageReport::from_tally(
        Dimension::Country,
        pass.tally.get(Dimension::Country).unwrap(),
        5,
    );
    assert_eq!(from_tally, report);
}

#[test]
fn test_empty_collection_reports_zero() {
    let centroids = vec![centroid("IN", "IND", 22.0, 79.0)];
    let index = build_centroid_index(&centroids, CollisionPolicy::LastWins).unwrap();

    let groups: Vec<PeopleGroup> = Vec::new();

    let pass = enrich_people_groups(&groups, &index);
    let report = CoverageReport::from_enriched(&pass.records, Dimension::Country, 5);

    assert_eq!(report.total, 0);
    assert_eq!(report.coverage, "0.0%");
    assert!(report.unmatched_sample.is_empty());
}

#[test]
fn test_unmatched_sample_is_capped_and_sorted() {
    let centroids = vec![centroid("IN", "IND", 22.0, 79.0)];
    let index = build_centroid_index(&centroids, CollisionPolicy::LastWins).unwrap();
    let groups: Vec<_> = ["QQ", "AA", "MM", "BB", "ZZ", "CC", "AA"]
        .iter()
        .zip(1..)
        .map(|(code, id)| people_group(code, id, "xyz", "N"))
        .collect();

    let pass = enrich_people_groups(&groups, &index);
    let report = CoverageReport::from_enriched(&pass.records, Dimension::Country, 5);

    assert_eq!(report.unmatched, 7);
    assert_eq!(report.unmatched_keys, 6);
    assert_eq!(report.unmatched_sample, ["AA", "BB", "CC", "MM", "QQ"]);
    assert_eq!(report.coverage, "0.0%");
}

#[test]
fn test_report_display() {
    let centroids = vec![centroid("IN", "IND", 22.0, 79.0)];
    let index = build_centroid_index(&centroids, CollisionPolicy::LastWins).unwrap();
    let groups = [people_group("IN", 1, "hin", "N"), people_group("ZZ", 2, "xyz", "N")];

    let pass = enrich_people_groups(&groups, &index);
    let text = CoverageReport::from_enriched(&pass.records, Dimension::Country, 5).to_string();

    assert!(text.starts_with("Coverage (country):"));
    assert!(text.contains("Coverage: 50.0%"));
    assert!(text.contains("sample: ZZ"));
}

#[test]
fn test_subset_summary() {
    let summary = SubsetSummary::new(2, 3);
    assert_eq!(summary.records, 2);
    assert_eq!(summary.percentage_of_total, "66.7%");
    assert_eq!(SubsetSummary::new(0, 0).percentage_of_total, "0.0%");
    assert_eq!(format_percentage(1, 8), "12.5%");
}

#[test]
fn test_metadata_lists_added_fields() {
    let collections = sample_collections();
    let metadata = RunMetadata::new(
        collections.counts(),
        Vec::new(),
        CoordinateCounts::default(),
        SubsetSummary::new(2, 3),
    );

    assert_eq!(metadata.new_fields, NewFields::default());
    assert_eq!(metadata.new_fields.people_groups, CountryGeo::FIELD_NAMES);
    assert_eq!(metadata.new_fields.languages, LanguageGeo::FIELD_NAMES);
    assert_eq!(metadata.source_datasets.people_groups, 3);
    assert_eq!(metadata.source_datasets.languoids, 2);
    assert!(metadata.coverage_of(Dimension::Country).is_none());

    let value = serde_json::to_value(&metadata).unwrap();
    assert_eq!(value["unreached"]["percentage_of_total"], "66.7%");
    assert!(value["generated_at"].is_string());
    assert_eq!(value["new_fields"]["denormalized"][0], "country_data");

    let summary = metadata.summary();
    assert!(summary.contains("People Groups: 3"));
    assert!(summary.contains("Unreached People Groups: 2 (66.7% of total)"));
}
