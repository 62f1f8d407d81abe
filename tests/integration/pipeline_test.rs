//! End-to-end tests of a full enrichment run

use std::fs::{self, File};

use atlas_enrich::utils::io::output::{
    ENRICHED_FILE, ENRICHED_PARQUET_FILE, LANGUAGES_GEO_FILE, METADATA_FILE,
    PEOPLE_GROUPS_GEO_FILE, UNREACHED_FILE, UNREACHED_PARQUET_FILE,
};
use atlas_enrich::{
    CollisionPolicy, Dimension, EnrichError, OutputPaths, load_collections, run, write_outputs,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Value, json};

use crate::utils::{centroid, sample_collections, test_config, write_sample_inputs};

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_run_on_sample_collections() {
    let dir = tempfile::tempdir().unwrap();
    let collections = sample_collections();

    let output = run(&collections, &test_config(dir.path())).unwrap();

    assert_eq!(output.people_groups_geo.len(), 3);
    assert_eq!(output.languages_geo.len(), 2);
    assert_eq!(output.enriched.len(), 3);

    let metadata = &output.metadata;
    let country = metadata.coverage_of(Dimension::Country).unwrap();
    assert_eq!(country.coverage, "66.7%");
    assert_eq!(country.unmatched_sample, ["ZZ"]);

    let language = metadata.coverage_of(Dimension::Language).unwrap();
    assert_eq!(language.coverage, "50.0%");
    assert_eq!(language.unmatched_sample, ["xyz"]);

    let country_data = metadata.coverage_of(Dimension::CountryData).unwrap();
    assert_eq!(country_data.matched, 2);
    assert_eq!(country_data.unmatched_sample, ["NP"]);
    assert!(metadata.coverage_of(Dimension::LanguageData).unwrap().is_complete());

    assert_eq!(metadata.with_coordinates.people_groups, 2);
    assert_eq!(metadata.with_coordinates.languages, 1);
    assert_eq!(metadata.unreached.records, 2);
    assert_eq!(metadata.unreached.percentage_of_total, "66.7%");

    let hindi = &output.languages_geo.records[0].extension;
    assert_eq!(hindi.family_name.as_deref(), Some("Indo-European"));
    assert_eq!(hindi.family_id.as_deref(), Some("indo1319"));

    let unreached: Vec<_> = output
        .unreached()
        .iter()
        .map(|enriched| enriched.record.key.to_string())
        .collect();
    assert_eq!(unreached, ["IN/101", "ZZ/103"]);
}

#[test]
fn test_run_rejects_colliding_centroids() {
    let dir = tempfile::tempdir().unwrap();
    let mut collections = sample_collections();
    collections.centroids.push(centroid("IN", "IN2", 0.0, 0.0));
    let mut config = test_config(dir.path());
    config.collision_policy = CollisionPolicy::Reject;

    let err = run(&collections, &config).unwrap_err();

    assert!(!err.is_load_failure());
    match err {
        EnrichError::DuplicateKey { index, key } => {
            assert_eq!(index, "country centroids");
            assert_eq!(key, "IN");
        }
        other => panic!("unexpected error: {other}"),
    }

    config.collision_policy = CollisionPolicy::LastWins;
    let output = run(&collections, &config).unwrap();
    let first = &output.people_groups_geo.records[0].extension;
    assert_eq!(first.country_latitude, Some(0.0));
}

#[tokio::test]
async fn test_load_run_and_write_outputs() {
    let data_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    write_sample_inputs(data_dir.path());
    let config = test_config(data_dir.path()).with_output_dir(out_dir.path().join("out"));

    let collections = load_collections(&config.inputs).await.unwrap();
    let output = run(&collections, &config).unwrap();
    let written = write_outputs(&output, &config.output_dir, true).unwrap();

    let paths = OutputPaths::in_dir(&config.output_dir);
    assert_eq!(written.len(), 7);
    for name in [
        PEOPLE_GROUPS_GEO_FILE,
        LANGUAGES_GEO_FILE,
        ENRICHED_FILE,
        UNREACHED_FILE,
        METADATA_FILE,
        ENRICHED_PARQUET_FILE,
        UNREACHED_PARQUET_FILE,
    ] {
        assert!(config.output_dir.join(name).is_file(), "{name} missing");
    }

    let geo = read_json(&paths.people_groups_geo);
    let records = geo.as_array().unwrap();
    assert_eq!(records.len(), 3);
    let keys: Vec<&str> = records[0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys.first(), Some(&"ROG3"));
    assert_eq!(keys.last(), Some(&"coordinate_source"));
    assert_eq!(records[2]["country_latitude"], Value::Null);
    assert_eq!(records[2]["coordinate_source"], Value::Null);

    let languages = read_json(&paths.languages_geo);
    assert_eq!(languages[0]["glottolog_match_count"], json!(1));
    assert_eq!(languages[1]["glottolog_match_count"], json!(0));

    let enriched = read_json(&paths.enriched);
    assert_eq!(enriched[0]["country_data"]["name"], json!("India"));
    assert_eq!(enriched[1]["country_data"], Value::Null);
    assert_eq!(enriched[0]["language_data"]["family_name"], json!("Indo-European"));

    let unreached = read_json(&paths.unreached);
    assert_eq!(unreached.as_array().unwrap().len(), 2);

    let metadata = read_json(&paths.metadata);
    assert_eq!(metadata["source_datasets"]["glottolog_entries"], json!(2));
    assert_eq!(metadata["coverage"][0]["dimension"], json!("country"));
    assert_eq!(metadata["coverage"][0]["coverage"], json!("66.7%"));

    let file = File::open(&paths.enriched_parquet).unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap();
    let rows: usize = reader.map(|batch| batch.unwrap().num_rows()).sum();
    assert_eq!(rows, 3);

    let file = File::open(&paths.unreached_parquet).unwrap();
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
    assert!(builder.schema().field_with_name("family_name").is_ok());
    assert_eq!(builder.metadata().file_metadata().num_rows(), 2);
}

#[test]
fn test_write_without_parquet() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&sample_collections(), &test_config(dir.path())).unwrap();

    let written = write_outputs(&output, dir.path(), false).unwrap();

    assert_eq!(written.len(), 5);
    assert!(!dir.path().join(ENRICHED_PARQUET_FILE).exists());
}
