//! Tests for lookup index construction

use atlas_enrich::algorithm::enrich::country::build_centroid_index;
use atlas_enrich::algorithm::enrich::language::build_dialect_index;
use atlas_enrich::{CollisionPolicy, EnrichError};

use crate::utils::{centroid, dialect};

#[test]
fn test_build_is_deterministic() {
    let centroids = vec![
        centroid("US", "USA", 39.8, -98.5),
        centroid("FR", "FRA", 46.6, 2.4),
        centroid("US", "USA", 40.0, -100.0),
    ];

    let first = build_centroid_index(&centroids, CollisionPolicy::LastWins).unwrap();
    let second = build_centroid_index(&centroids, CollisionPolicy::LastWins).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.keys(), ["FR", "FRA", "US", "USA"]);
}

#[test]
fn test_duplicate_key_last_write_wins() {
    let centroids = vec![
        centroid("US", "USA", 39.8, -98.5),
        centroid("US", "USA", 40.0, -100.0),
    ];

    let index = build_centroid_index(&centroids, CollisionPolicy::LastWins).unwrap();

    assert!(std::ptr::eq(index.get("US").unwrap(), &centroids[1]));
    assert!(std::ptr::eq(index.get("USA").unwrap(), &centroids[1]));
    assert_eq!(index.collisions(), 2);
}

#[test]
fn test_first_wins_and_reject_policies() {
    let centroids = vec![
        centroid("US", "USA", 39.8, -98.5),
        centroid("US", "USA", 40.0, -100.0),
    ];

    let index = build_centroid_index(&centroids, CollisionPolicy::FirstWins).unwrap();
    assert_eq!(index.get("US").unwrap().latitude, Some(39.8));

    let err = build_centroid_index(&centroids, CollisionPolicy::Reject).unwrap_err();
    assert!(matches!(err, EnrichError::DuplicateKey { ref key, .. } if key == "US"));
}

#[test]
fn test_identical_codes_on_one_record_are_not_collisions() {
    let centroids = vec![centroid("XK", "XK", 42.6, 20.9)];
    let index = build_centroid_index(&centroids, CollisionPolicy::Reject).unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.collisions(), 0);
}

#[test]
fn test_records_without_key_contribute_nothing() {
    let centroids = vec![
        centroid("", "", 0.0, 0.0),
        centroid("  ", "DEU", 51.1, 10.4),
    ];
    let index = build_centroid_index(&centroids, CollisionPolicy::LastWins).unwrap();

    assert_eq!(index.keys(), ["DEU"]);
    assert!(index.get("").is_none());
}

#[test]
fn test_comma_list_yields_one_entry_per_code() {
    let dialects = vec![dialect("stan1293", "eng, en", Some(53.0))];
    let index = build_dialect_index(&dialects);

    for code in ["eng", "en"] {
        let found = index.get(code).unwrap();
        assert_eq!(found.count(), 1);
        assert!(std::ptr::eq(found.primary(), &dialects[0]));
    }
    assert!(index.get("eng, en").is_none());
}

#[test]
fn test_stringified_nan_isocodes_yield_no_entry() {
    let dialects = vec![
        dialect("nocd1234", "nan", Some(1.0)),
        dialect("minn1241", "nan, zho", Some(24.0)),
    ];
    let index = build_dialect_index(&dialects);

    let found = index.get("nan").unwrap();
    assert_eq!(found.count(), 1);
    assert_eq!(found.primary().glottocode.as_deref(), Some("minn1241"));
    assert!(index.get("zho").is_some());
}

#[test]
fn test_multi_index_preserves_source_order() {
    let dialects = vec![
        dialect("firs1234", "abc", Some(1.0)),
        dialect("seco1234", "abc,def", Some(2.0)),
        dialect("thir1234", "abc", None),
    ];
    let index = build_dialect_index(&dialects);

    let found = index.get("abc").unwrap();
    assert!(found.is_ambiguous());
    let order: Vec<_> = found
        .iter()
        .map(|d| d.glottocode.as_deref().unwrap())
        .collect();
    assert_eq!(order, ["firs1234", "seco1234", "thir1234"]);
    assert_eq!(found.primary().glottocode.as_deref(), Some("firs1234"));
    assert_eq!(index.get("def").unwrap().count(), 1);
}

#[test]
fn test_collision_policy_parsing() {
    assert_eq!("last-wins".parse::<CollisionPolicy>(), Ok(CollisionPolicy::LastWins));
    assert_eq!("FIRST_WINS".parse::<CollisionPolicy>(), Ok(CollisionPolicy::FirstWins));
    assert_eq!("reject".parse::<CollisionPolicy>(), Ok(CollisionPolicy::Reject));
    assert!("sometimes".parse::<CollisionPolicy>().is_err());
    assert_eq!(CollisionPolicy::default().to_string(), "last-wins");
}
