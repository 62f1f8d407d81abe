//! Tests for language family resolution

use atlas_enrich::algorithm::family::{FamilyMap, FamilyResolver, ISOLATE, Tier};

use crate::utils::languoid;

#[test]
fn test_two_step_resolution() {
    let map = FamilyMap::from_pairs([("fam001", "Indo-European")], [("abc1234", "fam001")]);
    let resolved = FamilyResolver::new(&map).resolve(Some("abc1234"));

    assert_eq!(resolved.tier, Tier::Parent);
    assert_eq!(resolved.name, "Indo-European");
    assert_eq!(resolved.id, "fam001");
}

#[test]
fn test_unknown_identifier_is_isolate() {
    let map = FamilyMap::from_pairs([("fam001", "Indo-European")], [("abc1234", "fam001")]);
    let resolved = FamilyResolver::new(&map).resolve(Some("iso9999"));

    assert_eq!(resolved.name, ISOLATE);
    assert_eq!(resolved.id, "");
}

#[test]
fn test_family_level_identifier_resolves_to_itself() {
    let map = FamilyMap::from_pairs([("fam001", "Indo-European")], Vec::<(&str, &str)>::new());
    let resolved = FamilyResolver::new(&map).resolve(Some("fam001"));

    assert_eq!(resolved.tier, Tier::SelfFamily);
    assert_eq!((resolved.name.as_str(), resolved.id.as_str()), ("Indo-European", "fam001"));
}

#[test]
fn test_missing_identifier_is_unknown() {
    let map = FamilyMap::default();
    let resolver = FamilyResolver::new(&map);

    for id in [None, Some(""), Some("  ")] {
        let resolved = resolver.resolve(id);
        assert_eq!(resolved.tier, Tier::Unknown);
        assert_eq!((resolved.name.as_str(), resolved.id.as_str()), ("", ""));
    }
}

#[test]
fn test_tiers_apply_in_order() {
    assert_eq!(
        Tier::ORDER,
        [Tier::Parent, Tier::SelfFamily, Tier::Isolate, Tier::Unknown]
    );
}

#[test]
fn test_map_from_languoid_rows() {
    let languoids = vec![
        languoid("indo1319", "family", None, "Indo-European"),
        languoid("germ1287", "family", Some("indo1319"), "Germanic"),
        languoid("stan1293", "language", Some("indo1319"), "English"),
        languoid("orph0001", "language", Some("gone0000"), "Orphan"),
        languoid("", "family", None, "Nameless id"),
    ];
    let map = FamilyMap::from_languoids(&languoids);

    assert_eq!(map.family_count(), 2);
    assert_eq!(map.link_count(), 3);
    assert_eq!(map.broken_links(), 1);
    assert_eq!(map.family_name("germ1287"), Some("Germanic"));
    assert_eq!(map.family_of("stan1293"), Some("indo1319"));

    let resolver = FamilyResolver::new(&map);
    // a sub-family resolves to its top-level family, not to itself
    let germanic = resolver.resolve(Some("germ1287"));
    assert_eq!(germanic.name, "Indo-European");
    assert_eq!(germanic.id, "indo1319");

    // broken link falls through to isolate
    assert!(resolver.resolve(Some("orph0001")).is_isolate());
}

#[test]
fn test_nameless_family_keeps_empty_name() {
    let mut row = languoid("fam0002", "family", None, "");
    row.name = None;
    let map = FamilyMap::from_languoids(&[row]);

    assert_eq!(map.family_name("fam0002"), Some(""));
    let resolved = FamilyResolver::new(&map).resolve(Some("fam0002"));
    assert_eq!(resolved.tier, Tier::SelfFamily);
    assert_eq!(resolved.name, "");
}
