//! Shared fixtures for the test suite

use std::fs;
use std::path::Path;

use atlas_enrich::config::{
    CENTROIDS_FILE, COUNTRIES_FILE, GLOTTOLOG_COORDINATES_FILE, GLOTTOLOG_LANGUOID_FILE,
    LANGUAGES_FILE, PEOPLE_GROUPS_FILE,
};
use atlas_enrich::{
    Collections, Country, CountryCentroid, Dialect, EnrichConfig, Language, Languoid, PeopleGroup,
};
use serde::Serialize;
use serde_json::{Value, json};

/// Deserialize a fixture value, panicking on malformed fixtures
pub fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("valid fixture")
}

pub fn people_group(country: &str, id: i64, language: &str, least_reached: &str) -> PeopleGroup {
    from_json(json!({
        "ROG3": country,
        "PeopleID3": id,
        "PeopNameInCountry": format!("Group {id}"),
        "ROL3": language,
        "Population": 1000 * id,
        "LeastReached": least_reached,
    }))
}

pub fn language(code: &str, name: &str) -> Language {
    from_json(json!({
        "ROL3": code,
        "Language": name,
        "HubCountry": "India",
        "BibleStatus": 5,
        "BibleYear": "1950",
        "NTYear": "1930",
        "PortionsYear": "1900",
        "HasJesusFilm": "Y",
        "AudioRecordings": "Y",
        "Status": "L",
    }))
}

pub fn country(code: &str, name: &str) -> Country {
    from_json(json!({
        "ROG3": code,
        "Ctry": name,
        "Continent": "Asia",
        "RegionName": "South Asia",
        "PercentChristianity": "2.3",
        "PercentEvangelical": 0.6,
        "CntPeoples": 2264,
        "CntPeoplesLR": 2032,
        "JPScaleCtry": "1",
    }))
}

pub fn centroid(iso_a2: &str, iso_a3: &str, latitude: f64, longitude: f64) -> CountryCentroid {
    from_json(json!({
        "iso_a2": iso_a2,
        "iso_a3": iso_a3,
        "name": format!("Country {iso_a2}"),
        "latitude": latitude,
        "longitude": longitude,
        "continent": "Asia",
        "region_un": "Asia",
    }))
}

pub fn dialect(glottocode: &str, isocodes: &str, latitude: Option<f64>) -> Dialect {
    from_json(json!({
        "glottocode": glottocode,
        "name": format!("Dialect {glottocode}"),
        "isocodes": isocodes,
        "level": "language",
        "macroarea": "Eurasia",
        "latitude": latitude,
        "longitude": latitude.map(|lat| lat + 1.0),
    }))
}

pub fn languoid(id: &str, level: &str, family_id: Option<&str>, name: &str) -> Languoid {
    Languoid {
        id: id.to_string(),
        family_id: family_id.map(str::to_string),
        parent_id: family_id.map(str::to_string),
        name: Some(name.to_string()),
        level: Some(level.to_string()),
    }
}

/// A small but complete set of collections
///
/// - three people groups, two of them in countries with a centroid
/// - `hin` resolves through Glottolog to the Indo-European family
/// - `xyz` has no Glottolog entry
pub fn sample_collections() -> Collections {
    Collections {
        people_groups: vec![
            people_group("IN", 101, "hin", "Y"),
            people_group("NP", 102, "hin", "N"),
            people_group("ZZ", 103, "xyz", "Y"),
        ],
        languages: vec![language("hin", "Hindi"), language("xyz", "Unknown Tongue")],
        countries: vec![country("IN", "India"), country("ZZ", "Nowhere")],
        centroids: vec![
            centroid("IN", "IND", 22.0, 79.0),
            centroid("NP", "NPL", 28.3, 84.1),
        ],
        dialects: vec![dialect("hind1269", "hin", Some(25.0))],
        languoids: vec![
            languoid("indo1319", "family", None, "Indo-European"),
            languoid("hind1269", "language", Some("indo1319"), "Hindi"),
        ],
    }
}

pub fn write_json_fixture<T: Serialize>(path: &Path, value: &T) {
    let text = serde_json::to_string_pretty(value).expect("serializable fixture");
    fs::write(path, text).expect("write fixture");
}

/// Write the sample collections in their on-disk formats
pub fn write_sample_inputs(dir: &Path) {
    let collections = sample_collections();
    write_json_fixture(&dir.join(PEOPLE_GROUPS_FILE), &collections.people_groups);
    write_json_fixture(&dir.join(LANGUAGES_FILE), &collections.languages);
    write_json_fixture(&dir.join(COUNTRIES_FILE), &collections.countries);
    write_json_fixture(&dir.join(CENTROIDS_FILE), &collections.centroids);
    fs::write(
        dir.join(GLOTTOLOG_COORDINATES_FILE),
        r#"[
  {"glottocode": "hind1269", "name": "Hindi", "isocodes": "hin", "level": "language",
   "macroarea": "Eurasia", "latitude": 25.0, "longitude": 26.0},
  {"glottocode": "lost1234", "name": "Lost", "isocodes": "lst", "level": "language",
   "macroarea": NaN, "latitude": NaN, "longitude": -Infinity}
]"#,
    )
    .expect("write fixture");
    fs::write(
        dir.join(GLOTTOLOG_LANGUOID_FILE),
        "id,family_id,parent_id,name,level,latitude\n\
         indo1319,,,Indo-European,family,\n\
         hind1269,indo1319,indo1319,Hindi,language,25.0\n",
    )
    .expect("write fixture");
}

/// Configuration for a test run: no progress bars
pub fn test_config(dir: &Path) -> EnrichConfig {
    let mut config = EnrichConfig::from_data_dir(dir);
    config.show_progress = false;
    config
}
