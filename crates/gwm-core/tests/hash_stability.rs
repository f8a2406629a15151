use std::collections::BTreeMap;

use gwm_core::{series_hash, stable_hash_string, to_canonical_json_bytes, Mode, RunProvenance};

#[test]
fn canonical_json_sorts_keys() {
    let mut forward = serde_json::Map::new();
    forward.insert("zeta".into(), 1.into());
    forward.insert("alpha".into(), 2.into());
    let bytes = to_canonical_json_bytes(&forward).expect("json");
    assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"alpha":2,"zeta":1}"#);
}

#[test]
fn stable_hash_ignores_insertion_order() {
    let mut a = BTreeMap::new();
    a.insert("q", 1.5);
    a.insert("m", 20.0);
    let mut b = serde_json::Map::new();
    b.insert("m".into(), serde_json::json!(20.0));
    b.insert("q".into(), serde_json::json!(1.5));
    assert_eq!(
        stable_hash_string(&a).unwrap(),
        stable_hash_string(&b).unwrap()
    );
}

#[test]
fn series_hash_tracks_bits_and_length() {
    let base = [0.0, 1.0, 2.0];
    assert_eq!(series_hash(&base), series_hash(&[0.0, 1.0, 2.0]));
    assert_ne!(series_hash(&base), series_hash(&[0.0, 1.0]));
    assert_ne!(series_hash(&[0.0]), series_hash(&[-0.0]));
}

#[test]
fn mode_serializes_as_pair() {
    let json = serde_json::to_string(&Mode::DOMINANT).unwrap();
    assert_eq!(json, "[2,2]");
    let parsed: Mode = serde_json::from_str("[3,-1]").unwrap();
    assert_eq!(parsed, Mode::new(3, -1).unwrap());
    assert!(serde_json::from_str::<Mode>("[1,2]").is_err());
}

#[test]
fn provenance_round_trip_json() {
    let provenance = RunProvenance::now("gwm-core", "0.1.0").with_input("a", "abc");
    let json = serde_json::to_string_pretty(&provenance).expect("serialize");
    let decoded: RunProvenance = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, provenance);
    assert_eq!(decoded.input_hashes["a"], "abc");
}
