use super::{canonical_json_bytes, fingerprint_hex, FingerprintOptions};
use serde_json::json;

#[test]
fn canonical_bytes_sort_nested_keys() {
    let value = json!({"b": 1, "a": {"d": [true, {"z": null, "y": "x"}], "c": 2.5}});
    let bytes = canonical_json_bytes(&value, &FingerprintOptions::default()).expect("encode");
    assert_eq!(
        String::from_utf8(bytes).expect("utf8"),
        r#"{"a":{"c":2.5,"d":[true,{"y":"x","z":null}]},"b":1}"#
    );
}

#[test]
fn fingerprint_ignores_configured_keys() {
    let options = FingerprintOptions::ignoring(["timestamp"]);
    let first = json!({"volume": 5000, "meta": {"timestamp": "2024-01-01T00:00:00Z"}});
    let second = json!({"meta": {"timestamp": "2025-06-30T12:00:00Z"}, "volume": 5000});
    assert_eq!(
        fingerprint_hex(&first, &options).expect("hash"),
        fingerprint_hex(&second, &options).expect("hash")
    );
    assert_ne!(
        fingerprint_hex(&first, &options).expect("hash"),
        fingerprint_hex(&json!({"volume": 4000}), &options).expect("hash")
    );
}

#[test]
fn fingerprint_is_lowercase_sha256_hex() {
    let hash = fingerprint_hex(&json!({}), &FingerprintOptions::default()).expect("hash");
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase()));
}
