//! Config hash stability.
//!
//! GREEN when:
//! - loading the same layers twice yields the same hash
//! - key order inside a document does not change the hash
//! - different values produce different hashes
//! - later layers override earlier ones

use hv_config::load_from_strings;

const BASE_YAML: &str = r#"
source:
  endpoint: "https://holdings.example.com/test"
  holdings_field: "userHolding"
  timeout_ms: 15000
view:
  splash_delay_ms: 2000
  currency_symbol: "₹"
"#;

const BASE_YAML_REORDERED: &str = r#"
view:
  currency_symbol: "₹"
  splash_delay_ms: 2000
source:
  timeout_ms: 15000
  holdings_field: "userHolding"
  endpoint: "https://holdings.example.com/test"
"#;

const OVERLAY_YAML: &str = r#"
source:
  timeout_ms: 5000
view:
  currency_symbol: "$"
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_from_strings(&[BASE_YAML]).unwrap();
    let b = load_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let original = load_from_strings(&[BASE_YAML]).unwrap();
    let reordered = load_from_strings(&[BASE_YAML_REORDERED]).unwrap();
    assert_eq!(original.config_hash, reordered.config_hash);
}

#[test]
fn overlay_changes_hash_and_values() {
    let base = load_from_strings(&[BASE_YAML]).unwrap();
    let layered = load_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_ne!(base.config_hash, layered.config_hash);

    let cfg = layered.holdings().unwrap();
    assert_eq!(cfg.source.timeout_ms, 5000);
    assert_eq!(cfg.view.currency_symbol, "$");
    // Untouched keys survive the merge.
    assert_eq!(cfg.source.endpoint, "https://holdings.example.com/test");
    assert_eq!(cfg.view.splash_delay_ms, 2000);
}

#[test]
fn hash_is_hex_sha256() {
    let loaded = load_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(loaded.config_hash.len(), 64);
    assert!(loaded.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}
