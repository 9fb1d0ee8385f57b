//! File-based tests for the JSON loaders.

use std::io::Write;
use std::path::Path;

use playbook_config::*;
use proptest::prelude::*;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// =============================================================================
// CUSTODY CONFIG
// =============================================================================

#[test]
fn test_load_custody_reference_round_trip() {
    let json = ConfigKind::Custody.example_json().unwrap();
    let file = write_temp(&json);

    let config = load_custody_config(file.path()).unwrap();
    assert_eq!(config, CustodyConfig::reference());
}

#[test]
fn test_load_custody_minimal() {
    let file = write_temp(
        r#"{
            "custody_models": ["Qualified Custodian", "Exchange Custody"],
            "attributes": ["Security Level", "Cost"],
            "scores": {
                "Qualified Custodian": [4, 2],
                "Exchange Custody": [2.5, 4]
            }
        }"#,
    );

    let matrix = load_custody_config(file.path()).unwrap().to_matrix().unwrap();
    assert_eq!(matrix.models()[0].name, "Qualified Custodian");
    assert_eq!(matrix.score(1, 0), 2.5);
}

#[test]
fn test_load_custody_missing_key() {
    let file = write_temp(r#"{"custody_models": ["A"], "attributes": ["x"]}"#);

    let err = load_custody_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingKeys { .. }));
    assert_eq!(
        err.to_string(),
        "Config file missing required keys: [custody_models, attributes, scores]"
    );
}

#[test]
fn test_load_custody_score_out_of_range() {
    let file = write_temp(
        r#"{"custody_models": ["A"], "attributes": ["x", "y"], "scores": {"A": [3, 7]}}"#,
    );

    let err = load_custody_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "scores.A"));
}

#[test]
fn test_load_custody_non_numeric_score() {
    let file = write_temp(
        r#"{"custody_models": ["A"], "attributes": ["x"], "scores": {"A": ["high"]}}"#,
    );

    let err = load_custody_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_malformed_json() {
    let file = write_temp(r#"{"custody_models": ["A",}"#);

    let err = load_custody_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Invalid JSON in"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custody_config.json");

    let err = load_custody_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
    assert!(err.to_string().contains("not found"));
}

// =============================================================================
// SHARPE CONFIG
// =============================================================================

#[test]
fn test_load_sharpe_reference_round_trip() {
    let json = ConfigKind::Sharpe.example_json().unwrap();
    let file = write_temp(&json);

    let config = load_sharpe_config(file.path()).unwrap();
    assert_eq!(config, SharpeConfig::reference());
}

#[test]
fn test_load_sharpe_partial_style_and_missing_color() {
    let file = write_temp(
        r##"{
            "risk_free_rate": 0.03,
            "plot_style": {"title_font_size": 18},
            "asset_classes": {
                "Bitcoin": {"color": "#F7931A", "return": 0.42, "volatility": 0.65},
                "Cash": {"return": 0.04, "volatility": 0.01}
            }
        }"##,
    );

    let config = load_sharpe_config(file.path()).unwrap();
    assert_eq!(config.plot_style.title_font_size, 18.0);
    assert_eq!(config.plot_style.figure_size, [12.0, 12.0]);

    let assets = config.assets();
    assert!(assets.iter().all(|a| a.color.is_some()));
}

#[test]
fn test_load_sharpe_zero_volatility() {
    let file = write_temp(
        r#"{
            "risk_free_rate": 0.025,
            "plot_style": {},
            "asset_classes": {"Stablecoin": {"return": 0.04, "volatility": 0}}
        }"#,
    );

    let err = load_sharpe_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Stablecoin"));
}

#[test]
fn test_load_sharpe_missing_return() {
    let file = write_temp(
        r#"{
            "risk_free_rate": 0.025,
            "plot_style": {},
            "asset_classes": {"Gold": {"volatility": 0.15}}
        }"#,
    );

    let err = load_sharpe_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_load_config_keeps_only_required_keys() {
    let file = write_temp(r#"{"risk_free_rate": 0.02, "plot_style": {}, "asset_classes": {}, "notes": "x"}"#);

    let object = load_config(file.path(), &SHARPE_REQUIRED_KEYS).unwrap();
    let mut keys: Vec<_> = object.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["asset_classes", "plot_style", "risk_free_rate"]);
}

#[test]
fn test_check_file_by_kind() {
    let custody = write_temp(&ConfigKind::Custody.example_json().unwrap());
    assert!(ConfigKind::Custody.check_file(custody.path()).is_ok());
    assert!(ConfigKind::Sharpe.check_file(custody.path()).is_err());
    assert!(ConfigKind::Custody
        .check_file(Path::new("/nonexistent.json"))
        .is_err());
}

// =============================================================================
// PROPERTY: SCORE RANGE
// =============================================================================

proptest! {
    #[test]
    fn property_scores_validated_against_range(score in -2.0f64..8.0) {
        let mut config = CustodyConfig::reference();
        if let Some(scores) = config.scores.get_mut("Exchange Custody") {
            scores[0] = score;
        }
        let in_range = (1.0..=5.0).contains(&score);
        prop_assert_eq!(config.is_valid(), in_range);
    }

    #[test]
    fn property_score_length_must_match(len in 0usize..12) {
        let mut config = CustodyConfig::reference();
        config.scores.insert("Exchange Custody".into(), vec![3.0; len]);
        prop_assert_eq!(config.is_valid(), len == config.attributes.len());
    }
}
