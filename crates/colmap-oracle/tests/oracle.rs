//! Integration tests for the oracle seam.

use std::fs;

use colmap_oracle::{MappingOracle, OracleConfig, ReplayOracle};

fn ask(oracle: &dyn MappingOracle) -> String {
    oracle.complete("prompt").unwrap()
}

#[test]
fn test_replay_from_file_through_trait_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("response.txt");
    fs::write(&path, "```python\n{'Name': 'full_name'}\n```\n").unwrap();

    let oracle = ReplayOracle::from_file(&path).unwrap();

    assert_eq!(ask(&oracle), "```python\n{'Name': 'full_name'}\n```\n");
    assert!(oracle.name().starts_with("replay:"));
}

#[test]
fn test_config_file_round_trip() {
    let text = r#"
        model = "models/gemini-1.5-pro"
        timeout_secs = 20
        temperature = 0.0
    "#;
    let config: OracleConfig = toml::from_str(text).unwrap();

    assert_eq!(config.model_name(), "gemini-1.5-pro");
    assert_eq!(config.temperature, Some(0.0));
    assert!(config.api_key.is_none());

    let rendered = toml::to_string(&config).unwrap();
    let reparsed: OracleConfig = toml::from_str(&rendered).unwrap();
    assert_eq!(reparsed, config);
}
