// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Omnidesk configuration system.

use omnidesk_config::diagnostic::{ConfigError, suggest_key};
use omnidesk_config::loader::load_config_from_path;
use omnidesk_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_omnidesk_config() {
    let toml = r#"
[app]
name = "inbox-demo"
log_level = "debug"

[gateway]
endpoint = "wss://rt.example.com/inbox"
connect_timeout_secs = 5

[gateway.simulation]
message_interval_secs = 10
typing_interval_secs = 5
typing_probability = 0.5
delivered_delay_ms = 500
read_delay_ms = 1500
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "inbox-demo");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(
        config.gateway.endpoint.as_deref(),
        Some("wss://rt.example.com/inbox")
    );
    assert_eq!(config.gateway.connect_timeout_secs, 5);
    assert_eq!(config.gateway.simulation.message_interval_secs, 10);
    assert_eq!(config.gateway.simulation.typing_interval_secs, 5);
    assert_eq!(config.gateway.simulation.typing_probability, 0.5);
    assert_eq!(config.gateway.simulation.delivered_delay_ms, 500);
    assert_eq!(config.gateway.simulation.read_delay_ms, 1500);
}

/// Unknown field in [gateway] produces an UnknownKey error with a suggestion.
#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[gateway]
endpont = "wss://rt.example.com"
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown key must be rejected");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => Some((key.clone(), suggestion.clone())),
            _ => None,
        })
        .expect("expected an UnknownKey error");

    assert_eq!(unknown.0, "endpont");
    assert_eq!(unknown.1.as_deref(), Some("endpoint"));
}

/// Wrong value type surfaces as an InvalidType diagnostic.
#[test]
fn wrong_type_produces_invalid_type_error() {
    let toml = r#"
[gateway.simulation]
delivered_delay_ms = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("wrong type must be rejected");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::InvalidType { .. } | ConfigError::Other(_)
    )));
}

/// Semantic validation failures are reported after successful parsing.
#[test]
fn validation_errors_are_collected() {
    let toml = r#"
[app]
log_level = "shout"

[gateway]
endpoint = "http://not-a-websocket"
"#;

    let errors = load_and_validate_str(toml).expect_err("invalid values must be rejected");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// Empty input yields the compiled defaults, which are valid.
#[test]
fn empty_config_is_valid() {
    let config = load_and_validate_str("").expect("defaults must validate");
    assert_eq!(config.app.name, "omnidesk");
    assert!(config.gateway.endpoint.is_none());
}

/// A config file loaded by explicit path overrides the compiled defaults.
#[test]
fn explicit_path_overrides_defaults() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("omnidesk.toml");
    std::fs::write(
        &path,
        r#"
[app]
name = "path-loaded"
"#,
    )
    .expect("write config file");

    let config = load_config_from_path(&path).expect("load from path");
    assert_eq!(config.app.name, "path-loaded");
    // Untouched sections keep their defaults.
    assert_eq!(config.gateway.simulation.message_interval_secs, 30);
}

#[test]
fn suggest_key_exposed_for_tooling() {
    assert_eq!(
        suggest_key("simultion", &["simulation", "endpoint"]),
        Some("simulation".to_string())
    );
}
