// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Hearth configuration system.

use hearth_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_hearth_config() {
    let toml = r#"
[api]
base_url = "http://localhost:3000/api/v1"
timeout_secs = 10

[payment]
public_key = "pk_test_abc123"

[session]
token_path = "/tmp/hearth-token"

[client]
log_level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.api.base_url, "http://localhost:3000/api/v1");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.payment.public_key.as_deref(), Some("pk_test_abc123"));
    assert_eq!(config.session.token_path.as_deref(), Some("/tmp/hearth-token"));
    assert_eq!(config.client.log_level, "debug");
}

/// Unknown field in [api] section produces an error.
#[test]
fn unknown_field_in_api_produces_error() {
    let toml = r#"
[api]
base_ulr = "http://localhost:3000"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_ulr"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert!(config.api.base_url.starts_with("https://"));
    assert_eq!(config.api.timeout_secs, 30);
    assert!(config.payment.public_key.is_none());
    assert!(config.session.token_path.is_none());
    assert_eq!(config.client.log_level, "info");
}

/// Overrides arriving as dotted keys (the shape `HEARTH_API_BASE_URL` maps
/// to) win over TOML values.
#[test]
fn dotted_override_wins_over_toml() {
    // We test this via the Figment builder directly to control env vars in test
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };
    use hearth_config::HearthConfig;

    let toml_content = r#"
[api]
base_url = "http://file:3000/api/v1"
"#;

    let config: HearthConfig = Figment::new()
        .merge(Serialized::defaults(HearthConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("api.base_url", "http://override:9999/api/v1"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.api.base_url, "http://override:9999/api/v1");
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };
    use hearth_config::HearthConfig;

    let config: HearthConfig = Figment::new()
        .merge(Serialized::defaults(HearthConfig::default()))
        .merge(Toml::file("/nonexistent/path/hearth.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.api.timeout_secs, 30);
}

/// Validation failures come back as diagnostics, not panics.
#[test]
fn invalid_values_produce_validation_errors() {
    let toml = r#"
[api]
base_url = "not-a-url"

[client]
log_level = "shouting"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2);
    let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    assert!(rendered.iter().any(|m| m.contains("base_url")));
    assert!(rendered.iter().any(|m| m.contains("log_level")));
}
