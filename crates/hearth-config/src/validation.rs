// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as well-formed URLs and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::HearthConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HearthConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    } else if base_url.ends_with('/') {
        errors.push(ConfigError::Validation {
            message: format!(
                "api.base_url `{base_url}` must not end with a slash; endpoints supply their own"
            ),
        });
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    if let Some(key) = &config.payment.public_key
        && !key.starts_with("pk_")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "payment.public_key must be a public key (pk_...), got `{}...`",
                &key[..key.len().min(8)]
            ),
        });
    }

    if let Some(path) = &config.session.token_path
        && path.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "session.token_path must not be empty when set".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.client.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "client.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.client.log_level
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HearthConfig;

    #[test]
    fn default_config_is_valid() {
        let config = HearthConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = HearthConfig::default();
        config.api.base_url = "ftp://example.com".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("base_url"));
    }

    #[test]
    fn rejects_trailing_slash_base_url() {
        let mut config = HearthConfig::default();
        config.api.base_url = "https://example.com/api/v1/".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_secret_key_as_public_key() {
        let mut config = HearthConfig::default();
        config.payment.public_key = Some("sk_live_oops".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("public_key"));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = HearthConfig::default();
        config.client.log_level = "verbose".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn collects_all_errors_instead_of_failing_fast() {
        let mut config = HearthConfig::default();
        config.api.base_url = String::new();
        config.api.timeout_secs = 0;
        config.client.log_level = "loud".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
