// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::{SehaConfig, StorageBackend};

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &SehaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.gateway.host.trim();
    if host.is_empty() {
        fail("gateway.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.gateway.session_cookie.trim().is_empty() {
        fail("gateway.session_cookie must not be empty".to_string());
    }

    if config.storage.backend == StorageBackend::Sqlite
        && config.storage.database_path.trim().is_empty()
    {
        fail("storage.database_path must not be empty for the sqlite backend".to_string());
    }

    if config.anthropic.max_tokens == 0 {
        fail("anthropic.max_tokens must be greater than zero".to_string());
    }

    if config.anthropic.default_model.trim().is_empty() {
        fail("anthropic.default_model must not be empty".to_string());
    }

    if config.anthropic.api_version.trim().is_empty() {
        fail("anthropic.api_version must not be empty".to_string());
    }

    if !config.anthropic.base_url.starts_with("http://")
        && !config.anthropic.base_url.starts_with("https://")
    {
        fail(format!(
            "anthropic.base_url `{}` must be an http(s) URL",
            config.anthropic.base_url
        ));
    }

    if config.annotation.marker.trim().is_empty() {
        fail("annotation.marker must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&SehaConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_failure() {
        let mut config = SehaConfig::default();
        config.gateway.host = String::new();
        config.anthropic.max_tokens = 0;
        config.annotation.marker = "  ".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn memory_backend_ignores_database_path() {
        let mut config = SehaConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.storage.database_path = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = SehaConfig::default();
        config.anthropic.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("base_url"));
    }
}
