// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as sampling ranges, history bounds, and production-only requirements.

use crate::diagnostic::ConfigError;
use crate::model::{Environment, FolioConfig};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FolioConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.database_path().trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if !(0.0..=2.0).contains(&config.openai.temperature) {
        fail(format!(
            "openai.temperature must be between 0 and 2, got {}",
            config.openai.temperature
        ));
    }

    if config.openai.max_tokens == 0 {
        fail("openai.max_tokens must be greater than 0".to_string());
    }

    if config.openai.timeout_secs == 0 {
        fail("openai.timeout_secs must be greater than 0".to_string());
    }

    // History holds whole exchanges.
    let limit = config.agent.history_limit;
    if limit < 2 || limit % 2 != 0 {
        fail(format!(
            "agent.history_limit must be an even number of at least 2, got {limit}"
        ));
    }

    if config.agent.max_message_chars == 0 {
        fail("agent.max_message_chars must be greater than 0".to_string());
    }

    if !config.email.notification_email.contains('@') {
        fail(format!(
            "email.notification_email `{}` is not an email address",
            config.email.notification_email
        ));
    }

    if config.site.environment == Environment::Production {
        if config
            .site
            .secret_key
            .as_deref()
            .is_none_or(|k| k.trim().is_empty())
        {
            fail("site.secret_key must be set in production".to_string());
        }
        if config.admin.password.is_some() {
            fail(
                "admin.password is a development fallback; set admin.password_hash in production"
                    .to_string(),
            );
        }
        if config.admin.password_hash.is_none() {
            fail("admin.password_hash must be set in production".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
