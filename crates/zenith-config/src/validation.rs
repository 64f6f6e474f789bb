// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL schemes, positive poll budgets, and known
//! log levels.

use crate::diagnostic::ConfigError;
use crate::model::ZenithConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ZenithConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if config.agent.language.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.language must not be empty".to_string(),
        });
    }

    // Bridge URL must be an absolute http(s) URL if configured
    if let Some(url) = &config.bridge.url {
        let url = url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("bridge.url `{url}` must start with http:// or https://"),
            });
        }
    }

    if config.bridge.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "bridge.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.whatsapp.graph_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "whatsapp.graph_url must not be empty".to_string(),
        });
    }

    if config.whatsapp.api_version.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "whatsapp.api_version must not be empty".to_string(),
        });
    }

    if config.whatsapp.log_cap == 0 {
        errors.push(ConfigError::Validation {
            message: "whatsapp.log_cap must be at least 1".to_string(),
        });
    }

    if config.gemini.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.base_url must not be empty".to_string(),
        });
    }

    if config.gemini.video_poll_max_attempts < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.video_poll_max_attempts must be at least 1, got {}",
                config.gemini.video_poll_max_attempts
            ),
        });
    }

    if config.gemini.video_poll_initial_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.video_poll_initial_secs must be at least 1".to_string(),
        });
    }

    if config.session.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
