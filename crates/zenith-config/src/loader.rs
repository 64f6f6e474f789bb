// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./zenith.toml` > `~/.config/zenith/zenith.toml` > `/etc/zenith/zenith.toml`
//! with environment variable overrides via `ZENITH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ZenithConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/zenith/zenith.toml` (system-wide)
/// 3. `~/.config/zenith/zenith.toml` (user XDG config)
/// 4. `./zenith.toml` (local directory)
/// 5. `ZENITH_*` environment variables
pub fn load_config() -> Result<ZenithConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZenithConfig::default()))
        .merge(Toml::file("/etc/zenith/zenith.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("zenith/zenith.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("zenith.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ZenithConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZenithConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ZenithConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZenithConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ZENITH_WHATSAPP_SEND_DELAY_MS` must
/// map to `whatsapp.send_delay_ms`, not `whatsapp.send.delay.ms`.
fn env_provider() -> Env {
    Env::prefixed("ZENITH_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: ZENITH_BRIDGE_URL -> "bridge_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("bridge_", "bridge.", 1)
            .replacen("whatsapp_", "whatsapp.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("session_", "session.", 1);
        mapped.into()
    })
}
