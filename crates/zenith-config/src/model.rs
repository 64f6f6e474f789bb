// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Zenith campaign console.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Zenith configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; a completely empty config runs in disconnected demo mode.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZenithConfig {
    /// Console identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Tabular data bridge (Apps Script endpoint) settings.
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// WhatsApp Cloud API settings.
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Gemini content generator settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Device-local session store settings.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Console identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the console instance.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default campaign copy language/dialect.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            language: default_language(),
        }
    }
}

fn default_agent_name() -> String {
    "zenith".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_language() -> String {
    "Moroccan Darija".to_string()
}

/// Tabular data bridge configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Apps Script web-app URL. `None` runs against built-in fallback
    /// datasets (demo mode) and treats writes as local-only.
    #[serde(default)]
    pub url: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_bridge_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_bridge_timeout_secs(),
        }
    }
}

fn default_bridge_timeout_secs() -> u64 {
    20
}

/// WhatsApp Cloud API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WhatsAppConfig {
    /// Graph API base URL. Overridable for testing.
    #[serde(default = "default_graph_url")]
    pub graph_url: String,

    /// Graph API version segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Unconditional delay between recipients in milliseconds, to respect
    /// the provider's per-second rate limits.
    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,

    /// Default template name for template-mode delivery.
    #[serde(default = "default_template_name")]
    pub template_name: String,

    /// Default template locale code.
    #[serde(default = "default_template_locale")]
    pub template_locale: String,

    /// Cap on the operator-facing broadcast log.
    #[serde(default = "default_log_cap")]
    pub log_cap: usize,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            graph_url: default_graph_url(),
            api_version: default_api_version(),
            send_delay_ms: default_send_delay_ms(),
            template_name: default_template_name(),
            template_locale: default_template_locale(),
            log_cap: default_log_cap(),
        }
    }
}

fn default_graph_url() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_api_version() -> String {
    "v21.0".to_string()
}

fn default_send_delay_ms() -> u64 {
    1000
}

fn default_template_name() -> String {
    "hello_world".to_string()
}

fn default_template_locale() -> String {
    "en_US".to_string()
}

fn default_log_cap() -> usize {
    10
}

/// Gemini content generator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` falls back to the `gemini_api_key` row in the
    /// Keys table.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL. Overridable for testing.
    #[serde(default = "default_gemini_url")]
    pub base_url: String,

    /// Model for marketing-copy variation generation.
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model for image generation.
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Model for video generation.
    #[serde(default = "default_video_model")]
    pub video_model: String,

    /// Model for voice synthesis.
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Model for live-chat smart replies.
    #[serde(default = "default_reply_model")]
    pub reply_model: String,

    /// Prebuilt voice name for voice synthesis.
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Maximum polling attempts while waiting for video generation.
    #[serde(default = "default_video_poll_max_attempts")]
    pub video_poll_max_attempts: u32,

    /// Initial poll interval in seconds; later polls shorten adaptively.
    #[serde(default = "default_video_poll_initial_secs")]
    pub video_poll_initial_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            video_model: default_video_model(),
            tts_model: default_tts_model(),
            reply_model: default_reply_model(),
            voice: default_voice(),
            video_poll_max_attempts: default_video_poll_max_attempts(),
            video_poll_initial_secs: default_video_poll_initial_secs(),
        }
    }
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_video_model() -> String {
    "veo-3.1-fast-generate-preview".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_reply_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_voice() -> String {
    "Kore".to_string()
}

fn default_video_poll_max_attempts() -> u32 {
    30
}

fn default_video_poll_initial_secs() -> u64 {
    10
}

/// Device-local session store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Path to the session JSON file.
    #[serde(default = "default_session_path")]
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("zenith").join("session.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("session.json"))
        .to_string_lossy()
        .into_owned()
}
