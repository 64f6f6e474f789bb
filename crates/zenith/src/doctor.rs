// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zenith doctor` command implementation.
//!
//! Runs diagnostic checks against the configured environment: config
//! validity, bridge reachability, credential completeness, and content
//! generator key presence.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use zenith_bridge::BridgeClient;
use zenith_config::model::ZenithConfig;
use zenith_core::ZenithError;
use zenith_core::types::Credentials;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run the `zenith doctor` command.
///
/// With `--plain`, disables colored output.
pub async fn run_doctor(config: &ZenithConfig, plain: bool) -> Result<(), ZenithError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let mut results = Vec::new();

    results.push(check_config().await);
    results.push(check_bridge(config).await);

    let credentials = load_credentials(config).await;
    results.push(check_whatsapp_credentials(&credentials));
    results.push(check_gemini_key(config, &credentials));

    println!();
    println!("  zenith doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        let duration_ms = result.duration.as_millis();
        let line;

        match result.status {
            CheckStatus::Pass => {
                if use_color {
                    use colored::Colorize;
                    let symbol = "✓".green().to_string();
                    line = format!(
                        "    {symbol} {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                } else {
                    line = format!(
                        "    [OK]   {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
            CheckStatus::Warn => {
                warn_count += 1;
                if use_color {
                    use colored::Colorize;
                    let symbol = "!".yellow().to_string();
                    line = format!(
                        "    {symbol} {:<20} {} ({duration_ms}ms)",
                        result.name,
                        result.message.yellow()
                    );
                } else {
                    line = format!(
                        "    [WARN] {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
            CheckStatus::Fail => {
                fail_count += 1;
                if use_color {
                    use colored::Colorize;
                    let symbol = "✗".red().to_string();
                    line = format!(
                        "    {symbol} {:<20} {} ({duration_ms}ms)",
                        result.name,
                        result.message.red()
                    );
                } else {
                    line = format!(
                        "    [FAIL] {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
        }

        println!("{line}");
    }

    println!();

    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }

    println!();

    Ok(())
}

/// Check configuration loads without errors.
async fn check_config() -> CheckResult {
    let start = Instant::now();
    match zenith_config::load_and_validate() {
        Ok(_) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Pass,
            message: "valid".to_string(),
            duration: start.elapsed(),
        },
        Err(errors) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Fail,
            message: format!("{} error(s)", errors.len()),
            duration: start.elapsed(),
        },
    }
}

/// Check the Apps Script bridge endpoint is reachable.
async fn check_bridge(config: &ZenithConfig) -> CheckResult {
    let start = Instant::now();

    let Some(url) = &config.bridge.url else {
        return CheckResult {
            name: "Bridge".to_string(),
            status: CheckStatus::Warn,
            message: "no URL configured (demo mode, fallback data)".to_string(),
            duration: start.elapsed(),
        };
    };

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            return CheckResult {
                name: "Bridge".to_string(),
                status: CheckStatus::Fail,
                message: format!("HTTP client error: {e}"),
                duration: start.elapsed(),
            };
        }
    };

    match client
        .get(url)
        .query(&[("action", "read"), ("sheet", "Keys")])
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => CheckResult {
            name: "Bridge".to_string(),
            status: CheckStatus::Pass,
            message: "reachable".to_string(),
            duration: start.elapsed(),
        },
        Ok(resp) => CheckResult {
            name: "Bridge".to_string(),
            status: CheckStatus::Fail,
            message: format!("status {}", resp.status()),
            duration: start.elapsed(),
        },
        Err(e) => {
            let msg = if e.is_timeout() {
                "timeout (5s)".to_string()
            } else if e.is_connect() {
                "connection refused".to_string()
            } else {
                format!("error: {e}")
            };
            CheckResult {
                name: "Bridge".to_string(),
                status: CheckStatus::Fail,
                message: msg,
                duration: start.elapsed(),
            }
        }
    }
}

/// Load the credential view from the Keys table, tolerating failures.
async fn load_credentials(config: &ZenithConfig) -> Credentials {
    match BridgeClient::new(&config.bridge) {
        Ok(bridge) => Credentials::from_keys(&bridge.fetch_keys().await),
        Err(_) => Credentials::default(),
    }
}

/// Check the Keys table carries a token and a sender phone id.
fn check_whatsapp_credentials(credentials: &Credentials) -> CheckResult {
    let start = Instant::now();
    let mut missing = Vec::new();

    if credentials.require_token().is_err() {
        missing.push("whatsapp_access_token");
    }
    if credentials.resolve_sender(None).is_err() {
        missing.push("whatsapp_phone_id");
    }

    if missing.is_empty() {
        let extra = credentials.senders.len();
        let message = if extra > 0 {
            format!("token + {} named sender(s)", extra)
        } else {
            "token + primary sender".to_string()
        };
        CheckResult {
            name: "WhatsApp keys".to_string(),
            status: CheckStatus::Pass,
            message,
            duration: start.elapsed(),
        }
    } else {
        CheckResult {
            name: "WhatsApp keys".to_string(),
            status: CheckStatus::Fail,
            message: format!("missing: {}", missing.join(", ")),
            duration: start.elapsed(),
        }
    }
}

/// Check a Gemini key is available from config or the Keys table.
fn check_gemini_key(config: &ZenithConfig, credentials: &Credentials) -> CheckResult {
    let start = Instant::now();
    let present = config.gemini.api_key.is_some() || credentials.gemini_api_key.is_some();

    if present {
        CheckResult {
            name: "Gemini key".to_string(),
            status: CheckStatus::Pass,
            message: "configured".to_string(),
            duration: start.elapsed(),
        }
    } else {
        CheckResult {
            name: "Gemini key".to_string(),
            status: CheckStatus::Warn,
            message: "not configured (AI drafting unavailable)".to_string(),
            duration: start.elapsed(),
        }
    }
}
