// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zenith broadcast` command implementation.
//!
//! Drives the campaign wizard non-interactively: resolves the audience
//! and product from the bridge, drafts copy (manual or generated), and
//! launches the mission through the broadcast engine.

use std::io::IsTerminal;
use std::time::Duration;

use clap::Args;
use tracing::info;

use zenith_bridge::BridgeClient;
use zenith_campaign::audience::{self, Segment};
use zenith_campaign::broadcast::{BroadcastEngine, DeliveryMode, MissionOutcome};
use zenith_campaign::session::SessionStore;
use zenith_campaign::wizard::{ArchitectForm, Wizard, WizardError};
use zenith_config::model::ZenithConfig;
use zenith_core::ZenithError;
use zenith_core::types::{Credentials, TemplateSpec};
use zenith_gemini::GeminiClient;
use zenith_whatsapp::CloudApiClient;

#[derive(Args, Debug)]
pub struct BroadcastArgs {
    /// Product name, matched against the Product Info table.
    #[arg(long)]
    pub product: String,

    /// Audience segment (all, new, pending, confirmed, delivered).
    #[arg(long, default_value = "all")]
    pub segment: String,

    /// Campaign copy language; defaults to the configured language.
    #[arg(long)]
    pub language: Option<String>,

    /// Hand-written message body. Skips AI drafting entirely.
    #[arg(long, conflicts_with = "angle")]
    pub message: Option<String>,

    /// Strategic angle for AI-drafted copy, e.g. "Scarcity".
    #[arg(long)]
    pub angle: Option<String>,

    /// Which of the four generated variations to send (0-3).
    #[arg(long, default_value_t = 0)]
    pub pick: usize,

    /// Call-to-action link appended to the message body.
    #[arg(long)]
    pub cta: Option<String>,

    /// Sender alias (`whatsapp_node_<alias>` key); defaults to the
    /// primary `whatsapp_phone_id`.
    #[arg(long)]
    pub sender: Option<String>,

    /// Deliver via the configured pre-approved template instead of
    /// freeform messages.
    #[arg(long)]
    pub template: bool,
}

fn wizard_error(e: WizardError) -> ZenithError {
    match e {
        WizardError::Engine(inner) => inner,
        WizardError::MissingCredential(inner) => inner,
        other => ZenithError::Internal(other.to_string()),
    }
}

/// Run the `zenith broadcast` command.
pub async fn run_broadcast(config: &ZenithConfig, args: BroadcastArgs) -> Result<(), ZenithError> {
    let bridge = BridgeClient::new(&config.bridge)?;

    let keys = bridge.fetch_keys().await;
    let credentials = Credentials::from_keys(&keys);

    let clients = bridge.fetch_clients().await;
    let segment = Segment::parse_lenient(&args.segment);
    let resolved = audience::resolve(segment, &clients);
    info!(segment = %segment, audience = resolved.len(), "audience resolved");

    let products = bridge.fetch_products().await;
    let product = products
        .into_iter()
        .find(|p| p.productname.eq_ignore_ascii_case(&args.product))
        .ok_or_else(|| {
            ZenithError::Config(format!("no product named `{}` in Product Info", args.product))
        })?;

    let language = args
        .language
        .clone()
        .unwrap_or_else(|| config.agent.language.clone());
    let form = ArchitectForm {
        product,
        language,
        segment,
        audience: resolved,
    };

    let mut wizard = Wizard::new();
    match &args.message {
        Some(message) => {
            wizard
                .submit_manual(form, message.clone())
                .map_err(wizard_error)?;
        }
        None => {
            let api_key = config
                .gemini
                .api_key
                .clone()
                .or_else(|| credentials.gemini_api_key.clone())
                .ok_or_else(|| {
                    ZenithError::Config(
                        "no Gemini API key in config or the Keys table; \
                         pass --message to skip AI drafting"
                            .into(),
                    )
                })?;
            let generator = GeminiClient::new(&config.gemini, api_key)?;
            let angle = args.angle.as_deref().unwrap_or("Core Value");
            wizard
                .submit_architect(&generator, form, angle)
                .await
                .map_err(wizard_error)?;
            wizard.select_variation(args.pick).map_err(wizard_error)?;
        }
    }

    if let Some(cta) = &args.cta {
        wizard.set_cta(cta.clone()).map_err(wizard_error)?;
    }
    wizard.advance_to_transmission().map_err(wizard_error)?;

    let mode = if args.template {
        // The registered locale from the Templates table wins over the
        // configured default.
        let name = config.whatsapp.template_name.clone();
        let locale = bridge
            .fetch_templates()
            .await
            .into_iter()
            .find(|t| t.name == name)
            .map(|t| t.language)
            .unwrap_or_else(|| config.whatsapp.template_locale.clone());
        DeliveryMode::Template(TemplateSpec {
            name,
            locale,
            body_params: Vec::new(),
            button_url_suffix: None,
        })
    } else {
        DeliveryMode::Freeform
    };

    let token = credentials.require_token()?.to_string();
    let phone_id = credentials.resolve_sender(args.sender.as_deref())?.to_string();
    let sender = CloudApiClient::new(&config.whatsapp, token, phone_id)?;

    let engine = BroadcastEngine::new(
        sender,
        bridge,
        Duration::from_millis(config.whatsapp.send_delay_ms),
        config.whatsapp.log_cap,
    );

    let outcome = wizard
        .launch(&engine, &credentials, args.sender.as_deref(), mode)
        .await
        .map_err(wizard_error)?;

    print_outcome(&outcome);

    let store = SessionStore::new(&config.session.path);
    let mut session = store.load();
    session.language = Some(config.agent.language.clone());
    session.last_mission = Some(outcome.summary.clone());
    store.save(&session)?;

    if outcome.aborted.is_some() {
        return Err(ZenithError::CredentialExpired {
            message: "mission aborted; refresh `whatsapp_access_token` and relaunch".into(),
        });
    }
    Ok(())
}

fn print_outcome(outcome: &MissionOutcome) {
    let use_color = std::io::stdout().is_terminal();
    let summary = &outcome.summary;

    println!();
    println!(
        "  {} -- {} ({} recipients)",
        summary.angle_title, summary.product_name, summary.total
    );
    println!("  {}", "-".repeat(50));

    for entry in outcome.log.entries() {
        let line = if entry.is_error {
            if use_color {
                use colored::Colorize;
                format!("    ✗ {:<20} {}", entry.name, entry.status.red())
            } else {
                format!("    [FAIL] {:<20} {}", entry.name, entry.status)
            }
        } else if use_color {
            use colored::Colorize;
            format!("    {} {:<20} {}", "✓".green(), entry.name, entry.status)
        } else {
            format!("    [OK]   {:<20} {}", entry.name, entry.status)
        };
        println!("{line}");
    }

    println!();
    println!(
        "  sent {} / failed {} / total {}",
        summary.sent, summary.failed, summary.total
    );
    println!();
}
