// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sequential broadcast engine.
//!
//! Runs one mission: optional media pre-flight, then a strictly
//! sequential per-recipient delivery loop with a fixed inter-message
//! delay, then one campaign record. Failed sends are never retried.
//!
//! Failure policy: an expired credential stops the loop immediately
//! (every remaining send would fail the same way), any other send
//! failure is logged and the loop continues.

use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use zenith_core::ZenithError;
use zenith_core::phone;
use zenith_core::traits::{CampaignRecorder, MessageSender};
use zenith_core::types::{
    AssetKind, AssetRef, BroadcastLog, Campaign, Client, LogEntry, MediaId, MissionSummary,
    TemplateSpec,
};

/// How messages are delivered for this mission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Freeform text/media messages.
    Freeform,
    /// Pre-approved template messages.
    Template(TemplateSpec),
}

/// Everything one mission needs, assembled by the wizard.
#[derive(Debug, Clone)]
pub struct MissionSpec {
    pub product_name: String,
    pub angle_title: String,
    pub message_text: String,
    /// Optional call-to-action link, appended to the message body.
    pub cta_link: Option<String>,
    pub asset: Option<AssetRef>,
    pub audience: Vec<Client>,
    /// Display label for the campaign record's audience column.
    pub audience_label: String,
    pub mode: DeliveryMode,
    pub sender_alias: String,
}

impl MissionSpec {
    /// Final message body: copy plus the CTA suffix when present.
    pub fn final_body(&self) -> String {
        match &self.cta_link {
            Some(cta) => format!("{}\n\n🔗 {cta}", self.message_text),
            None => self.message_text.clone(),
        }
    }
}

/// Why a mission stopped before reaching every recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    CredentialExpired,
}

/// Result of one mission run.
#[derive(Debug, Clone)]
pub struct MissionOutcome {
    pub summary: MissionSummary,
    pub log: BroadcastLog,
    /// Set when the loop stopped early; no campaign record is written.
    pub aborted: Option<AbortReason>,
    /// The campaign record produced for a completed mission.
    pub campaign: Option<Campaign>,
}

/// The broadcast engine, generic over the delivery and persistence seams.
pub struct BroadcastEngine<S, R> {
    sender: S,
    recorder: R,
    delay: Duration,
    log_cap: usize,
}

impl<S: MessageSender, R: CampaignRecorder> BroadcastEngine<S, R> {
    pub fn new(sender: S, recorder: R, delay: Duration, log_cap: usize) -> Self {
        Self {
            sender,
            recorder,
            delay,
            log_cap,
        }
    }

    /// Run one mission to completion.
    ///
    /// Returns `Err` only for pre-flight failures (media upload), which
    /// leave the mission unstarted. Once the loop begins, all outcomes
    /// including a credential abort are reported through
    /// [`MissionOutcome`] so partial counts are never lost.
    pub async fn run(&self, spec: &MissionSpec) -> Result<MissionOutcome, ZenithError> {
        let started_at = Utc::now();
        let mut log = BroadcastLog::new(self.log_cap);
        let final_body = spec.final_body();

        // Media pre-flight: upload once, reuse the id for every recipient.
        let media = match &spec.asset {
            Some(asset) => {
                info!(kind = %asset.kind(), "uploading mission media");
                Some((asset.kind(), self.sender.upload_media(asset).await?))
            }
            None => None,
        };

        let total = spec.audience.len() as u32;
        let mut sent: u32 = 0;
        let mut failed: u32 = 0;
        let mut aborted = None;

        for (i, client) in spec.audience.iter().enumerate() {
            let to = phone::normalize(&client.phone);
            if to.is_empty() {
                warn!(client = %client.client, "skipping recipient with no usable phone number");
                failed += 1;
                log.record(LogEntry {
                    name: client.client.clone(),
                    status: "Invalid number".to_string(),
                    is_error: true,
                    details: Some(client.phone.clone()),
                });
                continue;
            }

            match self.deliver(&to, &final_body, media.as_ref(), &spec.mode).await {
                Ok(()) => {
                    sent += 1;
                    log.record(LogEntry {
                        name: client.client.clone(),
                        status: "Sent".to_string(),
                        is_error: false,
                        details: None,
                    });
                }
                Err(e) if e.is_credential_expired() => {
                    failed += 1;
                    log.record(LogEntry {
                        name: client.client.clone(),
                        status: "Credential expired".to_string(),
                        is_error: true,
                        details: Some(e.to_string()),
                    });
                    warn!(recipient = %to, "access token expired, stopping mission");
                    aborted = Some(AbortReason::CredentialExpired);
                    break;
                }
                Err(e) => {
                    failed += 1;
                    log.record(LogEntry {
                        name: client.client.clone(),
                        status: "Rejected".to_string(),
                        is_error: true,
                        details: Some(e.to_string()),
                    });
                    warn!(recipient = %to, error = %e, "send failed, continuing");
                }
            }

            if i + 1 < spec.audience.len() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let ended_at = Utc::now();
        let summary = MissionSummary {
            sent,
            failed,
            total,
            started_at,
            ended_at,
            product_name: spec.product_name.clone(),
            angle_title: spec.angle_title.clone(),
            sender: spec.sender_alias.clone(),
        };
        info!(sent, failed, total, "mission loop finished");

        let campaign = if aborted.is_none() {
            let record = self.campaign_record(spec, &summary);
            if let Err(e) = self.recorder.record_campaign(&record).await {
                warn!(error = %e, "failed to write campaign record");
            }
            Some(record)
        } else {
            None
        };

        Ok(MissionOutcome {
            summary,
            log,
            aborted,
            campaign,
        })
    }

    async fn deliver(
        &self,
        to: &str,
        body: &str,
        media: Option<&(AssetKind, MediaId)>,
        mode: &DeliveryMode,
    ) -> Result<(), ZenithError> {
        match mode {
            DeliveryMode::Template(spec) => {
                // Template headers carry image/video only.
                let header = match media {
                    Some((kind, id)) if *kind != AssetKind::Audio => Some((*kind, id)),
                    _ => None,
                };
                self.sender.send_template(to, spec, header).await
            }
            DeliveryMode::Freeform => match media {
                Some((kind, id)) => {
                    let caption = if *kind == AssetKind::Audio {
                        None
                    } else {
                        Some(body)
                    };
                    self.sender.send_media(to, *kind, id, caption).await?;
                    // Audio cannot carry a caption; the copy follows as
                    // its own message.
                    if *kind == AssetKind::Audio {
                        self.sender.send_text(to, body).await?;
                    }
                    Ok(())
                }
                None => self.sender.send_text(to, body).await,
            },
        }
    }

    fn campaign_record(&self, spec: &MissionSpec, summary: &MissionSummary) -> Campaign {
        Campaign {
            campaignid: format!("OPS-{}", summary.started_at.timestamp_millis()),
            name: format!("{}: {}", spec.angle_title, spec.product_name),
            date: summary.started_at.format("%Y-%m-%d").to_string(),
            audience: spec.audience_label.clone(),
            template: match &spec.mode {
                DeliveryMode::Template(t) => t.name.clone(),
                DeliveryMode::Freeform => spec.angle_title.clone(),
            },
            mediaurl: spec
                .asset
                .as_ref()
                .map(|a| a.describe())
                .unwrap_or_else(|| "N/A".to_string()),
            sent: summary.sent,
            failed: summary.failed,
            opened: 0,
            replied: 0,
            status: "Completed".to_string(),
            sender: spec.sender_alias.clone(),
        }
    }
}
