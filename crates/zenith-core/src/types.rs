// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record types shared across the bridge, the generators, and the
//! broadcast pipeline.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ZenithError;
use crate::phone;

/// Provider-side handle for an uploaded media asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaId(pub String);

/// Order status vocabulary used by the Clients table.
///
/// Remote sheets are hand-edited, so parsing is case-insensitive and
/// unrecognized values fall back to [`OrderStatus::New`] at the decoder.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize, Default,
)]
#[strum(ascii_case_insensitive)]
pub enum OrderStatus {
    #[default]
    New,
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

/// One row of the Clients table, post-decoding.
///
/// The identity key for update/delete is the normalized phone; the
/// decoder quarantines rows whose phone normalizes to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub client: String,
    /// Raw display-form phone. Normalize with [`phone::normalize`] before
    /// transmission or identity matching.
    pub phone: String,
    pub city: String,
    pub address: String,
    pub items: String,
    pub qty: u32,
    pub price: f64,
    pub status: OrderStatus,
    pub note: String,
    pub date: String,
}

impl Client {
    /// Normalized digit form of the phone, the identity key.
    pub fn normalized_phone(&self) -> String {
        phone::normalize(&self.phone)
    }
}

/// One row of the Keys (credential) table. `key` is lowercased and
/// trimmed by the decoder; lookups go through [`Credentials`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub key: String,
    pub value: String,
}

/// One row of the Product Info table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub productid: String,
    pub productname: String,
    pub price: f64,
    pub description: String,
}

/// One row of the WhatsApp Templates table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub name: String,
    pub language: String,
}

/// One row of the Campaigns table. Created exactly once per completed
/// mission and never mutated by this subsystem; the webhook collaborator
/// owns the opened/replied increments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub campaignid: String,
    pub name: String,
    pub date: String,
    pub audience: String,
    pub template: String,
    pub mediaurl: String,
    pub sent: u32,
    pub failed: u32,
    pub opened: u32,
    pub replied: u32,
    pub status: String,
    pub sender: String,
}

/// One AI-generated marketing angle. Transient: lives only for the
/// duration of a wizard run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub title: String,
    pub message_text: String,
    pub image_prompt: String,
    pub video_prompt: String,
    pub audio_script: String,
}

/// Strategic summary returned alongside the variation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignInsights {
    /// Conversion probability estimate, 0-100.
    pub conversion_prob: f64,
    pub revenue_uplift: String,
    pub strategic_advice: String,
}

/// The four variations plus insights produced for one strategic angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationSet {
    pub variations: Vec<Variation>,
    pub insights: CampaignInsights,
}

/// Kind of media asset attached to a mission. At most one kind is active
/// per mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AssetKind {
    Image,
    Video,
    Audio,
}

impl AssetKind {
    /// MIME type assumed when the asset source carries none.
    pub fn default_mime(&self) -> &'static str {
        match self {
            AssetKind::Image => "image/png",
            AssetKind::Video => "video/mp4",
            AssetKind::Audio => "audio/mpeg",
        }
    }
}

/// Reference to a not-yet-uploaded media asset: either inline base64
/// (AI-generated image/voice, device upload) or a provider-fetchable URL
/// (AI-generated video).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetRef {
    DataUri { kind: AssetKind, uri: String },
    RemoteUrl { kind: AssetKind, url: String },
}

impl AssetRef {
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetRef::DataUri { kind, .. } | AssetRef::RemoteUrl { kind, .. } => *kind,
        }
    }

    /// Short display form for campaign records and logs.
    pub fn describe(&self) -> String {
        match self {
            AssetRef::DataUri { kind, .. } => format!("inline {kind} asset"),
            AssetRef::RemoteUrl { url, .. } => url.clone(),
        }
    }
}

/// Provider-registered template selection for template-mode delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub name: String,
    /// Locale code, e.g. `en_US`.
    pub locale: String,
    /// Positional body parameters, mapped in order.
    pub body_params: Vec<String>,
    /// URL suffix for the template's call-to-action button, when one is
    /// registered. Absent suffix means no button component is sent.
    pub button_url_suffix: Option<String>,
}

/// Per-recipient delivery record shown to the operator during a mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub name: String,
    pub status: String,
    pub is_error: bool,
    pub details: Option<String>,
}

/// Bounded most-recent-first delivery log. Capped so a large audience
/// cannot grow operator-facing state without bound; the engine's counters
/// are authoritative for totals.
#[derive(Debug, Clone)]
pub struct BroadcastLog {
    entries: VecDeque<LogEntry>,
    cap: usize,
}

impl BroadcastLog {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Prepend an entry, evicting the oldest once the cap is reached.
    pub fn record(&mut self, entry: LogEntry) {
        while self.entries.len() >= self.cap.max(1) {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }

    /// Entries most-recent-first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BroadcastLog {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Outcome of one completed mission. Overwritten in the session store by
/// each new mission; there is no history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub sent: u32,
    pub failed: u32,
    pub total: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub product_name: String,
    pub angle_title: String,
    pub sender: String,
}

/// One named outbound sender identity (`whatsapp_node_<alias>` rows).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderIdentity {
    pub alias: String,
    pub phone_id: String,
}

/// Typed view over the Keys table with the distinguished credentials
/// resolved. Lookups are case/whitespace-normalized by the bridge decoder
/// before this view is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub default_phone_id: Option<String>,
    pub senders: Vec<SenderIdentity>,
    pub gemini_api_key: Option<String>,
    pub webhook_verify_token: Option<String>,
}

impl Credentials {
    /// Build the credential view from decoded key records.
    pub fn from_keys(keys: &[KeyRecord]) -> Self {
        let mut creds = Credentials::default();
        for record in keys {
            match record.key.as_str() {
                "whatsapp_access_token" => creds.access_token = Some(record.value.clone()),
                "whatsapp_phone_id" => creds.default_phone_id = Some(record.value.clone()),
                "webhook_verify_token" => creds.webhook_verify_token = Some(record.value.clone()),
                "gemini_api_key" | "openai_api_key" => {
                    if creds.gemini_api_key.is_none() {
                        creds.gemini_api_key = Some(record.value.clone());
                    }
                }
                key => {
                    if let Some(alias) = key.strip_prefix("whatsapp_node_")
                        && !alias.is_empty()
                    {
                        creds.senders.push(SenderIdentity {
                            alias: alias.to_string(),
                            phone_id: record.value.clone(),
                        });
                    }
                }
            }
        }
        creds
    }

    /// The access token, or a config error naming the missing key.
    pub fn require_token(&self) -> Result<&str, ZenithError> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ZenithError::Config("missing `whatsapp_access_token` key".into()))
    }

    /// Resolve the outbound phone id for an optional sender alias.
    ///
    /// `None` selects the default `whatsapp_phone_id`; `Some(alias)`
    /// selects the matching `whatsapp_node_<alias>` identity.
    pub fn resolve_sender(&self, alias: Option<&str>) -> Result<&str, ZenithError> {
        match alias {
            None => self
                .default_phone_id
                .as_deref()
                .filter(|p| !p.is_empty())
                .ok_or_else(|| ZenithError::Config("missing `whatsapp_phone_id` key".into())),
            Some(alias) => self
                .senders
                .iter()
                .find(|s| s.alias == alias)
                .map(|s| s.phone_id.as_str())
                .ok_or_else(|| {
                    ZenithError::Config(format!("no `whatsapp_node_{alias}` sender configured"))
                }),
        }
    }
}
