// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp Cloud API client for the Zenith campaign console.
//!
//! Implements the [`MessageSender`] seam: multipart media upload plus
//! text, media, and template message delivery against the Meta Graph API.

pub mod error;
mod media;
pub mod payload;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use zenith_config::model::WhatsAppConfig;
use zenith_core::ZenithError;
use zenith_core::traits::MessageSender;
use zenith_core::types::{AssetKind, AssetRef, MediaId, TemplateSpec};

use crate::error::{RequestContext, decode_error};
use crate::payload::MessagePayload;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

/// Client for one sender number on the WhatsApp Cloud API.
#[derive(Debug, Clone)]
pub struct CloudApiClient {
    http: reqwest::Client,
    graph_url: String,
    api_version: String,
    access_token: String,
    phone_id: String,
}

impl CloudApiClient {
    pub fn new(
        config: &WhatsAppConfig,
        access_token: String,
        phone_id: String,
    ) -> Result<Self, ZenithError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ZenithError::Send {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            http,
            graph_url: config.graph_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            access_token,
            phone_id,
        })
    }

    fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/{}/{}/{resource}",
            self.graph_url, self.api_version, self.phone_id
        )
    }

    async fn post_message(&self, payload: &MessagePayload) -> Result<(), ZenithError> {
        let response = self
            .http
            .post(self.endpoint("messages"))
            .bearer_auth(&self.access_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| ZenithError::Send {
                message: format!("message request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(status = %status, "message accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(decode_error(status, &body, RequestContext::Send))
    }
}

#[async_trait]
impl MessageSender for CloudApiClient {
    async fn upload_media(&self, asset: &AssetRef) -> Result<MediaId, ZenithError> {
        let resolved = media::resolve(&self.http, asset).await?;
        debug!(kind = %asset.kind(), bytes = resolved.bytes.len(), "uploading media");

        let file_name = format!("asset.{}", extension_for(&resolved.mime, asset.kind()));
        let part = reqwest::multipart::Part::bytes(resolved.bytes)
            .file_name(file_name)
            .mime_str(&resolved.mime)
            .map_err(|e| ZenithError::MediaUpload {
                message: format!("invalid MIME type `{}`: {e}", resolved.mime),
            })?;
        let form = reqwest::multipart::Form::new()
            .text("messaging_product", "whatsapp")
            .text("type", resolved.mime.clone())
            .part("file", part);

        let response = self
            .http
            .post(self.endpoint("media"))
            .bearer_auth(&self.access_token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ZenithError::MediaUpload {
                message: format!("media upload request failed: {e}"),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(decode_error(status, &body, RequestContext::Upload));
        }

        let parsed: UploadResponse =
            serde_json::from_str(&body).map_err(|e| ZenithError::MediaUpload {
                message: format!("failed to parse upload response: {e}"),
            })?;
        Ok(MediaId(parsed.id))
    }

    async fn send_text(&self, to: &str, body: &str) -> Result<(), ZenithError> {
        self.post_message(&payload::text(to, body)).await
    }

    async fn send_media(
        &self,
        to: &str,
        kind: AssetKind,
        media: &MediaId,
        caption: Option<&str>,
    ) -> Result<(), ZenithError> {
        self.post_message(&payload::media(to, kind, media, caption))
            .await
    }

    async fn send_template(
        &self,
        to: &str,
        spec: &TemplateSpec,
        header: Option<(AssetKind, &MediaId)>,
    ) -> Result<(), ZenithError> {
        self.post_message(&payload::template(to, spec, header)).await
    }
}

/// Pick a file extension for the multipart part name.
fn extension_for(mime: &str, kind: AssetKind) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "video/mp4" => "mp4",
        "audio/wav" | "audio/x-wav" => "wav",
        "audio/mpeg" => "mp3",
        "audio/ogg" => "ogg",
        _ => match kind {
            AssetKind::Image => "png",
            AssetKind::Video => "mp4",
            AssetKind::Audio => "wav",
        },
    }
}
