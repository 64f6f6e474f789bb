// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound messaging seam.

use async_trait::async_trait;

use crate::error::ZenithError;
use crate::types::{AssetKind, AssetRef, MediaId, TemplateSpec};

/// Adapter for the messaging provider's outbound surface.
///
/// Implemented by the WhatsApp Cloud API client; the broadcast engine is
/// written against this trait so missions run against a mock in tests.
/// Recipients (`to`) are pre-normalized digit strings.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Upload a media asset to the provider's media store, once per
    /// mission, yielding the provider-side handle.
    async fn upload_media(&self, asset: &AssetRef) -> Result<MediaId, ZenithError>;

    /// Send a freeform text message.
    async fn send_text(&self, to: &str, body: &str) -> Result<(), ZenithError>;

    /// Send a media message by uploaded handle. `caption` must be `None`
    /// for audio — the provider does not support audio captions.
    async fn send_media(
        &self,
        to: &str,
        kind: AssetKind,
        media: &MediaId,
        caption: Option<&str>,
    ) -> Result<(), ZenithError>;

    /// Send a provider-registered template message, optionally with a
    /// media header (image/video only, never audio).
    async fn send_template(
        &self,
        to: &str,
        spec: &TemplateSpec,
        header: Option<(AssetKind, &MediaId)>,
    ) -> Result<(), ZenithError>;
}
