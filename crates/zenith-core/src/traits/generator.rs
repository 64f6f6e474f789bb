// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content generation seam.

use async_trait::async_trait;

use crate::error::ZenithError;
use crate::types::{AssetRef, VariationSet};

/// Inputs for one variation-set generation run.
#[derive(Debug, Clone)]
pub struct VariationRequest {
    /// Primary strategic angle chosen by the operator.
    pub angle: String,
    pub product_name: String,
    pub description: String,
    /// Audience segment id, passed through for prompt context.
    pub audience: String,
    pub price: f64,
    pub language: String,
}

/// Adapter over the external generative service.
///
/// The implementation does not interpret model output beyond shape; all
/// methods except [`generate_reply`] surface failures to the caller so
/// the wizard can block the stage and offer a retry.
///
/// [`generate_reply`]: ContentGenerator::generate_reply
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate exactly four angle variations plus strategic insights.
    async fn generate_variations(
        &self,
        request: &VariationRequest,
    ) -> Result<VariationSet, ZenithError>;

    /// Generate an image, returned as an inline data-URI asset.
    async fn generate_image(&self, prompt: &str) -> Result<AssetRef, ZenithError>;

    /// Generate a video. Long-running: the implementation polls the
    /// operation to completion with a bounded attempt budget.
    async fn generate_video(&self, prompt: &str) -> Result<AssetRef, ZenithError>;

    /// Synthesize a voice clip, returned as raw base64 audio.
    async fn generate_voice(&self, script: &str, voice_id: &str) -> Result<String, ZenithError>;

    /// Draft a reply to a live customer message. Infallible by contract:
    /// failures collapse to a safe fallback string, because this feeds
    /// the live-chat assist where a hard error must not block the
    /// operator.
    async fn generate_reply(&self, customer_message: &str, product_context: &str, language: &str)
    -> String;
}
