// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock content generator with canned variation sets.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use zenith_core::ZenithError;
use zenith_core::traits::{ContentGenerator, VariationRequest};
use zenith_core::types::{AssetKind, AssetRef, CampaignInsights, Variation, VariationSet};

/// Returns a deterministic four-variation set and fixed assets.
#[derive(Clone, Default)]
pub struct MockGenerator {
    fail_variations: Arc<Mutex<bool>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent variation calls fail, as a malformed model
    /// response would.
    pub async fn fail_variations(&self) {
        *self.fail_variations.lock().await = true;
    }

    /// The canned set every successful call returns.
    pub fn canned_set() -> VariationSet {
        let titles = ["Primary Angle", "High Urgency", "Social Proof", "Core Value"];
        VariationSet {
            variations: titles
                .iter()
                .map(|title| Variation {
                    title: (*title).to_string(),
                    message_text: format!("نص تجريبي ({title})"),
                    image_prompt: format!("{title} product shot"),
                    video_prompt: format!("{title} product clip"),
                    audio_script: format!("{title} spoken ad"),
                })
                .collect(),
            insights: CampaignInsights {
                conversion_prob: 70.0,
                revenue_uplift: "+15%".to_string(),
                strategic_advice: "Mock advice.".to_string(),
            },
        }
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn generate_variations(
        &self,
        _request: &VariationRequest,
    ) -> Result<VariationSet, ZenithError> {
        if *self.fail_variations.lock().await {
            return Err(ZenithError::Generation {
                message: "mock generation failure".to_string(),
                source: None,
            });
        }
        Ok(Self::canned_set())
    }

    async fn generate_image(&self, _prompt: &str) -> Result<AssetRef, ZenithError> {
        Ok(AssetRef::DataUri {
            kind: AssetKind::Image,
            uri: "data:image/png;base64,QUJD".to_string(),
        })
    }

    async fn generate_video(&self, _prompt: &str) -> Result<AssetRef, ZenithError> {
        Ok(AssetRef::RemoteUrl {
            kind: AssetKind::Video,
            url: "https://cdn.example.invalid/mock.mp4?key=test".to_string(),
        })
    }

    async fn generate_voice(&self, _script: &str, _voice_id: &str) -> Result<String, ZenithError> {
        Ok("UklGRg==".to_string())
    }

    async fn generate_reply(
        &self,
        _customer_message: &str,
        _product_context: &str,
        _language: &str,
    ) -> String {
        "mock reply".to_string()
    }
}
