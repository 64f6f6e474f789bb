// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire shapes for the Gemini REST API.
//!
//! Request and response bodies use camelCase on the wire; the structs
//! here rename accordingly and keep only the fields the console consumes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use zenith_core::types::{CampaignInsights, Variation, VariationSet};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.into()),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Content,
}

impl GenerateContentResponse {
    /// First text part of the first candidate, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }

    /// First inline-data part of the first candidate, if any.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
    }
}

/// Variation-set document as the model is instructed to emit it.
#[derive(Debug, Deserialize)]
pub(crate) struct VariationsDoc {
    pub variations: Vec<WireVariation>,
    pub insights: WireInsights,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireVariation {
    pub title: String,
    pub message_text: String,
    pub image_prompt: String,
    pub video_prompt: String,
    pub audio_script: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireInsights {
    pub conversion_prob: f64,
    pub revenue_uplift: String,
    pub strategic_advice: String,
}

impl From<VariationsDoc> for VariationSet {
    fn from(doc: VariationsDoc) -> Self {
        VariationSet {
            variations: doc
                .variations
                .into_iter()
                .map(|v| Variation {
                    title: v.title,
                    message_text: v.message_text,
                    image_prompt: v.image_prompt,
                    video_prompt: v.video_prompt,
                    audio_script: v.audio_script,
                })
                .collect(),
            insights: CampaignInsights {
                conversion_prob: doc.insights.conversion_prob,
                revenue_uplift: doc.insights.revenue_uplift,
                strategic_advice: doc.insights.strategic_advice,
            },
        }
    }
}

/// JSON schema constraining the variation-set response.
pub(crate) fn variations_schema() -> Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "variations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "messageText": {"type": "STRING"},
                        "imagePrompt": {"type": "STRING"},
                        "videoPrompt": {"type": "STRING"},
                        "audioScript": {"type": "STRING"}
                    },
                    "required": ["title", "messageText", "imagePrompt", "videoPrompt", "audioScript"]
                }
            },
            "insights": {
                "type": "OBJECT",
                "properties": {
                    "conversionProb": {"type": "NUMBER"},
                    "revenueUplift": {"type": "STRING"},
                    "strategicAdvice": {"type": "STRING"}
                },
                "required": ["conversionProb", "revenueUplift", "strategicAdvice"]
            }
        },
        "required": ["variations", "insights"]
    })
}

// Long-running video operation shapes.

#[derive(Debug, Deserialize)]
pub(crate) struct OperationHandle {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Operation {
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub response: Option<OperationResponse>,
    #[serde(default)]
    pub error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OperationResponse {
    #[serde(default)]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedSample {
    pub video: VideoRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoRef {
    pub uri: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OperationError {
    #[serde(default)]
    pub message: String,
}
