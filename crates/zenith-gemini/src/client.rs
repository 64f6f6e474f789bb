// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini REST API.
//!
//! Covers the four generation surfaces the console uses: structured
//! variation sets, inline images, long-running video operations, and
//! voice synthesis, plus the live-chat smart reply which by contract
//! never fails.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use zenith_config::model::GeminiConfig;
use zenith_core::ZenithError;
use zenith_core::poll::{PollSchedule, poll_until};
use zenith_core::traits::{ContentGenerator, VariationRequest};
use zenith_core::types::{AssetKind, AssetRef, VariationSet};

use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Operation,
    OperationHandle, PrebuiltVoiceConfig, SpeechConfig, VariationsDoc, VoiceConfig,
    variations_schema,
};

/// Fallback reply when smart-reply generation fails outright.
const REPLY_OFFLINE: &str = "The live sales assistant is temporarily offline.";
/// Fallback reply when the model returns an empty candidate.
const REPLY_EMPTY: &str = "I'm sorry, I couldn't draft a reply for that.";

/// Client for the Gemini generative API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    config: GeminiConfig,
    poll: PollSchedule,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, api_key: String) -> Result<Self, ZenithError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| ZenithError::Generation {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        let initial = Duration::from_secs(config.video_poll_initial_secs);
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            config: config.clone(),
            poll: PollSchedule {
                max_attempts: config.video_poll_max_attempts,
                initial,
                floor: Duration::from_secs(4).min(initial),
                decay: 0.85,
            },
        })
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &impl Serialize,
    ) -> Result<T, ZenithError> {
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ZenithError::Generation {
                message: format!("generation request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ZenithError::Generation {
            message: format!("failed to read generation response: {e}"),
            source: Some(Box::new(e)),
        })?;
        if !status.is_success() {
            return Err(ZenithError::Generation {
                message: format!("generation API returned {status}: {text}"),
                source: None,
            });
        }
        serde_json::from_str(&text).map_err(|e| ZenithError::Generation {
            message: format!("failed to parse generation response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ZenithError> {
        let url = format!("{}/v1beta/models/{model}:generateContent", self.base_url);
        self.post_json(&url, request).await
    }

    async fn poll_video_operation(&self, name: &str) -> Result<String, ZenithError> {
        let url = format!("{}/v1beta/{name}", self.base_url);
        poll_until(&self.poll, |attempt| {
            let url = url.clone();
            async move {
                debug!(attempt, operation = name, "polling video operation");
                let response = self
                    .http
                    .get(&url)
                    .header("x-goog-api-key", &self.api_key)
                    .send()
                    .await
                    .map_err(|e| ZenithError::Generation {
                        message: format!("operation poll failed: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                let operation: Operation =
                    response.json().await.map_err(|e| ZenithError::Generation {
                        message: format!("failed to parse operation status: {e}"),
                        source: Some(Box::new(e)),
                    })?;

                if !operation.done {
                    return Ok(None);
                }
                if let Some(error) = operation.error {
                    return Err(ZenithError::Generation {
                        message: format!("video generation failed: {}", error.message),
                        source: None,
                    });
                }
                let uri = operation
                    .response
                    .and_then(|r| r.generate_video_response)
                    .and_then(|r| r.generated_samples.into_iter().next())
                    .map(|s| s.video.uri)
                    .ok_or_else(|| ZenithError::Generation {
                        message: "video operation completed without a download URI".to_string(),
                        source: None,
                    })?;
                Ok(Some(uri))
            }
        })
        .await
    }

    fn variations_prompt(&self, request: &VariationRequest) -> String {
        format!(
            "You are an expert WhatsApp growth consultant.\n\
             Language: {language}. Product: {product}. Price: {price} MAD.\n\
             Audience segment: {audience}.\n\
             \n\
             CRITICAL: write every messageText in ARABIC SCRIPT. Never use Latin\n\
             characters or Arabizi (write \"\u{633}\u{644}\u{627}\u{645}\", not \"salam\").\n\
             \n\
             Task 1: generate 4 distinct marketing variations:\n\
             1. Angle: {angle} (primary strategy)\n\
             2. Angle: High Urgency (stock depletion / flash offer)\n\
             3. Angle: Social Proof (customer testimonial / result)\n\
             4. Angle: Core Value (ultra-short, impactful)\n\
             \n\
             For each variation provide: title (short English name), messageText\n\
             (localized WhatsApp copy in Arabic characters), imagePrompt (English\n\
             visual description), videoPrompt (English dynamic description),\n\
             audioScript (10-15s spoken ad script in English).\n\
             \n\
             Task 2: strategic summary with conversionProb (0-100), revenueUplift\n\
             (short estimate), strategicAdvice (one sentence).\n\
             \n\
             Context description: {description}\n\
             Use authentic {language} idioms and professional emojis.",
            language = request.language,
            product = request.product_name,
            price = request.price,
            audience = request.audience,
            angle = request.angle,
            description = request.description,
        )
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_variations(
        &self,
        request: &VariationRequest,
    ) -> Result<VariationSet, ZenithError> {
        let body = GenerateContentRequest {
            contents: vec![Content::text(format!(
                "Synthesize 4 distinct Arabic-script variations for {}.",
                request.product_name
            ))],
            system_instruction: Some(Content::text(self.variations_prompt(request))),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json"),
                response_schema: Some(variations_schema()),
                ..GenerationConfig::default()
            }),
        };

        let response = self
            .generate_content(&self.config.text_model, &body)
            .await?;
        let text = response.first_text().ok_or_else(|| ZenithError::Generation {
            message: "variation response carried no text candidate".to_string(),
            source: None,
        })?;
        let doc: VariationsDoc =
            serde_json::from_str(text).map_err(|e| ZenithError::Generation {
                message: format!("variation response is not the expected document: {e}"),
                source: Some(Box::new(e)),
            })?;
        if doc.variations.len() != 4 {
            return Err(ZenithError::Generation {
                message: format!("expected 4 variations, model produced {}", doc.variations.len()),
                source: None,
            });
        }
        Ok(doc.into())
    }

    async fn generate_image(&self, prompt: &str) -> Result<AssetRef, ZenithError> {
        let body = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: None,
            generation_config: None,
        };
        let response = self
            .generate_content(&self.config.image_model, &body)
            .await?;
        let inline = response
            .first_inline_data()
            .ok_or_else(|| ZenithError::Generation {
                message: "image response carried no inline data".to_string(),
                source: None,
            })?;
        let mime = if inline.mime_type.is_empty() {
            AssetKind::Image.default_mime()
        } else {
            &inline.mime_type
        };
        Ok(AssetRef::DataUri {
            kind: AssetKind::Image,
            uri: format!("data:{mime};base64,{}", inline.data),
        })
    }

    async fn generate_video(&self, prompt: &str) -> Result<AssetRef, ZenithError> {
        let url = format!(
            "{}/v1beta/models/{}:predictLongRunning",
            self.base_url, self.config.video_model
        );
        let body = serde_json::json!({
            "instances": [{"prompt": prompt}],
            "parameters": {"sampleCount": 1, "resolution": "720p", "aspectRatio": "16:9"}
        });
        let handle: OperationHandle = self.post_json(&url, &body).await?;
        let uri = self.poll_video_operation(&handle.name).await?;

        // The download URI requires the API key to fetch.
        let separator = if uri.contains('?') { '&' } else { '?' };
        Ok(AssetRef::RemoteUrl {
            kind: AssetKind::Video,
            url: format!("{uri}{separator}key={}", self.api_key),
        })
    }

    async fn generate_voice(&self, script: &str, voice_id: &str) -> Result<String, ZenithError> {
        let body = GenerateContentRequest {
            contents: vec![Content::text(script)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO"]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice_id.to_string(),
                        },
                    },
                }),
                ..GenerationConfig::default()
            }),
        };
        let response = self.generate_content(&self.config.tts_model, &body).await?;
        response
            .first_inline_data()
            .map(|inline| inline.data.clone())
            .ok_or_else(|| ZenithError::Generation {
                message: "voice response carried no audio payload".to_string(),
                source: None,
            })
    }

    async fn generate_reply(
        &self,
        customer_message: &str,
        product_context: &str,
        language: &str,
    ) -> String {
        let system = format!(
            "You are a high-performance sales assistant.\n\
             Language: {language}. Use Arabic characters.\n\
             \n\
             Product context:\n{product_context}\n\
             \n\
             Respond in the customer's dialect using Arabic script, handle\n\
             objections with empathy, and always aim for a confirmed order."
        );
        let body = GenerateContentRequest {
            contents: vec![Content::text(format!("Customer said: \"{customer_message}\""))],
            system_instruction: Some(Content::text(system)),
            generation_config: Some(GenerationConfig {
                temperature: Some(0.2),
                ..GenerationConfig::default()
            }),
        };

        match self.generate_content(&self.config.reply_model, &body).await {
            Ok(response) => response
                .first_text()
                .map(str::to_string)
                .unwrap_or_else(|| REPLY_EMPTY.to_string()),
            Err(e) => {
                warn!(error = %e, "smart reply generation failed, serving fallback");
                REPLY_OFFLINE.to_string()
            }
        }
    }
}
