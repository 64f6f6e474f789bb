// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed builders for `/messages` request payloads.
//!
//! The Cloud API wants a `type` discriminator plus a sibling object keyed
//! by that same type. Caption rules differ per kind: audio messages cannot
//! carry captions, and template headers accept image/video only.

use serde::Serialize;

use zenith_core::types::{AssetKind, MediaId, TemplateSpec};

#[derive(Debug, Serialize)]
pub struct MessagePayload {
    messaging_product: &'static str,
    recipient_type: &'static str,
    to: String,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<TextBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<MediaObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    video: Option<MediaObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio: Option<MediaObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<TemplatePayload>,
}

#[derive(Debug, Serialize)]
struct TextBody {
    body: String,
}

#[derive(Debug, Serialize)]
struct MediaObject {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
}

#[derive(Debug, Serialize)]
struct TemplatePayload {
    name: String,
    language: LanguageCode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    components: Vec<Component>,
}

#[derive(Debug, Serialize)]
struct LanguageCode {
    code: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Component {
    Header { parameters: Vec<HeaderParameter> },
    Body { parameters: Vec<TextParameter> },
    Button {
        sub_type: &'static str,
        index: &'static str,
        parameters: Vec<TextParameter>,
    },
}

#[derive(Debug, Serialize)]
struct HeaderParameter {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<MediaRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    video: Option<MediaRef>,
}

#[derive(Debug, Serialize)]
struct MediaRef {
    id: String,
}

#[derive(Debug, Serialize)]
struct TextParameter {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

impl TextParameter {
    fn new(text: impl Into<String>) -> Self {
        Self {
            kind: "text",
            text: text.into(),
        }
    }
}

fn base(to: &str, kind: &'static str) -> MessagePayload {
    MessagePayload {
        messaging_product: "whatsapp",
        recipient_type: "individual",
        to: to.to_string(),
        kind,
        text: None,
        image: None,
        video: None,
        audio: None,
        template: None,
    }
}

/// Freeform text message.
pub fn text(to: &str, body: &str) -> MessagePayload {
    let mut payload = base(to, "text");
    payload.text = Some(TextBody {
        body: body.to_string(),
    });
    payload
}

/// Freeform media message. Captions are dropped for audio, which the
/// Cloud API does not support; callers send the text as a follow-up
/// message instead.
pub fn media(
    to: &str,
    kind: AssetKind,
    media: &MediaId,
    caption: Option<&str>,
) -> MessagePayload {
    let object = MediaObject {
        id: media.0.clone(),
        caption: if kind == AssetKind::Audio {
            None
        } else {
            caption.map(str::to_string)
        },
    };
    match kind {
        AssetKind::Image => {
            let mut payload = base(to, "image");
            payload.image = Some(object);
            payload
        }
        AssetKind::Video => {
            let mut payload = base(to, "video");
            payload.video = Some(object);
            payload
        }
        AssetKind::Audio => {
            let mut payload = base(to, "audio");
            payload.audio = Some(object);
            payload
        }
    }
}

/// Template message. The header component is emitted only for image or
/// video media (audio headers are not a template concept). Body
/// parameters map in order; the button component appears only when the
/// template spec carries a URL suffix.
pub fn template(
    to: &str,
    spec: &TemplateSpec,
    header: Option<(AssetKind, &MediaId)>,
) -> MessagePayload {
    let mut components = Vec::new();

    if let Some((kind, media)) = header {
        let media_ref = MediaRef {
            id: media.0.clone(),
        };
        let parameter = match kind {
            AssetKind::Image => Some(HeaderParameter {
                kind: "image",
                image: Some(media_ref),
                video: None,
            }),
            AssetKind::Video => Some(HeaderParameter {
                kind: "video",
                image: None,
                video: Some(media_ref),
            }),
            AssetKind::Audio => None,
        };
        if let Some(parameter) = parameter {
            components.push(Component::Header {
                parameters: vec![parameter],
            });
        }
    }

    if !spec.body_params.is_empty() {
        components.push(Component::Body {
            parameters: spec.body_params.iter().map(TextParameter::new).collect(),
        });
    }

    if let Some(suffix) = &spec.button_url_suffix {
        components.push(Component::Button {
            sub_type: "url",
            index: "0",
            parameters: vec![TextParameter::new(suffix)],
        });
    }

    let mut payload = base(to, "template");
    payload.template = Some(TemplatePayload {
        name: spec.name.clone(),
        language: LanguageCode {
            code: spec.locale.clone(),
        },
        components,
    });
    payload
}
