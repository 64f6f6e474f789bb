// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock message sender for deterministic broadcast tests.
//!
//! `MockSender` implements `MessageSender` with full call capture and
//! per-call scripted failures, so engine tests can exercise the
//! continue-on-failure and abort-on-credential-expiry paths without a
//! network.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use zenith_core::ZenithError;
use zenith_core::traits::MessageSender;
use zenith_core::types::{AssetKind, AssetRef, MediaId, TemplateSpec};

/// One captured send call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Text {
        to: String,
        body: String,
    },
    Media {
        to: String,
        kind: AssetKind,
        media_id: String,
        caption: Option<String>,
    },
    Template {
        to: String,
        name: String,
        header: Option<AssetKind>,
    },
}

impl SentMessage {
    /// Recipient of the captured call.
    pub fn to(&self) -> &str {
        match self {
            SentMessage::Text { to, .. }
            | SentMessage::Media { to, .. }
            | SentMessage::Template { to, .. } => to,
        }
    }
}

/// How a scripted send or upload should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedFailure {
    /// Provider rejection; the engine logs and continues.
    Rejected,
    /// Expired access token; the engine must abort the mission.
    CredentialExpired,
}

impl ScriptedFailure {
    fn to_error(self) -> ZenithError {
        match self {
            ScriptedFailure::Rejected => ZenithError::Send {
                message: "mock rejection".to_string(),
                source: None,
            },
            ScriptedFailure::CredentialExpired => ZenithError::CredentialExpired {
                message: "mock token expired".to_string(),
            },
        }
    }
}

#[derive(Default)]
struct Inner {
    sent: Vec<SentMessage>,
    uploads: Vec<AssetRef>,
    /// Zero-based send-call index -> scripted failure.
    fail_send_at: HashMap<usize, ScriptedFailure>,
    fail_upload: Option<ScriptedFailure>,
    send_calls: usize,
}

/// A mock message sender that captures every call.
#[derive(Clone, Default)]
pub struct MockSender {
    inner: Arc<Mutex<Inner>>,
}

impl MockSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the nth send call (zero-based, across all message kinds)
    /// to fail.
    pub async fn fail_send_at(&self, index: usize, failure: ScriptedFailure) {
        self.inner.lock().await.fail_send_at.insert(index, failure);
    }

    /// Script every upload to fail.
    pub async fn fail_upload(&self, failure: ScriptedFailure) {
        self.inner.lock().await.fail_upload = Some(failure);
    }

    /// All captured send calls, in order.
    pub async fn sent(&self) -> Vec<SentMessage> {
        self.inner.lock().await.sent.clone()
    }

    /// All captured upload calls, in order.
    pub async fn uploads(&self) -> Vec<AssetRef> {
        self.inner.lock().await.uploads.clone()
    }

    async fn record_send(&self, message: SentMessage) -> Result<(), ZenithError> {
        let mut inner = self.inner.lock().await;
        let index = inner.send_calls;
        inner.send_calls += 1;
        if let Some(failure) = inner.fail_send_at.get(&index).copied() {
            return Err(failure.to_error());
        }
        inner.sent.push(message);
        Ok(())
    }
}

#[async_trait]
impl MessageSender for MockSender {
    async fn upload_media(&self, asset: &AssetRef) -> Result<MediaId, ZenithError> {
        let mut inner = self.inner.lock().await;
        if let Some(failure) = inner.fail_upload {
            return Err(failure.to_error());
        }
        inner.uploads.push(asset.clone());
        Ok(MediaId(format!("mock-media-{}", inner.uploads.len())))
    }

    async fn send_text(&self, to: &str, body: &str) -> Result<(), ZenithError> {
        self.record_send(SentMessage::Text {
            to: to.to_string(),
            body: body.to_string(),
        })
        .await
    }

    async fn send_media(
        &self,
        to: &str,
        kind: AssetKind,
        media: &MediaId,
        caption: Option<&str>,
    ) -> Result<(), ZenithError> {
        self.record_send(SentMessage::Media {
            to: to.to_string(),
            kind,
            media_id: media.0.clone(),
            caption: caption.map(str::to_string),
        })
        .await
    }

    async fn send_template(
        &self,
        to: &str,
        spec: &TemplateSpec,
        header: Option<(AssetKind, &MediaId)>,
    ) -> Result<(), ZenithError> {
        self.record_send(SentMessage::Template {
            to: to.to_string(),
            name: spec.name.clone(),
            header: header.map(|(kind, _)| kind),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_sends_in_order() {
        let sender = MockSender::new();
        sender.send_text("1", "a").await.unwrap();
        sender.send_text("2", "b").await.unwrap();

        let sent = sender.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to(), "1");
        assert_eq!(sent[1].to(), "2");
    }

    #[tokio::test]
    async fn scripted_failure_hits_exact_index() {
        let sender = MockSender::new();
        sender.fail_send_at(1, ScriptedFailure::Rejected).await;

        assert!(sender.send_text("1", "a").await.is_ok());
        assert!(sender.send_text("2", "b").await.is_err());
        assert!(sender.send_text("3", "c").await.is_ok());
        assert_eq!(sender.sent().await.len(), 2);
    }

    #[tokio::test]
    async fn credential_failure_is_distinguishable() {
        let sender = MockSender::new();
        sender
            .fail_send_at(0, ScriptedFailure::CredentialExpired)
            .await;
        let err = sender.send_text("1", "a").await.unwrap_err();
        assert!(err.is_credential_expired());
    }

    #[tokio::test]
    async fn uploads_mint_sequential_ids() {
        let sender = MockSender::new();
        let asset = AssetRef::DataUri {
            kind: AssetKind::Image,
            uri: "data:image/png;base64,QUJD".to_string(),
        };
        let first = sender.upload_media(&asset).await.unwrap();
        let second = sender.upload_media(&asset).await.unwrap();
        assert_eq!(first.0, "mock-media-1");
        assert_eq!(second.0, "mock-media-2");
        assert_eq!(sender.uploads().await.len(), 2);
    }
}
