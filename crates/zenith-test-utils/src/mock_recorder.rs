// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock campaign recorder with write capture.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use zenith_core::ZenithError;
use zenith_core::traits::CampaignRecorder;
use zenith_core::types::Campaign;

/// Captures campaign records instead of writing them to the bridge.
#[derive(Clone, Default)]
pub struct MockRecorder {
    recorded: Arc<Mutex<Vec<Campaign>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent record calls fail.
    pub async fn fail_next(&self) {
        *self.fail.lock().await = true;
    }

    /// All captured campaign records, in order.
    pub async fn recorded(&self) -> Vec<Campaign> {
        self.recorded.lock().await.clone()
    }
}

#[async_trait]
impl CampaignRecorder for MockRecorder {
    async fn record_campaign(&self, campaign: &Campaign) -> Result<(), ZenithError> {
        if *self.fail.lock().await {
            return Err(ZenithError::Bridge {
                message: "mock record failure".to_string(),
                source: None,
            });
        }
        self.recorded.lock().await.push(campaign.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(id: &str) -> Campaign {
        Campaign {
            campaignid: id.to_string(),
            name: "test".to_string(),
            date: "2026-08-28".to_string(),
            audience: "All".to_string(),
            template: "direct".to_string(),
            mediaurl: String::new(),
            sent: 0,
            failed: 0,
            opened: 0,
            replied: 0,
            status: "Completed".to_string(),
            sender: "primary".to_string(),
        }
    }

    #[tokio::test]
    async fn captures_records() {
        let recorder = MockRecorder::new();
        recorder.record_campaign(&campaign("OPS-1")).await.unwrap();
        let recorded = recorder.recorded().await;
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].campaignid, "OPS-1");
    }

    #[tokio::test]
    async fn scripted_failure() {
        let recorder = MockRecorder::new();
        recorder.fail_next().await;
        assert!(recorder.record_campaign(&campaign("OPS-2")).await.is_err());
        assert!(recorder.recorded().await.is_empty());
    }
}
