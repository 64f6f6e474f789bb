// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Campaign persistence seam.

use async_trait::async_trait;

use crate::error::ZenithError;
use crate::types::Campaign;

/// Writes the one Campaign record a completed mission produces.
///
/// Implemented by the tabular bridge client; mocked in engine tests.
#[async_trait]
pub trait CampaignRecorder: Send + Sync {
    async fn record_campaign(&self, campaign: &Campaign) -> Result<(), ZenithError>;
}
