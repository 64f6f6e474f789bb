// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam traits separating the broadcast pipeline from network adapters.

pub mod generator;
pub mod recorder;
pub mod sender;

pub use generator::{ContentGenerator, VariationRequest};
pub use recorder::CampaignRecorder;
pub use sender::MessageSender;
