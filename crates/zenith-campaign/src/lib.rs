// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Campaign pipeline: audience resolution, the sequential broadcast
//! engine, the five-stage wizard, and session persistence.

pub mod audience;
pub mod broadcast;
pub mod session;
pub mod wizard;

pub use audience::{Segment, resolve};
pub use broadcast::{AbortReason, BroadcastEngine, DeliveryMode, MissionOutcome, MissionSpec};
pub use session::{SessionData, SessionStore};
pub use wizard::{ArchitectForm, CreativeState, Wizard, WizardError, WizardState};
