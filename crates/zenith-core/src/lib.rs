// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core types for the Zenith campaign console.
//!
//! Defines the shared error taxonomy, the record types read from and
//! written to the tabular bridge, the phone normalizer the messaging
//! provider requires, a bounded polling utility, and the seam traits
//! that separate the broadcast pipeline from its network adapters.

pub mod error;
pub mod phone;
pub mod poll;
pub mod traits;
pub mod types;

pub use error::ZenithError;
