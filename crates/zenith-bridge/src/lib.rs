// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tabular data bridge for the Zenith campaign console.
//!
//! The remote store is a spreadsheet exposed through an Apps Script web
//! app. This crate wraps its wire contract, normalizes hand-edited column
//! headers onto canonical keys, decodes rows into typed records, and
//! serves built-in demo datasets when the endpoint is absent or down.

pub mod client;
pub mod fallback;
pub mod schema;

pub use client::{BridgeClient, Outcome};
pub use schema::{Row, Table, fuzzy_phone_match};
