// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini content generation adapter for the Zenith campaign console.

mod client;
mod types;

pub use client::GeminiClient;
