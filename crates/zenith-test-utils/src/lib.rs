// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Zenith integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without external services.
//!
//! # Components
//!
//! - [`MockSender`] - Mock message sender with call capture and scripted failures
//! - [`MockGenerator`] - Mock content generator with canned variation sets
//! - [`MockRecorder`] - Mock campaign recorder with write capture

pub mod mock_generator;
pub mod mock_recorder;
pub mod mock_sender;

pub use mock_generator::MockGenerator;
pub use mock_recorder::MockRecorder;
pub use mock_sender::{MockSender, ScriptedFailure, SentMessage};
