// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Folio integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Scripted chat provider (replies, failures, chunked streams)
//! - [`RecordingNotifier`] - Notifier that captures contact notices
//! - [`TestHarness`] - Full service stack over a temp database

pub mod harness;
pub mod mock_notifier;
pub mod mock_provider;

pub use harness::{TEST_ADMIN_PASSWORD, TestHarness, TestHarnessBuilder};
pub use mock_notifier::RecordingNotifier;
pub use mock_provider::{DEFAULT_MOCK_REPLY, MockProvider, MockReply};
