// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full service with mock adapters and a temp
//! SQLite database: a [`MockProvider`] behind the career responder, a
//! [`RecordingNotifier`], and the gateway router. Requests are driven with
//! `tower::ServiceExt::oneshot` against [`TestHarness::router`].

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use folio_agent::{CareerResponder, ResponderSettings, ResponderSlot};
use folio_config::{Environment, FolioConfig};
use folio_core::{FolioError, ProviderAdapter, StorageAdapter};
use folio_gateway::{GatewayState, build_router};
use folio_storage::{DatabaseOptions, SqliteStorage};

use crate::mock_notifier::RecordingNotifier;
use crate::mock_provider::{MockProvider, MockReply};

/// Admin password configured by default in harness environments.
pub const TEST_ADMIN_PASSWORD: &str = "testpass123";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    replies: Vec<MockReply>,
    with_provider: bool,
    notifier: RecordingNotifier,
    static_dir: Option<PathBuf>,
    config: FolioConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = FolioConfig::default();
        config.site.environment = Environment::Testing;
        config.admin.password = Some(TEST_ADMIN_PASSWORD.to_string());
        Self {
            replies: Vec::new(),
            with_provider: true,
            notifier: RecordingNotifier::new(),
            static_dir: None,
            config,
        }
    }

    /// Queue plain-text provider responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.replies.extend(responses.into_iter().map(MockReply::Text));
        self
    }

    /// Queue scripted provider replies (failures, chunked streams, hangs).
    pub fn with_mock_replies(mut self, replies: Vec<MockReply>) -> Self {
        self.replies.extend(replies);
        self
    }

    /// Build without a provider, as when no API key is configured.
    pub fn without_provider(mut self) -> Self {
        self.with_provider = false;
        self
    }

    pub fn with_notifier(mut self, notifier: RecordingNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Serve static files from `dir` for unmatched routes.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Adjust the configuration before anything is built.
    pub fn with_config(mut self, edit: impl FnOnce(&mut FolioConfig)) -> Self {
        edit(&mut self.config);
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, FolioError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| FolioError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new(DatabaseOptions {
            wal_mode: self.config.storage.wal_mode,
            ..DatabaseOptions::new(db_path.to_string_lossy())
        });
        storage.initialize().await?;
        let storage = Arc::new(storage);

        let mock_provider = Arc::new(MockProvider::with_replies(self.replies));
        let provider = self
            .with_provider
            .then(|| Arc::clone(&mock_provider) as Arc<dyn ProviderAdapter + Send + Sync>);

        let slot = ResponderSlot::new();
        let responder = slot.init(CareerResponder::new(
            provider,
            ResponderSettings::from_config(&self.config),
        ));

        let notifier = Arc::new(self.notifier);
        let state = GatewayState::new(
            &self.config,
            Arc::clone(&responder),
            Arc::clone(&storage) as Arc<dyn StorageAdapter + Send + Sync>,
            Arc::clone(&notifier) as Arc<dyn folio_core::NotifierAdapter + Send + Sync>,
        );
        let router = build_router(state, self.static_dir);

        Ok(TestHarness {
            mock_provider,
            notifier,
            storage,
            slot,
            responder,
            router,
            config: self.config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with mock adapters and temp storage.
pub struct TestHarness {
    /// The mock LLM provider (unused when built `without_provider`).
    pub mock_provider: Arc<MockProvider>,
    pub notifier: Arc<RecordingNotifier>,
    /// SQLite storage adapter (temp DB, cleaned up on drop).
    pub storage: Arc<SqliteStorage>,
    pub slot: ResponderSlot,
    pub responder: Arc<CareerResponder>,
    pub config: FolioConfig,
    router: Router,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A fresh clone of the application router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Sends `text` through the responder, bypassing HTTP.
    pub async fn send_message(&self, text: &str) -> String {
        self.responder.respond(text, false).await
    }

    /// Queue another provider reply.
    pub async fn add_provider_reply(&self, reply: MockReply) {
        self.mock_provider.add_reply(reply).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_agent::ResponderMode;

    #[tokio::test]
    async fn builder_creates_working_environment() {
        let harness = TestHarness::builder().build().await.unwrap();
        assert_eq!(harness.responder.mode(), ResponderMode::Llm);
        assert!(harness.slot.is_initialized());
        assert_eq!(harness.storage.count_contact_messages().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn send_message_returns_mock_response() {
        let harness = TestHarness::builder()
            .with_mock_responses(vec!["I build agents.".into()])
            .build()
            .await
            .unwrap();
        assert_eq!(harness.send_message("hello").await, "I build agents.");
        assert_eq!(harness.mock_provider.call_count().await, 1);
        assert_eq!(harness.responder.history_len().await, 2);
    }

    #[tokio::test]
    async fn without_provider_uses_fallback() {
        let harness = TestHarness::builder().without_provider().build().await.unwrap();
        assert_eq!(harness.responder.mode(), ResponderMode::Fallback);
        let answer = harness.send_message("what projects have you built?").await;
        assert_eq!(answer, harness.responder.fallback("projects"));
        assert_eq!(harness.mock_provider.call_count().await, 0);
    }

    #[tokio::test]
    async fn config_edits_apply() {
        let harness = TestHarness::builder()
            .with_config(|c| c.site.name = "Example Site".into())
            .build()
            .await
            .unwrap();
        assert_eq!(harness.config.site.name, "Example Site");
    }

    #[tokio::test]
    async fn temp_db_is_unique_per_harness() {
        let a = TestHarness::builder().build().await.unwrap();
        let b = TestHarness::builder().build().await.unwrap();
        assert_ne!(a.storage.options().path, b.storage.options().path);
    }
}
