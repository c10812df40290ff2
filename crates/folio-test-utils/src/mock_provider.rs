// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat-completion provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with scripted replies,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;

use folio_core::FolioError;
use folio_core::traits::{PluginAdapter, ProviderAdapter, ProviderStream};
use folio_core::types::{
    AdapterType, HealthStatus, ProviderRequest, ProviderResponse, ProviderStreamChunk,
};

/// Text returned when the reply queue is empty.
pub const DEFAULT_MOCK_REPLY: &str = "mock response";

/// One scripted provider reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// `complete` returns the text; `stream` yields it as a single chunk.
    Text(String),
    /// `complete` returns the joined chunks; `stream` yields them one by one.
    Chunks(Vec<String>),
    /// Both calls fail before producing anything.
    Fail(String),
    /// `stream` yields the chunks and then an error; `complete` fails.
    FailMidStream { chunks: Vec<String>, error: String },
    /// The call never finishes.
    Hang,
}

impl MockReply {
    /// Splits `text` into word-sized chunks, keeping the separating spaces.
    pub fn words(text: &str) -> Self {
        let mut chunks = Vec::new();
        for (i, word) in text.split(' ').enumerate() {
            if i == 0 {
                chunks.push(word.to_string());
            } else {
                chunks.push(format!(" {word}"));
            }
        }
        Self::Chunks(chunks)
    }
}

/// A mock provider that pops scripted replies from a FIFO queue and records
/// every request it receives.
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<ProviderRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self::with_replies(Vec::new())
    }

    /// Create a mock provider pre-loaded with plain text replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::with_replies(responses.into_iter().map(MockReply::Text).collect())
    }

    /// Create a mock provider pre-loaded with scripted replies.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn add_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Add a plain text reply to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.add_reply(MockReply::Text(text)).await;
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of `complete` and `stream` calls made.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_reply(&self, request: ProviderRequest) -> MockReply {
        self.requests.lock().await.push(request);
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Text(DEFAULT_MOCK_REPLY.to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, FolioError> {
        let model = request.model.clone();
        let content = match self.next_reply(request).await {
            MockReply::Text(text) => text,
            MockReply::Chunks(chunks) => chunks.concat(),
            MockReply::Fail(message) | MockReply::FailMidStream { error: message, .. } => {
                return Err(FolioError::provider(message));
            }
            MockReply::Hang => futures::future::pending().await,
        };

        Ok(ProviderResponse {
            id: "mock-resp".to_string(),
            content,
            model,
            finish_reason: Some("stop".to_string()),
        })
    }

    async fn stream(&self, request: ProviderRequest) -> Result<ProviderStream, FolioError> {
        let (chunks, error) = match self.next_reply(request).await {
            MockReply::Text(text) => (vec![text], None),
            MockReply::Chunks(chunks) => (chunks, None),
            MockReply::Fail(message) => return Err(FolioError::provider(message)),
            MockReply::FailMidStream { chunks, error } => (chunks, Some(error)),
            MockReply::Hang => {
                return Ok(stream::pending::<Result<ProviderStreamChunk, FolioError>>().boxed());
            }
        };

        let mut items: Vec<Result<ProviderStreamChunk, FolioError>> = chunks
            .into_iter()
            .map(|text| {
                Ok(ProviderStreamChunk {
                    text: Some(text),
                    finish_reason: None,
                })
            })
            .collect();
        match error {
            Some(message) => items.push(Err(FolioError::provider(message))),
            None => items.push(Ok(ProviderStreamChunk {
                text: None,
                finish_reason: Some("stop".to_string()),
            })),
        }

        Ok(stream::iter(items).boxed())
    }
}
