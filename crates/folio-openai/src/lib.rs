// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions provider adapter for Folio.
//!
//! This crate implements [`ProviderAdapter`] for any OpenAI-compatible
//! `/chat/completions` endpoint, providing both single-shot completion and
//! streaming SSE responses.

pub mod client;
pub mod sse;
pub mod types;

use async_trait::async_trait;
use folio_config::model::OpenAiConfig;
use folio_core::error::FolioError;
use folio_core::traits::{PluginAdapter, ProviderAdapter, ProviderStream};
use folio_core::types::{
    AdapterType, ConversationTurn, HealthStatus, ProviderRequest, ProviderResponse,
    ProviderStreamChunk,
};
use futures::stream::StreamExt;
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ChatCompletionChunk, ChatCompletionRequest, ChatMessage};

/// Environment variable consulted when `openai.api_key` is not configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI provider implementing [`ProviderAdapter`].
pub struct OpenAiProvider {
    client: OpenAiClient,
    model: String,
}

impl OpenAiProvider {
    /// Creates a provider for `config.base_url` authenticated with `api_key`.
    ///
    /// Use [`resolve_api_key`] to find the key; a missing key means the
    /// caller should not build a provider at all.
    pub fn new(api_key: SecretString, config: &OpenAiConfig) -> Result<Self, FolioError> {
        let client = OpenAiClient::new(&api_key, &config.base_url)?;

        info!(
            model = config.model,
            endpoint = client.endpoint(),
            "OpenAI provider initialized"
        );

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    /// Default model identifier from configuration.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        // Probing the API would spend tokens; a constructed client is healthy.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, FolioError> {
        let api_request = to_chat_request(request);
        let response = self.client.complete_chat(&api_request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| FolioError::provider("completion contained no choices"))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| FolioError::provider("completion choice had no content"))?;

        Ok(ProviderResponse {
            id: response.id,
            content,
            model: response.model,
            finish_reason: choice.finish_reason,
        })
    }

    async fn stream(&self, request: ProviderRequest) -> Result<ProviderStream, FolioError> {
        let api_request = to_chat_request(request);
        let chunk_stream = self.client.stream_chat(&api_request).await?;

        let mapped = chunk_stream.filter_map(|result| async move {
            match result {
                Ok(chunk) => map_chunk(chunk).map(Ok),
                Err(e) => Some(Err(e)),
            }
        });

        Ok(Box::pin(mapped))
    }
}

/// Converts a [`ProviderRequest`] to the wire request.
fn to_chat_request(request: ProviderRequest) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: request.model,
        messages: request.messages.into_iter().map(to_chat_message).collect(),
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        top_p: request.top_p,
        frequency_penalty: request.frequency_penalty,
        presence_penalty: request.presence_penalty,
        stream: request.stream,
    }
}

fn to_chat_message(turn: ConversationTurn) -> ChatMessage {
    ChatMessage {
        role: turn.role.to_string(),
        content: turn.content,
    }
}

/// Maps the first choice of a chunk to a [`ProviderStreamChunk`], dropping
/// chunks that carry neither text nor a finish reason (role-only deltas).
fn map_chunk(chunk: ChatCompletionChunk) -> Option<ProviderStreamChunk> {
    let choice = chunk.choices.into_iter().next()?;
    let text = choice.delta.content.filter(|t| !t.is_empty());
    if text.is_none() && choice.finish_reason.is_none() {
        return None;
    }
    Some(ProviderStreamChunk {
        text,
        finish_reason: choice.finish_reason,
    })
}

/// Resolves the API key: `openai.api_key` first, then `OPENAI_API_KEY`.
///
/// Returns `None` when neither is set (or both are blank); the responder then
/// runs in fallback mode.
pub fn resolve_api_key(config: &OpenAiConfig) -> Option<SecretString> {
    pick_api_key(config.api_key.as_deref(), std::env::var(API_KEY_ENV).ok())
        .map(SecretString::from)
}

fn pick_api_key(config_key: Option<&str>, env_key: Option<String>) -> Option<String> {
    if let Some(key) = config_key
        && !key.trim().is_empty()
    {
        return Some(key.to_string());
    }
    env_key.filter(|k| !k.trim().is_empty())
}
