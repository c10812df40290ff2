// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat-completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! bearer authentication, and streaming SSE responses. Failed calls are
//! not retried; the caller decides how to degrade.

use std::pin::Pin;
use std::time::Duration;

use folio_core::FolioError;
use futures::Stream;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::sse;
use crate::types::{
    ApiErrorResponse, ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse,
};

/// Upper bound on a single HTTP exchange. The responder applies its own,
/// shorter, per-call timeout on top of this.
const HTTP_TIMEOUT: Duration = Duration::from_secs(300);

/// HTTP client for chat-completions communication.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `api_key` - API key sent as a bearer token
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`
    pub fn new(api_key: &SecretString, base_url: &str) -> Result<Self, FolioError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| FolioError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| FolioError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a non-streaming request and returns the parsed response.
    pub async fn complete_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, FolioError> {
        let mut req = request.clone();
        req.stream = false;

        let response = self.send(&req).await?;
        let body = response.text().await.map_err(|e| FolioError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| FolioError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Sends a streaming request and returns a stream of completion chunks.
    pub async fn stream_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<
        Pin<Box<dyn Stream<Item = Result<ChatCompletionChunk, FolioError>> + Send>>,
        FolioError,
    > {
        let mut req = request.clone();
        req.stream = true;

        let response = self.send(&req).await?;
        Ok(sse::parse_sse_stream(response))
    }

    async fn send(&self, req: &ChatCompletionRequest) -> Result<reqwest::Response, FolioError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(req)
            .send()
            .await
            .map_err(|e| FolioError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, stream = req.stream, "chat completion response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_err) => format!("OpenAI API error ({})", api_err.describe()),
            Err(_) => format!("API returned {status}: {body}"),
        };
        Err(FolioError::provider(message))
    }
}
