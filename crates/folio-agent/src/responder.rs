// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The career responder: persona-prompted chat with a keyword fallback.
//!
//! A [`CareerResponder`] built without a provider stays in fallback mode for
//! its whole life and never reads or writes history. With a provider, every
//! turn runs under the history lock: the user turn is appended, the persona
//! prompt plus history is sent upstream, and the reply is appended. Upstream
//! failures (including timeouts) are logged and answered from the
//! [`FallbackMatcher`]; the caller always gets text back.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use folio_config::model::FolioConfig;
use folio_core::error::FolioError;
use folio_core::traits::ProviderAdapter;
use folio_core::types::{ConversationTurn, ProviderRequest};
use futures::{Stream, StreamExt};
use strum::Display;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::fallback::FallbackMatcher;
use crate::history::{ConversationHistory, DEFAULT_HISTORY_LIMIT};
use crate::persona;

/// Characters of the visitor's message included in log lines.
const LOG_PREVIEW_CHARS: usize = 50;

/// Fixed sampling and bookkeeping parameters of a responder.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponderSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    /// Bound on the upstream call, and on the wait for each streamed chunk.
    pub timeout: Duration,
    pub history_limit: usize,
    /// Whether the fallback matcher answers location questions.
    pub include_location: bool,
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            timeout: Duration::from_secs(30),
            history_limit: DEFAULT_HISTORY_LIMIT,
            include_location: true,
        }
    }
}

impl ResponderSettings {
    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            model: config.openai.model.clone(),
            temperature: config.openai.temperature,
            max_tokens: config.openai.max_tokens,
            timeout: Duration::from_secs(config.openai.timeout_secs),
            history_limit: config.agent.history_limit,
            include_location: config.agent.location_bucket,
            ..Self::default()
        }
    }

    /// Persona system turn followed by the history, oldest first.
    fn request(&self, history: &ConversationHistory, stream: bool) -> ProviderRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(persona::system_turn());
        messages.extend(history.iter().cloned());

        ProviderRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
            frequency_penalty: self.frequency_penalty,
            presence_penalty: self.presence_penalty,
            stream,
        }
    }
}

/// How a responder produces answers; fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResponderMode {
    /// Answers come from the upstream model.
    Llm,
    /// No credential; answers come from the keyword matcher only.
    Fallback,
}

/// Persona chat responder shared by all visitors.
pub struct CareerResponder {
    provider: Option<Arc<dyn ProviderAdapter + Send + Sync>>,
    history: Arc<Mutex<ConversationHistory>>,
    matcher: FallbackMatcher,
    settings: Arc<ResponderSettings>,
}

impl CareerResponder {
    /// Creates a responder. `None` puts it permanently in fallback mode.
    pub fn new(
        provider: Option<Arc<dyn ProviderAdapter + Send + Sync>>,
        settings: ResponderSettings,
    ) -> Self {
        let mode = if provider.is_some() {
            ResponderMode::Llm
        } else {
            ResponderMode::Fallback
        };
        info!(%mode, model = settings.model, "career responder initialized");

        Self {
            provider,
            history: Arc::new(Mutex::new(ConversationHistory::new(settings.history_limit))),
            matcher: FallbackMatcher::new(settings.include_location),
            settings: Arc::new(settings),
        }
    }

    /// A responder that never calls upstream.
    pub fn fallback_only(settings: ResponderSettings) -> Self {
        Self::new(None, settings)
    }

    pub fn mode(&self) -> ResponderMode {
        if self.provider.is_some() {
            ResponderMode::Llm
        } else {
            ResponderMode::Fallback
        }
    }

    pub fn settings(&self) -> &ResponderSettings {
        &self.settings
    }

    /// The keyword answer for `text`, exactly as a failed turn would return it.
    pub fn fallback(&self, text: &str) -> &'static str {
        self.matcher.respond(text)
    }

    /// Answers one visitor message.
    ///
    /// `reset_history` clears the history before the turn. Never fails: on
    /// upstream errors the keyword answer is returned and the user turn stays
    /// in history without a reply.
    pub async fn respond(&self, user_message: &str, reset_history: bool) -> String {
        let Some(provider) = &self.provider else {
            return self.matcher.respond(user_message).to_string();
        };

        let mut history = self.history.lock().await;
        if reset_history {
            history.clear();
        }
        history.push(ConversationTurn::user(user_message));

        let request = self.settings.request(&history, false);
        match with_timeout(self.settings.timeout, provider.complete(request)).await {
            Ok(response) => {
                history.push_and_truncate(ConversationTurn::assistant(response.content.clone()));
                info!(
                    query = %log_preview(user_message),
                    history_len = history.len(),
                    "career responder answered"
                );
                response.content
            }
            Err(e) => {
                error!(
                    error = %e,
                    query = %log_preview(user_message),
                    provider = provider.name(),
                    "upstream completion failed; answering from keyword fallback"
                );
                self.matcher.respond(user_message).to_string()
            }
        }
    }

    /// Answers one visitor message incrementally.
    ///
    /// Nothing happens until the returned stream is first polled. The reply
    /// is committed to history only once the stream has been drained; dropping
    /// it early leaves history exactly as it was. If upstream fails part-way,
    /// the last item is the full keyword answer and only the user turn is kept.
    pub fn respond_stream(
        &self,
        user_message: impl Into<String>,
        reset_history: bool,
    ) -> ResponseStream {
        let message: String = user_message.into();
        let matcher = self.matcher;

        let Some(provider) = self.provider.clone() else {
            let answer = matcher.respond(&message).to_string();
            return ResponseStream::new(futures::stream::once(async move { answer }));
        };

        let history = Arc::clone(&self.history);
        let settings = Arc::clone(&self.settings);

        let stream = async_stream::stream! {
            let mut committed = history.lock_owned().await;

            // Work on a draft so a dropped stream commits nothing.
            let mut draft = committed.clone();
            if reset_history {
                draft.clear();
            }
            draft.push(ConversationTurn::user(message.as_str()));

            let request = settings.request(&draft, true);
            let mut upstream = match with_timeout(settings.timeout, provider.stream(request)).await {
                Ok(upstream) => upstream,
                Err(e) => {
                    error!(
                        error = %e,
                        query = %log_preview(&message),
                        "upstream stream failed to start; answering from keyword fallback"
                    );
                    *committed = draft;
                    yield matcher.respond(&message).to_string();
                    return;
                }
            };

            let mut full = String::new();
            loop {
                let next = tokio::time::timeout(settings.timeout, upstream.next()).await;
                match next {
                    Ok(Some(Ok(chunk))) => {
                        if let Some(text) = chunk.text {
                            full.push_str(&text);
                            yield text;
                        }
                    }
                    Ok(None) => break,
                    Ok(Some(Err(e))) => {
                        error!(
                            error = %e,
                            query = %log_preview(&message),
                            partial_chars = full.chars().count(),
                            "upstream stream failed; answering from keyword fallback"
                        );
                        *committed = draft;
                        yield matcher.respond(&message).to_string();
                        return;
                    }
                    Err(_) => {
                        let e = FolioError::Timeout { duration: settings.timeout };
                        error!(
                            error = %e,
                            query = %log_preview(&message),
                            "upstream stream stalled; answering from keyword fallback"
                        );
                        *committed = draft;
                        yield matcher.respond(&message).to_string();
                        return;
                    }
                }
            }

            draft.push_and_truncate(ConversationTurn::assistant(full));
            *committed = draft;
            info!(
                query = %log_preview(&message),
                history_len = committed.len(),
                "career responder streamed answer"
            );
        };

        ResponseStream::new(stream)
    }

    /// Clears the conversation history. Idempotent.
    pub async fn reset(&self) {
        self.history.lock().await.clear();
        info!("career responder history reset");
    }

    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }

    /// Snapshot of the history, oldest first.
    pub async fn history(&self) -> Vec<ConversationTurn> {
        self.history.lock().await.to_vec()
    }
}

impl fmt::Debug for CareerResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CareerResponder")
            .field("mode", &self.mode())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Lazy, finite, non-restartable sequence of answer fragments.
pub struct ResponseStream {
    inner: Pin<Box<dyn Stream<Item = String> + Send>>,
}

impl ResponseStream {
    fn new(stream: impl Stream<Item = String> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(stream),
        }
    }

    /// Drains the stream and returns the concatenated text.
    pub async fn collect_text(mut self) -> String {
        let mut text = String::new();
        while let Some(chunk) = self.inner.next().await {
            text.push_str(&chunk);
        }
        debug!(chars = text.chars().count(), "response stream drained");
        text
    }
}

impl Stream for ResponseStream {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseStream").finish_non_exhaustive()
    }
}

async fn with_timeout<T>(
    duration: Duration,
    fut: impl Future<Output = Result<T, FolioError>>,
) -> Result<T, FolioError> {
    tokio::time::timeout(duration, fut)
        .await
        .map_err(|_| FolioError::Timeout { duration })?
}

fn log_preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use folio_core::traits::{PluginAdapter, ProviderStream};
    use folio_core::types::{AdapterType, HealthStatus, ProviderResponse};
    use tracing_test::traced_test;

    /// Provider whose calls fail or never finish.
    struct BrokenProvider {
        hang: bool,
    }

    #[async_trait]
    impl PluginAdapter for BrokenProvider {
        fn name(&self) -> &str {
            "broken"
        }

        fn version(&self) -> semver::Version {
            semver::Version::new(0, 0, 1)
        }

        fn adapter_type(&self) -> AdapterType {
            AdapterType::Provider
        }

        async fn health_check(&self) -> Result<HealthStatus, FolioError> {
            Ok(HealthStatus::Unhealthy("broken".into()))
        }

        async fn shutdown(&self) -> Result<(), FolioError> {
            Ok(())
        }
    }

    #[async_trait]
    impl ProviderAdapter for BrokenProvider {
        async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, FolioError> {
            if self.hang {
                futures::future::pending::<()>().await;
            }
            Err(FolioError::provider("quota exceeded"))
        }

        async fn stream(&self, _request: ProviderRequest) -> Result<ProviderStream, FolioError> {
            if self.hang {
                futures::future::pending::<()>().await;
            }
            Err(FolioError::provider("quota exceeded"))
        }
    }

    fn broken(hang: bool) -> CareerResponder {
        let settings = ResponderSettings {
            timeout: Duration::from_millis(50),
            ..ResponderSettings::default()
        };
        CareerResponder::new(Some(Arc::new(BrokenProvider { hang })), settings)
    }

    #[test]
    fn settings_follow_config() {
        let mut config = FolioConfig::default();
        config.openai.model = "gpt-4o".into();
        config.openai.timeout_secs = 5;
        config.agent.history_limit = 4;
        config.agent.location_bucket = false;

        let settings = ResponderSettings::from_config(&config);
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.history_limit, 4);
        assert!(!settings.include_location);
        assert_eq!(settings.top_p, 1.0);
        assert_eq!(settings.presence_penalty, 0.0);
    }

    #[test]
    fn request_starts_with_persona() {
        let mut history = ConversationHistory::default();
        history.push(ConversationTurn::user("hi"));
        let request = ResponderSettings::default().request(&history, true);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0], persona::system_turn());
        assert_eq!(request.messages[1], ConversationTurn::user("hi"));
        assert!(request.stream);
        assert_eq!(request.max_tokens, 500);
    }

    #[test]
    fn mode_displays_lowercase() {
        assert_eq!(ResponderMode::Llm.to_string(), "llm");
        assert_eq!(ResponderMode::Fallback.to_string(), "fallback");
    }

    #[test]
    fn log_preview_is_char_bounded() {
        let text = "é".repeat(80);
        assert_eq!(log_preview(&text).chars().count(), LOG_PREVIEW_CHARS);
    }

    #[tokio::test]
    #[traced_test]
    async fn upstream_failure_is_logged() {
        let responder = broken(false);
        let answer = responder.respond("Tell me about your projects", false).await;
        assert_eq!(answer, responder.fallback("Tell me about your projects"));
        assert!(logs_contain("upstream completion failed"));
        assert!(logs_contain("quota exceeded"));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_upstream_times_out_into_fallback() {
        let responder = broken(true);
        let answer = responder.respond("What skills do you have?", false).await;
        assert_eq!(answer, responder.fallback("What skills do you have?"));

        let history = responder.history().await;
        assert_eq!(history, vec![ConversationTurn::user("What skills do you have?")]);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_stream_start_times_out_into_fallback() {
        let responder = broken(true);
        let chunks: Vec<String> = responder
            .respond_stream("How can I contact you?", false)
            .collect()
            .await;
        assert_eq!(chunks, vec![responder.fallback("How can I contact you?").to_string()]);
        assert_eq!(responder.history_len().await, 1);
    }
}
