// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE stream parser for chat-completions streaming responses.
//!
//! Converts a reqwest response byte stream into [`ChatCompletionChunk`]s using
//! the `eventsource-stream` crate. The stream ends at the `data: [DONE]`
//! sentinel.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use folio_core::FolioError;
use futures::future;
use futures::stream::{Stream, StreamExt};

use crate::types::{ApiErrorResponse, ChatCompletionChunk};

/// Payload of the terminating SSE event.
const DONE_SENTINEL: &str = "[DONE]";

/// Parses a reqwest streaming response into a stream of [`ChatCompletionChunk`]s.
///
/// An in-band `{"error": ...}` payload becomes an `Err` item. Keep-alive
/// events with an empty payload are skipped.
pub fn parse_sse_stream(
    response: reqwest::Response,
) -> Pin<Box<dyn Stream<Item = Result<ChatCompletionChunk, FolioError>> + Send>> {
    let event_stream = response.bytes_stream().eventsource();

    let mapped = event_stream
        .take_while(|result| {
            let done = matches!(result, Ok(event) if event.data.trim() == DONE_SENTINEL);
            future::ready(!done)
        })
        .filter_map(|result| async move {
            match result {
                Ok(event) => parse_chunk(&event.data),
                Err(e) => Some(Err(FolioError::Provider {
                    message: format!("SSE stream error: {e}"),
                    source: None,
                })),
            }
        });

    Box::pin(mapped)
}

fn parse_chunk(data: &str) -> Option<Result<ChatCompletionChunk, FolioError>> {
    let data = data.trim();
    if data.is_empty() {
        return None;
    }

    if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(data) {
        return Some(Err(FolioError::provider(format!(
            "OpenAI stream error ({})",
            api_err.describe()
        ))));
    }

    Some(
        serde_json::from_str::<ChatCompletionChunk>(data).map_err(|e| FolioError::Provider {
            message: format!("failed to parse completion chunk: {e}"),
            source: Some(Box::new(e)),
        }),
    )
}
