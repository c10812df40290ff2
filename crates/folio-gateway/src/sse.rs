// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-Sent Events streaming for POST /api/chat.
//!
//! Event format:
//! ```text
//! event: text_delta
//! data: {"text": "partial content here"}
//!
//! event: message_stop
//! data: {"content": "full content"}
//! ```
//!
//! The responder commits the exchange to history only once its stream is
//! drained, so a client that disconnects mid-answer leaves history unchanged.

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use folio_agent::CareerResponder;
use futures::stream::{Stream, StreamExt};

pub const TEXT_DELTA: &str = "text_delta";
pub const MESSAGE_STOP: &str = "message_stop";

/// Streams the responder's answer to `message` as SSE events.
pub fn stream_chat(
    responder: &CareerResponder,
    message: String,
    reset: bool,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + use<>> {
    let mut chunks = responder.respond_stream(message, reset);

    let events = async_stream::stream! {
        let mut content = String::new();
        while let Some(chunk) = chunks.next().await {
            content.push_str(&chunk);
            let delta = serde_json::json!({ "text": chunk });
            yield Ok(Event::default().event(TEXT_DELTA).data(delta.to_string()));
        }
        let stop = serde_json::json!({ "content": content });
        yield Ok(Event::default().event(MESSAGE_STOP).data(stop.to_string()));
    };

    Sse::new(events).keep_alive(KeepAlive::default())
}
