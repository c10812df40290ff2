// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Career responder for the Folio portfolio service.
//!
//! The [`CareerResponder`] answers visitor questions in the persona's voice:
//! - Sends the persona prompt plus a bounded history to the upstream model
//! - Streams replies, committing them to history only once fully drained
//! - Falls back to deterministic keyword answers when no model is configured
//!   or the upstream call fails
//!
//! The bootstrap installs the responder in a [`ResponderSlot`] and hands the
//! resulting `Arc` to the HTTP layer.

pub mod fallback;
pub mod history;
pub mod persona;
pub mod responder;
pub mod slot;

pub use fallback::{FallbackMatcher, KeywordBucket};
pub use history::ConversationHistory;
pub use responder::{CareerResponder, ResponderMode, ResponderSettings, ResponseStream};
pub use slot::ResponderSlot;
