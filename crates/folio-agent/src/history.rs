// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded, in-memory conversation history.

use std::collections::VecDeque;

use folio_core::types::ConversationTurn;

/// Number of turns kept by default (five exchanges).
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Ordered turns, oldest first.
///
/// `push` only appends. The limit is applied by `truncate` once an exchange
/// is complete, so the request for a turn still sees the full previous window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationHistory {
    turns: VecDeque<ConversationTurn>,
    limit: usize,
}

impl ConversationHistory {
    /// Creates an empty history holding at most `limit` turns (at least one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            turns: VecDeque::with_capacity(limit + 1),
            limit,
        }
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push_back(turn);
    }

    /// Drops the oldest turns until at most `limit` remain.
    pub fn truncate(&mut self) {
        let excess = self.turns.len().saturating_sub(self.limit);
        self.turns.drain(..excess);
    }

    /// Appends the closing turn of an exchange and applies the limit.
    pub fn push_and_truncate(&mut self, turn: ConversationTurn) {
        self.push(turn);
        self.truncate();
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    /// Owned copy of the turns, oldest first.
    pub fn to_vec(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
