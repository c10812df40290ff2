// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Folio service.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Maximum number of characters kept in an inbound email text preview.
pub const EMAIL_PREVIEW_CHARS: usize = 200;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
    Notifier,
}

// --- Conversation types ---

/// Speaker of a conversation turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message in an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// --- Provider types ---

/// A request to a chat-completion provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
    /// Ordered messages, system instruction first.
    pub messages: Vec<ConversationTurn>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Nucleus sampling mass.
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    /// Whether the provider should stream deltas.
    pub stream: bool,
}

/// A complete response from a chat-completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub id: String,
    /// Completion text of the first choice.
    pub content: String,
    pub model: String,
    pub finish_reason: Option<String>,
}

/// A single chunk from a streaming provider response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderStreamChunk {
    /// Text delta, if this chunk carries one.
    pub text: Option<String>,
    /// Set on the final chunk of a choice.
    pub finish_reason: Option<String>,
}

// --- Contact form types ---

/// A contact form submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A stored contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// ISO 8601 timestamp.
    pub created_at: String,
}

/// Dashboard view of a contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessageSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

impl ContactMessage {
    pub fn to_summary(&self) -> ContactMessageSummary {
        ContactMessageSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

impl fmt::Display for ContactMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<ContactMessage {}: {}>", self.id, self.subject)
    }
}

// --- Inbound email types ---

/// An email received through the inbound-parse webhook, not stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInboundEmail {
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub text_content: Option<String>,
    pub html_content: Option<String>,
}

/// A stored inbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEmail {
    pub id: i64,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub text_content: Option<String>,
    pub html_content: Option<String>,
    /// ISO 8601 timestamp.
    pub received_at: String,
}

/// Dashboard view of an inbound email. The HTML body is omitted and the text
/// body is cut to a short preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEmailSummary {
    pub id: i64,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub text_content: Option<String>,
    pub received_at: String,
}

impl InboundEmail {
    pub fn to_summary(&self) -> InboundEmailSummary {
        InboundEmailSummary {
            id: self.id,
            from_email: self.from_email.clone(),
            to_email: self.to_email.clone(),
            subject: self.subject.clone(),
            text_content: self.text_content.as_deref().map(text_preview),
            received_at: self.received_at.clone(),
        }
    }
}

impl fmt::Display for InboundEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<InboundEmail {}: {}>", self.id, self.subject)
    }
}

/// First [`EMAIL_PREVIEW_CHARS`] characters of `text`, cut on a char boundary.
pub fn text_preview(text: &str) -> String {
    text.chars().take(EMAIL_PREVIEW_CHARS).collect()
}

// --- Notification types ---

/// Contact details forwarded to the site owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNotice {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<&NewContactMessage> for ContactNotice {
    fn from(msg: &NewContactMessage) -> Self {
        Self {
            name: msg.name.clone(),
            email: msg.email.clone(),
            subject: msg.subject.clone(),
            message: msg.message.clone(),
        }
    }
}

/// Result of a notification attempt that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotifyOutcome {
    /// The message was accepted by the delivery service.
    Sent,
    /// Delivery is not configured; nothing was sent.
    Skipped,
}
