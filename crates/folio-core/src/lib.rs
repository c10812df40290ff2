// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Folio portfolio service.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Folio workspace. The provider, storage,
//! and notifier adapters implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

pub use error::FolioError;
pub use types::{
    AdapterType, ContactMessage, ContactMessageSummary, ContactNotice, ConversationTurn,
    HealthStatus, InboundEmail, InboundEmailSummary, NewContactMessage, NewInboundEmail,
    NotifyOutcome, ProviderRequest, ProviderResponse, ProviderStreamChunk, Role,
};

pub use traits::{NotifierAdapter, PluginAdapter, ProviderAdapter, ProviderStream, StorageAdapter};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn folio_error_has_all_variants() {
        let _config = FolioError::Config("test".into());
        let _storage = FolioError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _provider = FolioError::provider("test");
        let _notification = FolioError::Notification {
            message: "test".into(),
            source: None,
        };
        let _validation = FolioError::Validation("test".into());
        let _unauthorized = FolioError::Unauthorized("test".into());
        let _timeout = FolioError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = FolioError::Internal("test".into());
    }

    #[test]
    fn uninitialized_responder_message_is_actionable() {
        let msg = FolioError::ResponderUninitialized.to_string();
        assert!(msg.contains("not initialized"), "got: {msg}");
        assert!(msg.contains("init()"), "got: {msg}");
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&ConversationTurn::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
        assert_eq!(Role::User.to_string(), "user");
    }

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;
        for variant in [AdapterType::Provider, AdapterType::Storage, AdapterType::Notifier] {
            let parsed = AdapterType::from_str(&variant.to_string()).unwrap();
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn contact_message_display_and_summary() {
        let msg = ContactMessage {
            id: 7,
            name: "Test User".into(),
            email: "test@example.com".into(),
            subject: "Test Subject".into(),
            message: "Test message content".into(),
            created_at: "2026-01-01T00:00:00.000Z".into(),
        };
        assert_eq!(msg.to_string(), "<ContactMessage 7: Test Subject>");
        let summary = msg.to_summary();
        assert_eq!(summary.name, "Test User");
        assert_eq!(summary.message, "Test message content");
    }

    #[test]
    fn inbound_email_summary_truncates_text_and_drops_html() {
        let email = InboundEmail {
            id: 3,
            from_email: "a@example.com".into(),
            to_email: "b@example.com".into(),
            subject: "Hello".into(),
            text_content: Some("x".repeat(500)),
            html_content: Some("<p>hi</p>".into()),
            received_at: "2026-01-01T00:00:00.000Z".into(),
        };
        assert_eq!(email.to_string(), "<InboundEmail 3: Hello>");
        let summary = email.to_summary();
        assert_eq!(summary.text_content.as_deref().map(str::len), Some(200));
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("html_content"));
    }

    #[test]
    fn inbound_email_summary_keeps_missing_text_as_none() {
        let email = InboundEmail {
            id: 1,
            from_email: "a@example.com".into(),
            to_email: "b@example.com".into(),
            subject: "No body".into(),
            text_content: None,
            html_content: None,
            received_at: "2026-01-01T00:00:00.000Z".into(),
        };
        assert!(email.to_summary().text_content.is_none());
    }

    proptest! {
        #[test]
        fn text_preview_never_exceeds_limit(text in ".{0,400}") {
            let preview = types::text_preview(&text);
            prop_assert!(preview.chars().count() <= types::EMAIL_PREVIEW_CHARS);
            prop_assert!(text.starts_with(&preview));
        }
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_provider_adapter<T: ProviderAdapter>() {}
        fn _assert_storage_adapter<T: StorageAdapter>() {}
        fn _assert_notifier_adapter<T: NotifierAdapter>() {}
    }
}
