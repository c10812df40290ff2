// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::FolioError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ContactMessage, InboundEmail, NewContactMessage, NewInboundEmail};

/// Adapter for storage and persistence backends.
///
/// Holds contact form submissions and emails received by the inbound webhook.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), FolioError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), FolioError>;

    // --- Contact messages ---

    /// Stores a contact submission and returns its id.
    async fn insert_contact_message(&self, msg: &NewContactMessage) -> Result<i64, FolioError>;

    /// Lists the most recent contact messages, newest first.
    async fn list_contact_messages(&self, limit: i64) -> Result<Vec<ContactMessage>, FolioError>;

    async fn count_contact_messages(&self) -> Result<i64, FolioError>;

    // --- Inbound emails ---

    /// Stores an inbound email and returns its id.
    async fn insert_inbound_email(&self, email: &NewInboundEmail) -> Result<i64, FolioError>;

    /// Lists the most recent inbound emails, newest first.
    async fn list_inbound_emails(&self, limit: i64) -> Result<Vec<InboundEmail>, FolioError>;

    async fn count_inbound_emails(&self) -> Result<i64, FolioError>;
}
