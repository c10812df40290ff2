// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier adapter trait for alerting the site owner.

use async_trait::async_trait;

use crate::error::FolioError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ContactNotice, NotifyOutcome};

/// Adapter that forwards contact form submissions to the site owner.
#[async_trait]
pub trait NotifierAdapter: PluginAdapter {
    /// Sends a notification for a new contact submission.
    ///
    /// Returns [`NotifyOutcome::Skipped`] when delivery is not configured.
    async fn notify_contact(&self, notice: &ContactNotice) -> Result<NotifyOutcome, FolioError>;
}
