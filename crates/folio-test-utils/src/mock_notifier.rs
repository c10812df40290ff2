// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier that records contact notices instead of sending them.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use folio_core::FolioError;
use folio_core::traits::{NotifierAdapter, PluginAdapter};
use folio_core::types::{AdapterType, ContactNotice, HealthStatus, NotifyOutcome};

/// How a [`RecordingNotifier`] answers each notification.
#[derive(Debug, Clone)]
enum Behavior {
    Outcome(NotifyOutcome),
    Fail(String),
}

/// Captures every [`ContactNotice`] it is asked to deliver.
pub struct RecordingNotifier {
    behavior: Behavior,
    sent: Arc<Mutex<Vec<ContactNotice>>>,
}

impl RecordingNotifier {
    /// A notifier that reports every notice as sent.
    pub fn new() -> Self {
        Self::with_behavior(Behavior::Outcome(NotifyOutcome::Sent))
    }

    /// A notifier that behaves as if delivery were not configured.
    pub fn skipping() -> Self {
        Self::with_behavior(Behavior::Outcome(NotifyOutcome::Skipped))
    }

    /// A notifier whose every delivery fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Notices received so far, oldest first (including failed ones).
    pub async fn notices(&self) -> Vec<ContactNotice> {
        self.sent.lock().await.clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for RecordingNotifier {
    fn name(&self) -> &str {
        "recording-notifier"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl NotifierAdapter for RecordingNotifier {
    async fn notify_contact(&self, notice: &ContactNotice) -> Result<NotifyOutcome, FolioError> {
        self.sent.lock().await.push(notice.clone());
        match &self.behavior {
            Behavior::Outcome(outcome) => Ok(*outcome),
            Behavior::Fail(message) => Err(FolioError::Notification {
                message: message.clone(),
                source: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice() -> ContactNotice {
        ContactNotice {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hi".into(),
            message: "Hello there".into(),
        }
    }

    #[tokio::test]
    async fn records_and_reports_sent() {
        let notifier = RecordingNotifier::new();
        let outcome = notifier.notify_contact(&notice()).await.unwrap();
        assert_eq!(outcome, NotifyOutcome::Sent);
        assert_eq!(notifier.notices().await, vec![notice()]);
    }

    #[tokio::test]
    async fn failing_notifier_still_records() {
        let notifier = RecordingNotifier::failing("smtp down");
        assert!(notifier.notify_contact(&notice()).await.is_err());
        assert_eq!(notifier.notices().await.len(), 1);
    }

    #[tokio::test]
    async fn skipping_notifier_reports_skipped() {
        let notifier = RecordingNotifier::skipping();
        assert_eq!(
            notifier.notify_contact(&notice()).await.unwrap(),
            NotifyOutcome::Skipped
        );
    }
}
