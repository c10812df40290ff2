// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SendGrid notifier for contact form submissions.
//!
//! [`SendGridNotifier`] posts an HTML notification to the site owner through
//! the SendGrid v3 API. Without an API key it reports
//! [`NotifyOutcome::Skipped`] and sends nothing.

pub mod message;

use std::time::Duration;

use async_trait::async_trait;
use folio_config::model::EmailConfig;
use folio_core::{
    AdapterType, ContactNotice, FolioError, HealthStatus, NotifierAdapter, NotifyOutcome,
    PluginAdapter,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::message::{Address, MailSend, notification_html, notification_subject};

/// Environment variable consulted when `email.sendgrid_api_key` is unset.
pub const API_KEY_ENV: &str = "SENDGRID_API_KEY";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Contact notifier backed by SendGrid.
pub struct SendGridNotifier {
    client: Option<reqwest::Client>,
    endpoint: String,
    recipient: String,
    from: Address,
}

impl SendGridNotifier {
    /// Builds a notifier; `api_key = None` yields one that always skips.
    pub fn new(api_key: Option<SecretString>, config: &EmailConfig) -> Result<Self, FolioError> {
        let client = api_key.map(|key| build_client(&key)).transpose()?;
        if client.is_none() {
            warn!("SendGrid API key not configured; contact notifications disabled");
        }

        Ok(Self {
            client,
            endpoint: format!(
                "{}/v3/mail/send",
                config.sendgrid_base_url.trim_end_matches('/')
            ),
            recipient: config.notification_email.clone(),
            from: Address {
                email: config.from_email.clone(),
                name: Some(config.from_name.clone()),
            },
        })
    }

    /// Builds a notifier using [`resolve_api_key`].
    pub fn from_config(config: &EmailConfig) -> Result<Self, FolioError> {
        Self::new(resolve_api_key(config), config)
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }
}

fn build_client(api_key: &SecretString) -> Result<reqwest::Client, FolioError> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
        .map_err(|e| FolioError::Config(format!("invalid SendGrid API key header value: {e}")))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| FolioError::Notification {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })
}

#[async_trait]
impl PluginAdapter for SendGridNotifier {
    fn name(&self) -> &str {
        "sendgrid"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        if self.is_enabled() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded("SendGrid API key not configured".into()))
        }
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl NotifierAdapter for SendGridNotifier {
    async fn notify_contact(&self, notice: &ContactNotice) -> Result<NotifyOutcome, FolioError> {
        let Some(client) = &self.client else {
            warn!("SendGrid API key not configured; skipping contact notification");
            return Ok(NotifyOutcome::Skipped);
        };

        let mail = MailSend::html(
            self.from.clone(),
            &self.recipient,
            notification_subject(notice),
            notification_html(notice),
        );
        debug!(endpoint = %self.endpoint, "sending contact notification");

        let response = client
            .post(&self.endpoint)
            .json(&mail)
            .send()
            .await
            .map_err(|e| FolioError::Notification {
                message: format!("SendGrid request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FolioError::Notification {
                message: format!("SendGrid returned {status}: {body}"),
                source: None,
            });
        }

        info!(status = status.as_u16(), "contact notification sent");
        Ok(NotifyOutcome::Sent)
    }
}

/// Resolves the SendGrid key: config first, then [`API_KEY_ENV`].
pub fn resolve_api_key(config: &EmailConfig) -> Option<SecretString> {
    pick_api_key(config.sendgrid_api_key.as_deref(), std::env::var(API_KEY_ENV).ok())
        .map(SecretString::from)
}

fn pick_api_key(config_key: Option<&str>, env_key: Option<String>) -> Option<String> {
    if let Some(key) = config_key
        && !key.trim().is_empty()
    {
        return Some(key.to_string());
    }
    env_key.filter(|k| !k.trim().is_empty())
}
