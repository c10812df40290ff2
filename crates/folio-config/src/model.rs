// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Folio service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Plaintext admin password accepted in development when none is configured.
pub const DEV_FALLBACK_ADMIN_PASSWORD: &str = "changeme123";

/// Top-level Folio configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    /// Site identity and runtime environment.
    #[serde(default)]
    pub site: SiteConfig,

    /// OpenAI chat-completion settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Career responder behavior.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Admin dashboard credentials.
    #[serde(default)]
    pub admin: AdminConfig,

    /// Contact notification email settings.
    #[serde(default)]
    pub email: EmailConfig,
}

impl FolioConfig {
    /// Database path, falling back to the per-environment default.
    pub fn database_path(&self) -> String {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| self.site.environment.default_database_path().to_string())
    }

    /// Whether SQL statements are echoed to the log.
    pub fn echo_sql(&self) -> bool {
        self.storage
            .echo_sql
            .unwrap_or(self.site.environment == Environment::Development)
    }
}

/// Deployment environment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Default SQLite location for this environment.
    pub fn default_database_path(self) -> &'static str {
        match self {
            Environment::Development => "folio-dev.db",
            Environment::Production => "folio.db",
            Environment::Testing => ":memory:",
        }
    }
}

/// Site identity configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Public site name, reported by `/api/status`.
    #[serde(default = "default_site_name")]
    pub name: String,

    #[serde(default)]
    pub environment: Environment,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory of static assets served for unmatched routes.
    #[serde(default)]
    pub static_dir: Option<String>,

    /// Application secret. Required in production.
    #[serde(default)]
    pub secret_key: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            environment: Environment::default(),
            log_level: default_log_level(),
            static_dir: None,
            secret_key: None,
        }
    }
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("name", &self.name)
            .field("environment", &self.environment)
            .field("log_level", &self.log_level)
            .field("static_dir", &self.static_dir)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

fn default_site_name() -> String {
    "josefinhao.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// OpenAI chat-completion configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` falls back to `OPENAI_API_KEY`, then to keyword-only mode.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the chat-completions API.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model identifier.
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Upper bound on one upstream call (and on each streamed chunk).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_openai_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

/// Career responder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Maximum number of turns kept in conversation history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Longest accepted visitor message, in characters.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    /// Include the location topic in keyword fallback answers.
    #[serde(default = "default_true")]
    pub location_bucket: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            max_message_chars: default_max_message_chars(),
            location_bucket: true,
        }
    }
}

fn default_history_limit() -> usize {
    10
}

fn default_max_message_chars() -> usize {
    4000
}

fn default_true() -> bool {
    true
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file. Defaults per environment.
    #[serde(default)]
    pub database_path: Option<String>,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_true")]
    pub wal_mode: bool,

    /// Log every SQL statement at debug level. Defaults to on in development.
    #[serde(default)]
    pub echo_sql: Option<bool>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            wal_mode: true,
            echo_sql: None,
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10000
}

/// Admin dashboard credentials.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    /// Argon2 PHC string, produced by `folio hash-password`.
    #[serde(default)]
    pub password_hash: Option<String>,

    /// Plaintext password. Rejected in production.
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password_hash: None,
            password: None,
        }
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password_hash", &self.password_hash.is_some())
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

/// Contact notification email configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    /// SendGrid API key. `None` falls back to `SENDGRID_API_KEY`, then disables notifications.
    #[serde(default)]
    pub sendgrid_api_key: Option<String>,

    /// Base URL of the SendGrid API.
    #[serde(default = "default_sendgrid_base_url")]
    pub sendgrid_base_url: String,

    /// Recipient of contact notifications.
    #[serde(default = "default_notification_email")]
    pub notification_email: String,

    #[serde(default = "default_from_email")]
    pub from_email: String,

    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sendgrid_api_key: None,
            sendgrid_base_url: default_sendgrid_base_url(),
            notification_email: default_notification_email(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field(
                "sendgrid_api_key",
                &self.sendgrid_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("sendgrid_base_url", &self.sendgrid_base_url)
            .field("notification_email", &self.notification_email)
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .finish()
    }
}

fn default_sendgrid_base_url() -> String {
    "https://api.sendgrid.com".to_string()
}

fn default_notification_email() -> String {
    "josefin.rui.hao@gmail.com".to_string()
}

fn default_from_email() -> String {
    "notifications@josefinhao.com".to_string()
}

fn default_from_name() -> String {
    "Josefin Hao Website".to_string()
}
