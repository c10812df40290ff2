// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use folio_config::FolioConfig;
use folio_core::{
    AdapterType, ContactMessage, FolioError, HealthStatus, InboundEmail, NewContactMessage,
    NewInboundEmail, PluginAdapter, StorageAdapter,
};

use crate::database::{Database, DatabaseOptions, map_tr_err};
use crate::queries;

/// SQLite-backed storage adapter.
///
/// The database is opened on the first call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    options: DatabaseOptions,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    pub fn new(options: DatabaseOptions) -> Self {
        Self {
            options,
            db: OnceCell::new(),
        }
    }

    pub fn from_config(config: &FolioConfig) -> Self {
        Self::new(DatabaseOptions::from_config(config))
    }

    pub fn options(&self) -> &DatabaseOptions {
        &self.options
    }

    fn db(&self) -> Result<&Database, FolioError> {
        self.db.get().ok_or_else(|| FolioError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), FolioError> {
        let db = Database::open_with(&self.options).await?;
        self.db.set(db).map_err(|_| FolioError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.options.path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), FolioError> {
        self.db()?.checkpoint().await
    }

    async fn insert_contact_message(&self, msg: &NewContactMessage) -> Result<i64, FolioError> {
        queries::contacts::insert_contact_message(self.db()?, msg).await
    }

    async fn list_contact_messages(&self, limit: i64) -> Result<Vec<ContactMessage>, FolioError> {
        queries::contacts::list_contact_messages(self.db()?, limit).await
    }

    async fn count_contact_messages(&self) -> Result<i64, FolioError> {
        queries::contacts::count_contact_messages(self.db()?).await
    }

    async fn insert_inbound_email(&self, email: &NewInboundEmail) -> Result<i64, FolioError> {
        queries::inbound::insert_inbound_email(self.db()?, email).await
    }

    async fn list_inbound_emails(&self, limit: i64) -> Result<Vec<InboundEmail>, FolioError> {
        queries::inbound::list_inbound_emails(self.db()?, limit).await
    }

    async fn count_inbound_emails(&self) -> Result<i64, FolioError> {
        queries::inbound::count_inbound_emails(self.db()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn storage_at(dir: &tempfile::TempDir, name: &str) -> SqliteStorage {
        let path = dir.path().join(name);
        SqliteStorage::new(DatabaseOptions::new(path.to_str().unwrap()))
    }

    #[tokio::test]
    async fn sqlite_storage_implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let storage = storage_at(&dir, "test.db");

        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.version(), semver::Version::new(0, 1, 0));
        assert_eq!(storage.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let storage = storage_at(&dir, "init_test.db");

        storage.initialize().await.unwrap();
        assert!(dir.path().join("init_test.db").exists());
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let storage = storage_at(&dir, "double_init.db");

        storage.initialize().await.unwrap();
        assert!(storage.initialize().await.is_err());
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempdir().unwrap();
        let storage = storage_at(&dir, "no_init.db");

        assert!(storage.health_check().await.is_err());
        assert!(storage.count_contact_messages().await.is_err());
        assert!(storage.close().await.is_err());
        // Shutdown of a never-opened store is a no-op.
        storage.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let storage = storage_at(&dir, "health.db");

        storage.initialize().await.unwrap();
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn contact_and_inbound_round_trip_through_adapter() {
        let dir = tempdir().unwrap();
        let storage = storage_at(&dir, "lifecycle.db");
        storage.initialize().await.unwrap();

        let msg = NewContactMessage {
            name: "Test User".into(),
            email: "test@example.com".into(),
            subject: "Test Subject".into(),
            message: "Test message content".into(),
        };
        let id = storage.insert_contact_message(&msg).await.unwrap();
        let listed = storage.list_contact_messages(50).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].to_string(), format!("<ContactMessage {id}: Test Subject>"));

        let email = NewInboundEmail {
            from_email: "sender@example.com".into(),
            to_email: "inbox@example.com".into(),
            subject: "Hello".into(),
            text_content: Some("Body".into()),
            html_content: Some("<p>Body</p>".into()),
        };
        storage.insert_inbound_email(&email).await.unwrap();
        assert_eq!(storage.count_inbound_emails().await.unwrap(), 1);
        assert_eq!(storage.count_contact_messages().await.unwrap(), 1);

        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn data_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let storage = storage_at(&dir, "persist.db");
            storage.initialize().await.unwrap();
            let msg = NewContactMessage {
                name: "A".into(),
                email: "a@example.com".into(),
                subject: "Kept".into(),
                message: "m".into(),
            };
            storage.insert_contact_message(&msg).await.unwrap();
            storage.shutdown().await.unwrap();
        }

        let storage = storage_at(&dir, "persist.db");
        storage.initialize().await.unwrap();
        let listed = storage.list_contact_messages(10).await.unwrap();
        assert_eq!(listed[0].subject, "Kept");
    }

    #[tokio::test]
    async fn in_memory_storage_from_testing_config() {
        let mut config = FolioConfig::default();
        config.site.environment = folio_config::Environment::Testing;
        let storage = SqliteStorage::from_config(&config);
        assert_eq!(storage.options().path, crate::MEMORY_PATH);

        storage.initialize().await.unwrap();
        assert_eq!(storage.count_inbound_emails().await.unwrap(), 0);
    }
}
