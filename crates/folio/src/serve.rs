// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `folio serve` command implementation.
//!
//! Opens SQLite storage, builds the OpenAI provider (when a key is
//! available), installs the career responder, wires the SendGrid notifier,
//! and serves the HTTP gateway until SIGINT or SIGTERM.

use std::sync::Arc;

use folio_agent::{CareerResponder, ResponderSettings, ResponderSlot};
use folio_config::FolioConfig;
use folio_core::types::HealthStatus;
use folio_core::{FolioError, NotifierAdapter, PluginAdapter, ProviderAdapter, StorageAdapter};
use folio_email::SendGridNotifier;
use folio_gateway::{GatewayState, ServerConfig, build_router, start_server};
use folio_openai::OpenAiProvider;
use folio_storage::SqliteStorage;
use tracing::{error, info, warn};

use crate::shutdown;

/// Runs the `folio serve` command.
pub async fn run_serve(config: FolioConfig) -> Result<(), FolioError> {
    init_tracing(&config.site.log_level);

    info!(
        environment = %config.site.environment,
        site = %config.site.name,
        "starting folio serve"
    );

    let storage = Arc::new(SqliteStorage::from_config(&config));
    storage.initialize().await?;

    let slot = ResponderSlot::new();
    slot.init(CareerResponder::new(
        build_provider(&config)?,
        ResponderSettings::from_config(&config),
    ));
    let responder = slot.get()?;

    let notifier: Arc<dyn NotifierAdapter + Send + Sync> =
        Arc::new(SendGridNotifier::from_config(&config.email)?);

    report_health(storage.as_ref()).await;
    report_health(notifier.as_ref()).await;

    let state = GatewayState::new(
        &config,
        responder,
        Arc::clone(&storage) as Arc<dyn StorageAdapter + Send + Sync>,
        Arc::clone(&notifier),
    );
    let server_config = ServerConfig::from_config(&config);
    let app = build_router(state, server_config.static_dir.clone());

    let cancel = shutdown::install_signal_handler();
    let served = start_server(&server_config, app, cancel).await;

    if let Err(e) = storage.shutdown().await {
        error!(error = %e, "failed to checkpoint database on shutdown");
    }
    notifier.shutdown().await?;

    served?;
    info!("folio serve shutdown complete");
    Ok(())
}

/// The upstream provider, or `None` (fallback mode) when no API key is set.
fn build_provider(
    config: &FolioConfig,
) -> Result<Option<Arc<dyn ProviderAdapter + Send + Sync>>, FolioError> {
    let Some(api_key) = folio_openai::resolve_api_key(&config.openai) else {
        warn!(
            "no OpenAI API key configured (openai.api_key or {}); chat answers come from keyword fallback",
            folio_openai::API_KEY_ENV
        );
        return Ok(None);
    };
    let provider = OpenAiProvider::new(api_key, &config.openai)?;
    Ok(Some(Arc::new(provider)))
}

/// Logs an adapter's startup health. Degraded adapters keep the server up.
async fn report_health<A: PluginAdapter + ?Sized>(adapter: &A) {
    match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => info!(
            adapter = adapter.name(),
            kind = %adapter.adapter_type(),
            version = %adapter.version(),
            "adapter ready"
        ),
        Ok(HealthStatus::Degraded(reason)) => {
            warn!(adapter = adapter.name(), reason = %reason, "adapter degraded")
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            error!(adapter = adapter.name(), reason = %reason, "adapter unhealthy")
        }
        Err(e) => error!(adapter = adapter.name(), error = %e, "adapter health check failed"),
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

fn default_filter(log_level: &str) -> String {
    format!("folio={log_level},warn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_scopes_level_to_folio() {
        assert_eq!(default_filter("debug"), "folio=debug,warn");
    }

    #[test]
    fn configured_key_builds_a_provider() {
        let mut config = FolioConfig::default();
        config.openai.api_key = Some("sk-test".into());
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.unwrap().name(), "openai");
    }
}
