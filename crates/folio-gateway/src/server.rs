// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use folio_agent::CareerResponder;
use folio_config::FolioConfig;
use folio_core::{FolioError, NotifierAdapter, StorageAdapter};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::admin;
use crate::auth::{AdminAuth, admin_auth};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub responder: Arc<CareerResponder>,
    pub storage: Arc<dyn StorageAdapter + Send + Sync>,
    pub notifier: Arc<dyn NotifierAdapter + Send + Sync>,
    pub auth: AdminAuth,
    /// Reported as `website` by `/api/status`.
    pub site_name: String,
    pub max_message_chars: usize,
}

impl GatewayState {
    pub fn new(
        config: &FolioConfig,
        responder: Arc<CareerResponder>,
        storage: Arc<dyn StorageAdapter + Send + Sync>,
        notifier: Arc<dyn NotifierAdapter + Send + Sync>,
    ) -> Self {
        Self {
            responder,
            storage,
            notifier,
            auth: AdminAuth::from_config(&config.admin, config.site.environment),
            site_name: config.site.name.clone(),
            max_message_chars: config.agent.max_message_chars,
        }
    }
}

/// Listener settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Static assets served for unmatched routes.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            static_dir: config.site.static_dir.as_ref().map(PathBuf::from),
        }
    }
}

/// Builds the application router.
///
/// - GET /health, GET /api/status
/// - POST /api/chat, POST /api/chat/reset
/// - POST /api/contact
/// - POST /webhook/sendgrid
/// - GET /admin/api/{messages,emails,stats} (Basic auth)
/// - everything else: static files, when a directory is configured
pub fn build_router(state: GatewayState, static_dir: Option<PathBuf>) -> Router {
    let admin_routes = Router::new()
        .route("/admin/api/messages", get(admin::list_messages))
        .route("/admin/api/emails", get(admin::list_emails))
        .route("/admin/api/stats", get(admin::stats))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            admin_auth,
        ));

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/status", get(handlers::status))
        .route("/api/chat", post(handlers::chat))
        .route("/api/chat/reset", post(handlers::reset_chat))
        .route("/api/contact", post(handlers::contact))
        .route("/webhook/sendgrid", post(handlers::sendgrid_webhook))
        .merge(admin_routes)
        .with_state(state);

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serves `app` on the configured address until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), FolioError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FolioError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("HTTP server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| FolioError::Internal(format!("HTTP server error: {e}")))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
