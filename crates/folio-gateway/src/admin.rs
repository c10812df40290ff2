// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin API handlers. Routed behind [`crate::auth::admin_auth`].

use axum::{
    extract::{Query, State},
    Json,
};
use folio_core::{ContactMessageSummary, InboundEmailSummary};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::GatewayState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

/// `?limit=` for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

impl ListParams {
    fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<ContactMessageSummary>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct EmailsResponse {
    pub emails: Vec<InboundEmailSummary>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub contact_messages: i64,
    pub inbound_emails: i64,
}

/// GET /admin/api/messages
pub async fn list_messages(
    State(state): State<GatewayState>,
    Query(params): Query<ListParams>,
) -> Result<Json<MessagesResponse>, ApiError> {
    let messages: Vec<_> = state
        .storage
        .list_contact_messages(params.limit())
        .await?
        .iter()
        .map(|m| m.to_summary())
        .collect();
    Ok(Json(MessagesResponse {
        count: messages.len(),
        messages,
    }))
}

/// GET /admin/api/emails
pub async fn list_emails(
    State(state): State<GatewayState>,
    Query(params): Query<ListParams>,
) -> Result<Json<EmailsResponse>, ApiError> {
    let emails: Vec<_> = state
        .storage
        .list_inbound_emails(params.limit())
        .await?
        .iter()
        .map(|e| e.to_summary())
        .collect();
    Ok(Json(EmailsResponse {
        count: emails.len(),
        emails,
    }))
}

/// GET /admin/api/stats
pub async fn stats(State(state): State<GatewayState>) -> Result<Json<StatsResponse>, ApiError> {
    Ok(Json(StatsResponse {
        contact_messages: state.storage.count_contact_messages().await?,
        inbound_emails: state.storage.count_inbound_emails().await?,
    }))
}
