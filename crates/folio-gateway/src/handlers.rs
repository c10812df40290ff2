// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public HTTP handlers: health, status, chat, contact, and the inbound-email webhook.

use std::collections::HashMap;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    Form, Json,
};
use folio_core::{ContactNotice, NewContactMessage, NewInboundEmail, NotifyOutcome};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::server::GatewayState;
use crate::sse;

/// Stored sender/recipient length for inbound emails.
const INBOUND_ADDRESS_CHARS: usize = 200;
const INBOUND_SUBJECT_CHARS: usize = 500;

const CONTACT_NAME_CHARS: usize = 100;
const CONTACT_EMAIL_CHARS: usize = 120;
const CONTACT_SUBJECT_CHARS: usize = 200;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub website: String,
    pub status: String,
    pub sendgrid_webhook: String,
    /// `llm` or `fallback`.
    pub agent_mode: String,
}

/// Request body for POST /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Clear the conversation before this turn.
    #[serde(default)]
    pub reset: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Request body for POST /api/contact.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub status: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: String,
    pub message: String,
    pub from: String,
    pub subject: String,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /api/status
pub async fn status(State(state): State<GatewayState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        website: state.site_name.clone(),
        status: "operational".to_string(),
        sendgrid_webhook: "active".to_string(),
        agent_mode: state.responder.mode().to_string(),
    })
}

/// POST /api/chat
///
/// Answers with `{"response": ...}`, or with an SSE stream when the client
/// sends `Accept: text/event-stream`.
pub async fn chat(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<ChatRequest>,
) -> Result<Response, ApiError> {
    let message = validate_chat_message(&body.message, state.max_message_chars)?;

    let accept = headers
        .get("accept")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if accept.contains("text/event-stream") {
        return Ok(sse::stream_chat(&state.responder, message, body.reset).into_response());
    }

    let response = state.responder.respond(&message, body.reset).await;
    Ok(Json(ChatResponse { response }).into_response())
}

/// Trimmed visitor message, or a 400 if it is empty or too long.
pub fn validate_chat_message(raw: &str, max_chars: usize) -> Result<String, ApiError> {
    let message = raw.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request("message is required"));
    }
    if message.chars().count() > max_chars {
        return Err(ApiError::bad_request(format!(
            "message must be at most {max_chars} characters"
        )));
    }
    Ok(message.to_string())
}

/// POST /api/chat/reset
pub async fn reset_chat(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    state.responder.reset().await;
    Json(serde_json::json!({ "status": "reset" }))
}

/// POST /api/contact
///
/// Stores the submission, then notifies the owner. Notification failures are
/// logged and do not affect the response.
pub async fn contact(
    State(state): State<GatewayState>,
    Json(body): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let submission = validate_contact(body)?;
    let id = state.storage.insert_contact_message(&submission).await?;
    info!(id, subject = %submission.subject, "contact message stored");

    match state
        .notifier
        .notify_contact(&ContactNotice::from(&submission))
        .await
    {
        Ok(NotifyOutcome::Sent) => info!(id, "contact notification sent"),
        Ok(NotifyOutcome::Skipped) => warn!(id, "contact notification skipped"),
        Err(e) => error!(id, error = %e, "failed to send contact notification"),
    }

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            status: "success".to_string(),
            id,
        }),
    ))
}

fn validate_contact(body: ContactRequest) -> Result<NewContactMessage, ApiError> {
    fn field(value: String, name: &str, max: Option<usize>) -> Result<String, ApiError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ApiError::bad_request(format!("{name} is required")));
        }
        if let Some(max) = max
            && value.chars().count() > max
        {
            return Err(ApiError::bad_request(format!(
                "{name} must be at most {max} characters"
            )));
        }
        Ok(value)
    }

    let email = field(body.email, "email", Some(CONTACT_EMAIL_CHARS))?;
    if !email.contains('@') {
        return Err(ApiError::bad_request("email must be a valid email address"));
    }

    Ok(NewContactMessage {
        name: field(body.name, "name", Some(CONTACT_NAME_CHARS))?,
        email,
        subject: field(body.subject, "subject", Some(CONTACT_SUBJECT_CHARS))?,
        message: field(body.message, "message", None)?,
    })
}

/// POST /webhook/sendgrid
///
/// Accepts SendGrid Inbound Parse posts, as multipart or URL-encoded forms.
pub async fn sendgrid_webhook(
    State(state): State<GatewayState>,
    request: Request,
) -> Result<Json<WebhookResponse>, ApiError> {
    let fields = read_form_fields(request).await?;
    let email = inbound_email_from_fields(&fields);

    info!(
        from = %email.from_email,
        to = %email.to_email,
        subject = %email.subject,
        preview = %email
            .text_content
            .as_deref()
            .map(folio_core::types::text_preview)
            .unwrap_or_else(|| "No text content".to_string()),
        "inbound email received"
    );

    state.storage.insert_inbound_email(&email).await?;

    Ok(Json(WebhookResponse {
        status: "success".to_string(),
        message: "Email received and logged".to_string(),
        from: email.from_email,
        subject: email.subject,
    }))
}

async fn read_form_fields(request: Request) -> Result<HashMap<String, String>, ApiError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if !is_multipart {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(request, &())
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid form body: {e}")))?;
        return Ok(fields);
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?;

    let mut fields = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart field: {e}")))?
    {
        // Attachments are not kept.
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid multipart field: {e}")))?;
        fields.insert(name, value);
    }
    Ok(fields)
}

/// Maps Inbound Parse fields to a storable email, applying defaults and column limits.
pub fn inbound_email_from_fields(fields: &HashMap<String, String>) -> NewInboundEmail {
    let text = |key: &str, default: &str, max: usize| -> String {
        let value = fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .unwrap_or(default);
        value.chars().take(max).collect()
    };
    let body = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();

    NewInboundEmail {
        from_email: text("from", "Unknown", INBOUND_ADDRESS_CHARS),
        to_email: text("to", "Unknown", INBOUND_ADDRESS_CHARS),
        subject: text("subject", "No Subject", INBOUND_SUBJECT_CHARS),
        text_content: body("text"),
        html_content: body("html"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_request(name: &str, email: &str, subject: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[test]
    fn chat_request_reset_defaults_to_false() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(!req.reset);
    }

    #[test]
    fn chat_message_is_trimmed() {
        assert_eq!(validate_chat_message("  hello \n", 10).unwrap(), "hello");
    }

    #[test]
    fn blank_chat_message_is_rejected() {
        let err = validate_chat_message("   ", 10).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn chat_limit_counts_characters() {
        assert!(validate_chat_message(&"é".repeat(4000), 4000).is_ok());
        let err = validate_chat_message(&"a".repeat(4001), 4000).unwrap_err();
        assert!(err.message.contains("4000"));
    }

    #[test]
    fn valid_contact_is_trimmed() {
        let msg = validate_contact(contact_request(
            " Test User ",
            "test@example.com",
            "Hi",
            "Hello there",
        ))
        .unwrap();
        assert_eq!(msg.name, "Test User");
    }

    #[test]
    fn contact_requires_every_field() {
        let err = validate_contact(contact_request("", "a@b.c", "s", "m")).unwrap_err();
        assert_eq!(err.message, "name is required");
        let err = validate_contact(contact_request("n", "a@b.c", "s", " ")).unwrap_err();
        assert_eq!(err.message, "message is required");
    }

    #[test]
    fn contact_rejects_bad_email_and_long_subject() {
        let err = validate_contact(contact_request("n", "nobody", "s", "m")).unwrap_err();
        assert!(err.message.contains("email"));
        let err =
            validate_contact(contact_request("n", "a@b.c", &"s".repeat(201), "m")).unwrap_err();
        assert!(err.message.contains("subject"));
    }

    #[test]
    fn inbound_defaults_apply_to_missing_fields() {
        let email = inbound_email_from_fields(&HashMap::new());
        assert_eq!(email.from_email, "Unknown");
        assert_eq!(email.to_email, "Unknown");
        assert_eq!(email.subject, "No Subject");
        assert!(email.text_content.is_none());
        assert!(email.html_content.is_none());
    }

    #[test]
    fn inbound_fields_are_cut_to_column_limits() {
        let fields = HashMap::from([
            ("from".to_string(), "f".repeat(300)),
            ("subject".to_string(), "s".repeat(600)),
            ("text".to_string(), "body".to_string()),
        ]);
        let email = inbound_email_from_fields(&fields);
        assert_eq!(email.from_email.len(), INBOUND_ADDRESS_CHARS);
        assert_eq!(email.subject.len(), INBOUND_SUBJECT_CHARS);
        assert_eq!(email.text_content.as_deref(), Some("body"));
    }
}
