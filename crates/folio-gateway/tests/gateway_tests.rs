// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use axum_extra::headers::{Authorization, HeaderMapExt};
use folio_agent::fallback::{DEFAULT_PARAGRAPH, PROJECTS};
use folio_core::StorageAdapter;
use folio_test_utils::{MockReply, RecordingNotifier, TEST_ADMIN_PASSWORD, TestHarness};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(harness: &TestHarness, request: Request<Body>) -> Response {
    harness.router().oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn admin_get(uri: &str, password: &str) -> Request<Body> {
    let mut request = Request::get(uri).body(Body::empty()).unwrap();
    request
        .headers_mut()
        .typed_insert(Authorization::basic("admin", password));
    request
}

fn contact_body() -> Value {
    json!({
        "name": "Test User",
        "email": "test@example.com",
        "subject": "Test Subject",
        "message": "Test message content",
    })
}

// --- Health and status ---

#[tokio::test]
async fn health_reports_healthy() {
    let harness = TestHarness::builder().build().await.unwrap();
    let response = send(&harness, Request::get("/health").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn status_reports_agent_mode() {
    let llm = TestHarness::builder().build().await.unwrap();
    let json = body_json(send(&llm, Request::get("/api/status").body(Body::empty()).unwrap()).await).await;
    assert_eq!(json["status"], "operational");
    assert_eq!(json["sendgrid_webhook"], "active");
    assert_eq!(json["agent_mode"], "llm");
    assert_eq!(json["website"], llm.config.site.name.as_str());

    let fallback = TestHarness::builder().without_provider().build().await.unwrap();
    let json = body_json(
        send(&fallback, Request::get("/api/status").body(Body::empty()).unwrap()).await,
    )
    .await;
    assert_eq!(json["agent_mode"], "fallback");
}

// --- Chat ---

#[tokio::test]
async fn chat_returns_provider_answer() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["I work on applied ML.".into()])
        .build()
        .await
        .unwrap();

    let response = send(&harness, post_json("/api/chat", json!({"message": "What do you do?"}))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["response"], "I work on applied ML.");
    assert_eq!(harness.responder.history_len().await, 2);
}

#[tokio::test]
async fn chat_rejects_blank_and_oversized_messages() {
    let harness = TestHarness::builder().build().await.unwrap();

    let response = send(&harness, post_json("/api/chat", json!({"message": "   "}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "message is required");

    let response = send(&harness, post_json("/api/chat", json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let long = "a".repeat(harness.config.agent.max_message_chars + 1);
    let response = send(&harness, post_json("/api/chat", json!({"message": long}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(harness.mock_provider.call_count().await, 0);
    assert_eq!(harness.responder.history_len().await, 0);
}

#[tokio::test]
async fn chat_falls_back_when_upstream_fails() {
    let harness = TestHarness::builder()
        .with_mock_replies(vec![MockReply::Fail("quota exceeded".into())])
        .build()
        .await
        .unwrap();

    let response = send(
        &harness,
        post_json("/api/chat", json!({"message": "Tell me about your projects"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["response"], PROJECTS.paragraph);
    assert_eq!(harness.responder.history_len().await, 1);
}

#[tokio::test]
async fn chat_without_provider_uses_keyword_answers() {
    let harness = TestHarness::builder().without_provider().build().await.unwrap();

    let response = send(&harness, post_json("/api/chat", json!({"message": "hi there"}))).await;
    assert_eq!(body_json(response).await["response"], DEFAULT_PARAGRAPH);
    assert_eq!(harness.responder.history_len().await, 0);
}

#[tokio::test]
async fn chat_streams_sse_when_requested() {
    let harness = TestHarness::builder()
        .with_mock_replies(vec![MockReply::Chunks(vec!["Hello".into(), " world".into()])])
        .build()
        .await
        .unwrap();

    let request = Request::post("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "text/event-stream")
        .body(Body::from(json!({"message": "Say hello"}).to_string()))
        .unwrap();
    let response = send(&harness, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );

    let body = body_text(response).await;
    assert_eq!(body.matches("event: text_delta").count(), 2);
    assert!(body.contains(r#"data: {"text":"Hello"}"#), "got: {body}");
    assert!(body.contains("event: message_stop"));
    assert!(body.contains(r#"data: {"content":"Hello world"}"#), "got: {body}");

    let history = harness.responder.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].content, "Hello world");
}

#[tokio::test]
async fn chat_reset_clears_history() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["one".into()])
        .build()
        .await
        .unwrap();
    harness.send_message("first").await;
    assert_eq!(harness.responder.history_len().await, 2);

    let response = send(&harness, post_json("/api/chat/reset", json!({}))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "reset");
    assert_eq!(harness.responder.history_len().await, 0);
}

#[tokio::test]
async fn chat_reset_flag_starts_a_new_conversation() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["one".into(), "two".into()])
        .build()
        .await
        .unwrap();
    harness.send_message("first").await;

    send(&harness, post_json("/api/chat", json!({"message": "again", "reset": true}))).await;
    let history = harness.responder.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "again");
}

// --- Contact ---

#[tokio::test]
async fn contact_stores_and_notifies() {
    let harness = TestHarness::builder().build().await.unwrap();

    let response = send(&harness, post_json("/api/contact", contact_body())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert!(json["id"].as_i64().unwrap() > 0);

    let stored = harness.storage.list_contact_messages(10).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].subject, "Test Subject");

    let notices = harness.notifier.notices().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].email, "test@example.com");
}

#[tokio::test]
async fn contact_succeeds_when_notification_fails() {
    let harness = TestHarness::builder()
        .with_notifier(RecordingNotifier::failing("SendGrid returned 500"))
        .build()
        .await
        .unwrap();

    let response = send(&harness, post_json("/api/contact", contact_body())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(harness.storage.count_contact_messages().await.unwrap(), 1);
}

#[tokio::test]
async fn invalid_contact_is_rejected_and_not_stored() {
    let harness = TestHarness::builder().build().await.unwrap();

    let mut body = contact_body();
    body["email"] = json!("not-an-address");
    let response = send(&harness, post_json("/api/contact", body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("email"));

    assert_eq!(harness.storage.count_contact_messages().await.unwrap(), 0);
    assert!(harness.notifier.notices().await.is_empty());
}

// --- SendGrid webhook ---

#[tokio::test]
async fn webhook_accepts_urlencoded_form() {
    let harness = TestHarness::builder().build().await.unwrap();

    let request = Request::post("/webhook/sendgrid")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "from=alice%40example.com&to=inbox%40example.com&subject=Hello&text=Hi+there",
        ))
        .unwrap();
    let response = send(&harness, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Email received and logged");
    assert_eq!(json["from"], "alice@example.com");
    assert_eq!(json["subject"], "Hello");

    let stored = harness.storage.list_inbound_emails(10).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].to_email, "inbox@example.com");
    assert_eq!(stored[0].text_content.as_deref(), Some("Hi there"));
}

#[tokio::test]
async fn webhook_defaults_missing_fields() {
    let harness = TestHarness::builder().build().await.unwrap();

    let request = Request::post("/webhook/sendgrid")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::empty())
        .unwrap();
    let json = body_json(send(&harness, request).await).await;
    assert_eq!(json["from"], "Unknown");
    assert_eq!(json["subject"], "No Subject");
}

#[tokio::test]
async fn webhook_accepts_multipart_form() {
    let harness = TestHarness::builder().build().await.unwrap();

    let boundary = "folio-test-boundary";
    let part = |name: &str, value: &str| {
        format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
    };
    let body = [
        part("from", "Bob <bob@example.com>"),
        part("to", "inbox@example.com"),
        part("subject", "Multipart"),
        part("html", "<p>Hi</p>"),
        format!("--{boundary}--\r\n"),
    ]
    .concat();

    let request = Request::post("/webhook/sendgrid")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = send(&harness, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = harness.storage.list_inbound_emails(1).await.unwrap();
    assert_eq!(stored[0].from_email, "Bob <bob@example.com>");
    assert_eq!(stored[0].html_content.as_deref(), Some("<p>Hi</p>"));
    assert!(stored[0].text_content.is_none());
}

// --- Admin API ---

#[tokio::test]
async fn admin_requires_credentials() {
    let harness = TestHarness::builder().build().await.unwrap();

    let response = send(
        &harness,
        Request::get("/admin/api/messages").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Authentication required");

    let response = send(&harness, admin_get("/admin/api/stats", "wrongpass")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid credentials");
}

#[tokio::test]
async fn admin_lists_messages_newest_first() {
    let harness = TestHarness::builder().build().await.unwrap();
    for subject in ["first", "second"] {
        let mut body = contact_body();
        body["subject"] = json!(subject);
        send(&harness, post_json("/api/contact", body)).await;
    }

    let response = send(&harness, admin_get("/admin/api/messages", TEST_ADMIN_PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["messages"][0]["subject"], "second");
    assert_eq!(json["messages"][1]["message"], "Test message content");

    let response = send(
        &harness,
        admin_get("/admin/api/messages?limit=1", TEST_ADMIN_PASSWORD),
    )
    .await;
    assert_eq!(body_json(response).await["count"], 1);
}

#[tokio::test]
async fn admin_email_list_shows_previews() {
    let harness = TestHarness::builder().build().await.unwrap();
    let long_text = "x".repeat(500);
    let request = Request::post("/webhook/sendgrid")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("subject=Long&text={long_text}&html=%3Cp%3Ex%3C%2Fp%3E")))
        .unwrap();
    send(&harness, request).await;

    let json = body_json(send(&harness, admin_get("/admin/api/emails", TEST_ADMIN_PASSWORD)).await).await;
    let email = &json["emails"][0];
    assert_eq!(email["subject"], "Long");
    assert_eq!(email["text_content"].as_str().unwrap().len(), 200);
    assert!(email.get("html_content").is_none());
}

#[tokio::test]
async fn admin_stats_count_both_tables() {
    let harness = TestHarness::builder().build().await.unwrap();
    send(&harness, post_json("/api/contact", contact_body())).await;
    let request = Request::post("/webhook/sendgrid")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("subject=Hi"))
        .unwrap();
    send(&harness, request).await;

    let json = body_json(send(&harness, admin_get("/admin/api/stats", TEST_ADMIN_PASSWORD)).await).await;
    assert_eq!(json["contact_messages"], 1);
    assert_eq!(json["inbound_emails"], 1);
}

// --- Static files ---

#[tokio::test]
async fn unmatched_routes_serve_static_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Portfolio</h1>").unwrap();
    let harness = TestHarness::builder()
        .with_static_dir(dir.path())
        .build()
        .await
        .unwrap();

    let response = send(&harness, Request::get("/index.html").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<h1>Portfolio</h1>");

    let response = send(&harness, Request::get("/missing.css").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_is_404_without_static_dir() {
    let harness = TestHarness::builder().build().await.unwrap();
    let response = send(&harness, Request::get("/nope").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
