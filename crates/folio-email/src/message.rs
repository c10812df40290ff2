// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SendGrid v3 `mail/send` payload and the contact notification body.

use folio_core::ContactNotice;
use serde::Serialize;

/// Request body for `POST /v3/mail/send`.
#[derive(Debug, Clone, Serialize)]
pub struct MailSend {
    pub personalizations: Vec<Personalization>,
    pub from: Address,
    pub subject: String,
    pub content: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Personalization {
    pub to: Vec<Address>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub mime_type: String,
    pub value: String,
}

/// Subject line of the owner notification. Mail headers are not HTML, so the
/// visitor's subject is used as typed.
pub fn notification_subject(notice: &ContactNotice) -> String {
    format!("New Contact Form Message: {}", notice.subject)
}

/// HTML body of the owner notification. Every visitor-supplied field is escaped.
pub fn notification_html(notice: &ContactNotice) -> String {
    let name = html_escape::encode_text(&notice.name);
    let email_text = html_escape::encode_text(&notice.email);
    let email_attr = html_escape::encode_double_quoted_attribute(&notice.email);
    let subject = html_escape::encode_text(&notice.subject);
    let message = html_escape::encode_text(&notice.message);

    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
      <h2 style="color: #5e35b1; border-bottom: 2px solid #f48fb1; padding-bottom: 10px;">New Contact Form Submission</h2>
      <div style="background: #f8f9fa; padding: 15px; border-radius: 5px; margin: 20px 0;">
        <p><strong>From:</strong> {name}</p>
        <p><strong>Email:</strong> <a href="mailto:{email_attr}">{email_text}</a></p>
        <p><strong>Subject:</strong> {subject}</p>
      </div>
      <div style="background: white; padding: 20px; border-left: 4px solid #f48fb1; margin: 20px 0;">
        <h3 style="color: #5e35b1; margin-top: 0;">Message:</h3>
        <p style="white-space: pre-wrap;">{message}</p>
      </div>
      <p style="color: #666; font-size: 0.9em;">Sent from the website contact form.</p>
    </div>
  </body>
</html>
"#
    )
}

impl MailSend {
    /// A single-recipient HTML message.
    pub fn html(from: Address, to: &str, subject: String, html: String) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: to.to_string(),
                    name: None,
                }],
            }],
            from,
            subject,
            content: vec![Content {
                mime_type: "text/html".to_string(),
                value: html,
            }],
        }
    }
}
