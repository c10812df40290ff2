// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP surface of the Folio portfolio service.
//!
//! Serves the career chat (JSON and SSE), the contact form, the SendGrid
//! inbound-parse webhook, and a Basic-authenticated admin API over the
//! stored messages.

pub mod admin;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;
pub mod sse;

pub use auth::{AdminAuth, AdminCredential, hash_password};
pub use error::{ApiError, ErrorResponse};
pub use server::{GatewayState, ServerConfig, build_router, start_server};
