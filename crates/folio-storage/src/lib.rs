// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Folio portfolio service.
//!
//! Provides WAL-mode SQLite storage with embedded migrations and a
//! single-connection concurrency model via `tokio-rusqlite` for contact form
//! submissions and inbound emails.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::{Database, DatabaseOptions, MEMORY_PATH};
