// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod notifier;
pub mod provider;
pub mod storage;

pub use adapter::PluginAdapter;
pub use notifier::NotifierAdapter;
pub use provider::{ProviderAdapter, ProviderStream};
pub use storage::StorageAdapter;
