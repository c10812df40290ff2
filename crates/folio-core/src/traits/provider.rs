// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for hosted chat-completion APIs.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::error::FolioError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ProviderRequest, ProviderResponse, ProviderStreamChunk};

/// Boxed stream of provider chunks.
pub type ProviderStream =
    Pin<Box<dyn Stream<Item = Result<ProviderStreamChunk, FolioError>> + Send>>;

/// Adapter for chat-completion provider integrations.
///
/// Every failure mode of the upstream service (transport, auth, quota,
/// malformed body) is reported as [`FolioError::Provider`].
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, FolioError>;

    /// Sends a completion request and returns a stream of response chunks.
    async fn stream(&self, request: ProviderRequest) -> Result<ProviderStream, FolioError>;
}
