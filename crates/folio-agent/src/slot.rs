// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup-owned holder for the shared [`CareerResponder`].

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use folio_core::error::FolioError;
use tracing::{info, warn};

use crate::responder::CareerResponder;

/// Holds the responder between bootstrap and the request handlers.
///
/// Reading before [`ResponderSlot::init`] is a wiring bug and yields
/// [`FolioError::ResponderUninitialized`].
#[derive(Debug, Default)]
pub struct ResponderSlot {
    inner: ArcSwapOption<CareerResponder>,
}

impl ResponderSlot {
    pub fn new() -> Self {
        Self {
            inner: ArcSwapOption::empty(),
        }
    }

    /// Installs `responder` and returns the shared handle.
    ///
    /// A second call replaces the previous responder (and its history).
    pub fn init(&self, responder: CareerResponder) -> Arc<CareerResponder> {
        let responder = Arc::new(responder);
        if self.inner.swap(Some(Arc::clone(&responder))).is_some() {
            warn!("career responder re-initialized; previous history discarded");
        } else {
            info!(mode = %responder.mode(), "career responder installed");
        }
        responder
    }

    /// The installed responder.
    pub fn get(&self) -> Result<Arc<CareerResponder>, FolioError> {
        self.inner
            .load_full()
            .ok_or(FolioError::ResponderUninitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.load().is_some()
    }
}
