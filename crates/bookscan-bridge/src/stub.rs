// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for command-line and CI builds where host capabilities are
// unavailable. Every trait method returns `PlatformUnavailable`.

use bookscan_core::RawImage;
use bookscan_core::error::{BookscanError, Result};

use crate::traits::*;

/// No-op bridge returned on hosts without native capabilities.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeCamera for StubBridge {
    fn capture_image(&self) -> Result<Option<RawImage>> {
        tracing::warn!("NativeCamera::capture_image called on stub bridge");
        Err(BookscanError::PlatformUnavailable)
    }
}

impl NativeFilePicker for StubBridge {
    fn pick_image(&self) -> Result<Option<RawImage>> {
        tracing::warn!("NativeFilePicker::pick_image called on stub bridge");
        Err(BookscanError::PlatformUnavailable)
    }
}

impl NativeClipboard for StubBridge {
    fn write_text(&self, _text: &str) -> Result<()> {
        tracing::warn!("NativeClipboard::write_text called on stub bridge");
        Err(BookscanError::PlatformUnavailable)
    }
}

impl NativeShare for StubBridge {
    fn share_text(&self, _text: &str) -> Result<()> {
        tracing::warn!("NativeShare::share_text called on stub bridge");
        Err(BookscanError::PlatformUnavailable)
    }
}

impl NativeUrlOpener for StubBridge {
    fn open_url(&self, _url: &str) -> Result<()> {
        tracing::warn!("NativeUrlOpener::open_url called on stub bridge");
        Err(BookscanError::PlatformUnavailable)
    }
}
