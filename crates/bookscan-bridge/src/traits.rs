// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for host capabilities.

use bookscan_core::error::Result;
use bookscan_core::{ImageMime, RawImage};

/// Unified bridge that groups all host capabilities.
pub trait PlatformBridge:
    NativeCamera + NativeFilePicker + NativeClipboard + NativeShare + NativeUrlOpener + Send + Sync
{
    /// Human-readable platform name (e.g. "iOS 17", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// Capture a photo with the device camera.
pub trait NativeCamera {
    /// Launch the camera and return the captured JPEG.
    /// Returns Ok(None) if the user cancelled.
    fn capture_image(&self) -> Result<Option<RawImage>>;
}

/// Pick an existing image from device storage.
///
/// Graphical hosts call this. The `bookscan` binary takes a path instead.
pub trait NativeFilePicker {
    /// Show a picker filtered to [`ImageMime::ALL`].
    /// Returns Ok(None) if the user cancelled.
    fn pick_image(&self) -> Result<Option<RawImage>>;
}

pub trait NativeClipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Share text via the OS share sheet.
pub trait NativeShare {
    fn share_text(&self, text: &str) -> Result<()>;
}

/// Open a URL in the browser or the app registered for it.
pub trait NativeUrlOpener {
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Whether a picked file's declared type is one the picker offers.
pub fn accepts_image(image: &RawImage) -> bool {
    image.image_mime().is_some()
}

/// MIME strings handed to native pickers.
pub fn picker_mime_types() -> Vec<&'static str> {
    ImageMime::ALL.iter().map(|m| m.mime_type()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_offers_the_four_image_types() {
        assert_eq!(
            picker_mime_types(),
            vec!["image/jpeg", "image/png", "image/heic", "image/webp"]
        );
    }

    #[test]
    fn gif_is_not_accepted() {
        assert!(accepts_image(&RawImage::new(vec![1], "image/png")));
        assert!(!accepts_image(&RawImage::new(vec![1], "image/gif")));
    }
}
