// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bookscan-bridge — Host capabilities the pipeline is handed rather than owns.
//
// Camera capture, image picking, clipboard, share sheet and URL opening are
// provided by the host. The acquisition pipeline itself never touches them;
// the app wires a bridge in and feeds its output to the coordinator, after
// `accepts_image` has checked the declared type.

pub mod traits;
pub mod stub;

pub use traits::{
    NativeCamera, NativeClipboard, NativeFilePicker, NativeShare, NativeUrlOpener, PlatformBridge,
    accepts_image, picker_mime_types,
};

/// The bridge implementation for the current host.
///
/// Command-line and CI builds have no camera or share sheet, so they get the
/// stub, which reports `PlatformUnavailable` for every capability.
pub fn platform_bridge() -> Box<dyn PlatformBridge> {
    Box::new(stub::StubBridge)
}
