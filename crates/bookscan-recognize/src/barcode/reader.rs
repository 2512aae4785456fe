// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barcode decode adapter — loads a RawImage, runs the EAN-13 scanner, and
// keeps only book identifiers.

use bookscan_core::RawImage;
use bookscan_core::config::BarcodeSettings;
use image::{DynamicImage, imageops};
use tracing::{debug, info, instrument, warn};

use super::ean13::{SymbolScan, scan_image};

/// Outcome of one barcode decode attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarcodeOutcome {
    /// A 13-digit ISBN (978/979 prefix, check digit verified).
    Decoded(String),
    /// No symbol, or a valid EAN-13 that is not a book identifier.
    NotFound,
    /// A symbol was located but its check digit did not match.
    Corrupted,
    /// A symbol of another symbology; carries its name.
    UnsupportedFormat(String),
    /// The bytes could not be decoded as a bitmap; carries the decoder message.
    ImageLoadFailed(String),
}

/// Anything that can turn an image into a barcode outcome.
///
/// Implementations must classify every failure into an outcome rather than
/// panicking or returning library errors.
pub trait BarcodeDecoder: Send + Sync {
    fn decode(&self, image: &RawImage) -> BarcodeOutcome;
}

/// EAN-13 reader backed by the in-crate scanline decoder.
#[derive(Debug, Clone, Default)]
pub struct Ean13Reader {
    settings: BarcodeSettings,
}

impl Ean13Reader {
    pub fn new(settings: BarcodeSettings) -> Self {
        Self { settings }
    }

    /// Decode an already-loaded bitmap.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn decode_bitmap(&self, image: &DynamicImage) -> BarcodeOutcome {
        let gray = image.to_luma8();
        let mut scan = scan_image(&gray, self.settings.scan_lines);

        if !scan.is_decoded() && self.settings.try_rotated {
            debug!("No ISBN symbol upright, rescanning rotated 90°");
            let rotated = imageops::rotate90(&gray);
            scan = scan.prefer(scan_image(&rotated, self.settings.scan_lines));
        }

        match scan {
            SymbolScan::Isbn(text) => {
                info!(isbn = %text, "ISBN barcode decoded");
                BarcodeOutcome::Decoded(text)
            }
            SymbolScan::NonBook(text) => {
                info!(code = %text, "EAN-13 decoded but it is not a book identifier");
                BarcodeOutcome::NotFound
            }
            SymbolScan::ChecksumMismatch(text) => {
                warn!(code = %text, "Barcode check digit mismatch");
                BarcodeOutcome::Corrupted
            }
            SymbolScan::OtherSymbology(name) => {
                warn!(symbology = name, "Unsupported barcode symbology");
                BarcodeOutcome::UnsupportedFormat(name.to_string())
            }
            SymbolScan::NotFound => {
                debug!("No barcode found");
                BarcodeOutcome::NotFound
            }
        }
    }
}

impl BarcodeDecoder for Ean13Reader {
    #[instrument(skip_all, fields(len = image.len(), mime = image.mime_type()))]
    fn decode(&self, image: &RawImage) -> BarcodeOutcome {
        let bitmap = match image::load_from_memory(image.bytes()) {
            Ok(bitmap) => bitmap,
            Err(err) => {
                warn!(error = %err, "Image could not be decoded for barcode scanning");
                return BarcodeOutcome::ImageLoadFailed(err.to_string());
            }
        };
        self.decode_bitmap(&bitmap)
    }
}
