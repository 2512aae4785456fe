// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Optical recognizer adapter — text plus confidence from a RawImage.
//
// The Tesseract backend lives behind the `ocr` feature because it links
// against the system libtesseract/libleptonica:
//
// ```toml
// bookscan-recognize = { path = "crates/bookscan-recognize", features = ["ocr"] }
// ```

#[cfg(feature = "ocr")]
pub mod tesseract;

use bookscan_core::error::{BookscanError, Result};
use bookscan_core::{RawImage, RecognitionOutput};
use tracing::warn;

/// A text recognition engine.
///
/// No confidence threshold is applied here: low-confidence text is returned
/// as-is and judged only by whether an ISBN label can be found in it.
pub trait TextRecognizer: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &'static str;

    /// Recognise all text in the image.
    ///
    /// # Errors
    ///
    /// Only [`BookscanError::RecognitionFailed`], carrying the engine message.
    fn recognize(&self, image: &RawImage) -> Result<RecognitionOutput>;
}

/// Stand-in used when the binary was built without the `ocr` feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRecognizer;

impl TextRecognizer for UnavailableRecognizer {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn recognize(&self, _image: &RawImage) -> Result<RecognitionOutput> {
        warn!("Text recognition requested but no OCR engine is compiled in");
        Err(BookscanError::RecognitionFailed(
            "text recognition was not built into this binary (enable the `ocr` feature)".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_always_fails_with_recognition_failed() {
        let image = RawImage::new(vec![0xff, 0xd8], "image/jpeg");
        let err = UnavailableRecognizer.recognize(&image).unwrap_err();
        assert!(matches!(err, BookscanError::RecognitionFailed(_)));
    }
}
