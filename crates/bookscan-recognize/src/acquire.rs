// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Acquisition coordinator — runs one attempt from image to classified result.
//
//   Barcode: decode ─┬─ Decoded ──────────────────────────────► Success
//                    └─ NotFound/Corrupted/Unsupported/Load ──► Failed
//
//   OCR:     recognize ─┬─ error ──────────────────────────────► Failed(RecognitionFailed)
//                       └─ text ─ extract ─┬─ none ────────────► Failed(NoCandidate)
//                                          └─ candidate ─ validate ─► Success / Failed(InvalidFormat)
//
// The coordinator holds no per-attempt state and never retries; a retry is a
// new capture by the user.

use bookscan_core::{
    AttemptId, ErrorKind, Isbn, RawImage, ReadingMode, RecognitionOutput, ValidationResult,
};
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::barcode::reader::{BarcodeDecoder, BarcodeOutcome};
use crate::isbn::{extract_candidate, normalize_and_validate};
use crate::ocr::TextRecognizer;

/// Everything one acquisition attempt produced.
#[derive(Debug, Clone, Serialize)]
pub struct Acquisition {
    pub attempt: AttemptId,
    pub mode: ReadingMode,
    pub result: ValidationResult,
    /// Recognizer output (text path only, when recognition succeeded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognition: Option<RecognitionOutput>,
    /// The labelled run handed to the validator (text path only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
}

impl Acquisition {
    pub fn isbn(&self) -> Option<&Isbn> {
        self.result.isbn()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.result.error_kind()
    }
}

/// Dispatches an image to the adapter for its reading mode and classifies the
/// outcome.
pub struct AcquisitionCoordinator {
    barcode: Box<dyn BarcodeDecoder>,
    recognizer: Box<dyn TextRecognizer>,
}

impl AcquisitionCoordinator {
    pub fn new(barcode: Box<dyn BarcodeDecoder>, recognizer: Box<dyn TextRecognizer>) -> Self {
        Self {
            barcode,
            recognizer,
        }
    }

    /// Run one acquisition attempt.
    ///
    /// Blocks until the adapter finishes. Independent calls share nothing, so
    /// overlapping attempts may run on separate threads.
    pub fn acquire(&self, image: &RawImage, mode: ReadingMode) -> Acquisition {
        let attempt = AttemptId::new();
        let span = info_span!("acquire", %attempt, %mode, len = image.len());
        let _guard = span.enter();
        info!("Acquisition attempt started");

        let acquisition = match mode {
            ReadingMode::Barcode => Acquisition {
                attempt,
                mode,
                result: self.via_barcode(image),
                recognition: None,
                candidate: None,
            },
            ReadingMode::Ocr => {
                let (result, recognition, candidate) = self.via_text(image);
                Acquisition {
                    attempt,
                    mode,
                    result,
                    recognition,
                    candidate,
                }
            }
        };

        match (acquisition.isbn(), acquisition.error_kind()) {
            (Some(isbn), _) => {
                if !isbn.check_digit_valid() {
                    warn!(isbn = %isbn, "Accepted ISBN has a check digit that does not verify");
                }
                info!(isbn = %isbn, "Acquisition succeeded");
            }
            (None, kind) => {
                warn!(
                    kind = ?kind,
                    detail = acquisition.result.detail().unwrap_or_default(),
                    "Acquisition failed"
                );
            }
        }
        acquisition
    }

    fn via_barcode(&self, image: &RawImage) -> ValidationResult {
        match self.barcode.decode(image) {
            BarcodeOutcome::Decoded(text) => match Isbn::from_normalized(text.clone()) {
                Some(isbn) => ValidationResult::success(isbn),
                None => ValidationResult::failure_with(ErrorKind::InvalidFormat, text),
            },
            BarcodeOutcome::NotFound => ValidationResult::failure(ErrorKind::NotFound),
            BarcodeOutcome::Corrupted => ValidationResult::failure(ErrorKind::Corrupted),
            BarcodeOutcome::UnsupportedFormat(symbology) => {
                ValidationResult::failure_with(ErrorKind::UnsupportedFormat, symbology)
            }
            BarcodeOutcome::ImageLoadFailed(message) => {
                ValidationResult::failure_with(ErrorKind::ImageLoadFailed, message)
            }
        }
    }

    fn via_text(
        &self,
        image: &RawImage,
    ) -> (ValidationResult, Option<RecognitionOutput>, Option<String>) {
        let output = match self.recognizer.recognize(image) {
            Ok(output) => output,
            Err(err) => {
                let message = match err {
                    bookscan_core::BookscanError::RecognitionFailed(message) => message,
                    other => other.to_string(),
                };
                return (
                    ValidationResult::failure_with(ErrorKind::RecognitionFailed, message),
                    None,
                    None,
                );
            }
        };
        info!(
            engine = self.recognizer.name(),
            confidence = output.confidence,
            "Text recognised"
        );

        let Some(candidate) = extract_candidate(&output.text) else {
            return (
                ValidationResult::failure(ErrorKind::NoCandidate),
                Some(output),
                None,
            );
        };

        let result = normalize_and_validate(candidate.as_str());
        (result, Some(output), Some(candidate.into_string()))
    }
}
