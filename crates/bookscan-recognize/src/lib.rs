// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bookscan-recognize — Turns a photo of a book into a validated ISBN.
//
// Provides the two recognition strategies (EAN-13 barcode decoding and text
// recognition), the candidate extractor and validator for recognised text, and
// the coordinator that runs one acquisition attempt end to end.

pub mod acquire;
pub mod barcode;
pub mod isbn;
pub mod ocr;

// Re-export the primary entry points so callers can use `bookscan_recognize::Ean13Reader` etc.
pub use acquire::{Acquisition, AcquisitionCoordinator};
pub use barcode::reader::{BarcodeDecoder, BarcodeOutcome, Ean13Reader};
pub use isbn::extract::{Candidate, extract_candidate};
pub use isbn::validate::{normalize, normalize_and_validate};
pub use ocr::{TextRecognizer, UnavailableRecognizer};

#[cfg(feature = "ocr")]
pub use ocr::tesseract::TesseractRecognizer;
