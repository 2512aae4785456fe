// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barcode path — EAN-13 decoding of back-cover barcodes.

pub mod ean13;
pub mod reader;

pub use reader::{BarcodeDecoder, BarcodeOutcome, Ean13Reader};

/// Whether a decoded 13-digit symbol is a book identifier (978/979 "Bookland").
pub fn is_isbn_symbol(text: &str) -> bool {
    text.len() == 13
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text.starts_with("978") || text.starts_with("979"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookland_prefixes() {
        assert!(is_isbn_symbol("9780306406157"));
        assert!(is_isbn_symbol("9791090636071"));
        assert!(!is_isbn_symbol("4901234567894"));
        assert!(!is_isbn_symbol("978030640615"));
    }
}
