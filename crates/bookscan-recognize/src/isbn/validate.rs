// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ISBN normalization and structural validation.

use bookscan_core::{ErrorKind, Isbn, ValidationResult};
use tracing::debug;

/// Keep only ASCII digits and `X`/`x`, uppercased.
pub fn normalize(candidate: &str) -> String {
    candidate
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Normalize a candidate and accept it by shape.
///
/// - 13 characters: must start with `978` or `979`.
/// - 10 characters: accepted as-is.
/// - anything else: [`ErrorKind::InvalidFormat`].
///
/// Check digits are not verified.
pub fn normalize_and_validate(candidate: &str) -> ValidationResult {
    let normalized = normalize(candidate);
    debug!(normalized = %normalized, "Candidate normalized");

    match normalized.len() {
        13 if normalized.starts_with("978") || normalized.starts_with("979") => {}
        13 => {
            return ValidationResult::failure_with(
                ErrorKind::InvalidFormat,
                format!("ISBN-13 must start with 978 or 979, got {normalized}"),
            );
        }
        10 => {}
        len => {
            return ValidationResult::failure_with(
                ErrorKind::InvalidFormat,
                format!("expected 10 or 13 characters, got {len} ({normalized})"),
            );
        }
    }

    match Isbn::from_normalized(normalized) {
        Some(isbn) => ValidationResult::success(isbn),
        None => ValidationResult::failure(ErrorKind::InvalidFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_everything_but_digits_and_x() {
        assert_eq!(normalize("ISBN 978-4-12-345678-9"), "9784123456789");
        assert_eq!(normalize("isbn: 4-12-345678-x\n"), "412345678X");
        // Full-width digits are not ASCII digits.
        assert_eq!(normalize("ISBN ９７８"), "");
    }

    #[test]
    fn isbn13_round_trip_from_label() {
        let result = normalize_and_validate("ISBN 978-4-12-345678-9");
        assert!(result.is_valid());
        assert_eq!(result.isbn().unwrap().as_str(), "9784123456789");
    }

    #[test]
    fn isbn13_979_prefix_accepted() {
        let result = normalize_and_validate("979-10-90636-07-1");
        assert!(result.is_valid());
    }

    #[test]
    fn isbn13_wrong_prefix_rejected() {
        for value in ["4901234567894", "1234567890123", "9774123456789"] {
            let result = normalize_and_validate(value);
            assert_eq!(result.error_kind(), Some(ErrorKind::InvalidFormat), "{value}");
            assert!(result.isbn().is_none());
        }
    }

    #[test]
    fn isbn10_accepted_without_checksum() {
        for value in ["412345678X", "0000000000", "1234567890", "080442957X"] {
            let result = normalize_and_validate(value);
            assert!(result.is_valid(), "{value}");
            assert_eq!(result.isbn().unwrap().as_str(), value);
        }
    }

    #[test]
    fn other_lengths_rejected() {
        for value in ["", "ISBN", "123456789", "12345678901", "123456789012", "12345678901234"] {
            let result = normalize_and_validate(value);
            assert_eq!(result.error_kind(), Some(ErrorKind::InvalidFormat), "{value:?}");
        }
    }

    #[test]
    fn rejection_detail_names_the_value() {
        let result = normalize_and_validate("ISBN 12-34");
        assert!(result.detail().unwrap().contains("1234"));
    }
}
