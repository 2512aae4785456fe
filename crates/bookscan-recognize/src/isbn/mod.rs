// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ISBN handling for recognised text — locating the labelled run and checking
// its shape.

pub mod extract;
pub mod validate;

use bookscan_core::{ErrorKind, ValidationResult};

pub use extract::{Candidate, extract_candidate};
pub use validate::{normalize, normalize_and_validate};

/// Extract the first `ISBN`-labelled run from `text` and validate it.
///
/// Fails with [`ErrorKind::NoCandidate`] when the text has no label, otherwise
/// returns whatever [`normalize_and_validate`] decides for the first run.
pub fn extract_isbn(text: &str) -> ValidationResult {
    match extract_candidate(text) {
        Some(candidate) => normalize_and_validate(candidate.as_str()),
        None => ValidationResult::failure(ErrorKind::NoCandidate),
    }
}
