// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Candidate extraction — find the first `ISBN`-labelled run in free text.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// `ISBN` in ASCII case only, an optional `:`/whitespace separator, then a
/// run of ASCII digits, hyphens, whitespace, and `X` or `x`.
///
/// Case folding stays ASCII so that lookalikes such as `ſ` (U+017F) do not
/// pass for a label. Whitespace stays Unicode, which covers the ideographic
/// space in Japanese text.
const ISBN_LABEL_PATTERN: &str = r"(?i-u:ISBN)[:\s]*[0-9Xx\s-]+";

static ISBN_LABEL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn isbn_label_regex() -> Option<&'static Regex> {
    ISBN_LABEL_REGEX
        .get_or_init(|| Regex::new(ISBN_LABEL_PATTERN).ok())
        .as_ref()
}

/// A labelled run found in recognised text, exactly as it appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    text: String,
    /// Byte offset of the match within the source text.
    start: usize,
}

impl Candidate {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Return the first `ISBN`-labelled run in document order, or `None`.
///
/// Later runs are never looked at, even when the first one turns out to be
/// malformed.
pub fn extract_candidate(text: &str) -> Option<Candidate> {
    let regex = isbn_label_regex()?;
    let found = regex.find(text)?;
    debug!(start = found.start(), len = found.len(), "ISBN label found");
    Some(Candidate {
        text: found.as_str().to_string(),
        start: found.start(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_compiles() {
        assert!(isbn_label_regex().is_some());
    }

    #[test]
    fn japanese_sentence() {
        let candidate = extract_candidate("このISBN 4-12-345678-Xです").unwrap();
        assert_eq!(candidate.as_str(), "ISBN 4-12-345678-X");
        assert_eq!(candidate.start(), "この".len());
    }

    #[test]
    fn label_is_case_insensitive() {
        let candidate = extract_candidate("isbn:9784123456789").unwrap();
        assert_eq!(candidate.as_str(), "isbn:9784123456789");
    }

    #[test]
    fn lowercase_x_is_part_of_run() {
        let candidate = extract_candidate("Isbn 0-8044-2957-x.").unwrap();
        assert_eq!(candidate.as_str(), "Isbn 0-8044-2957-x");
    }

    #[test]
    fn long_s_is_not_a_label() {
        assert!(extract_candidate("IſBN 978-4-12-345678-9").is_none());
        assert!(extract_candidate("Iſbn 978-4-12-345678-9").is_none());
    }

    #[test]
    fn ideographic_space_separates_label() {
        let candidate = extract_candidate("ISBN\u{3000}978-4-12-345678-9").unwrap();
        assert_eq!(candidate.as_str(), "ISBN\u{3000}978-4-12-345678-9");
    }

    #[test]
    fn first_match_wins_even_if_malformed() {
        let text = "ISBN 12-34\nISBN 978-4-12-345678-9";
        let candidate = extract_candidate(text).unwrap();
        assert!(candidate.as_str().starts_with("ISBN 12-34"));
        assert_eq!(candidate.start(), 0);
    }

    #[test]
    fn run_may_span_lines() {
        let candidate = extract_candidate("ISBN\n978-4-12\n-345678-9 end").unwrap();
        assert_eq!(candidate.as_str(), "ISBN\n978-4-12\n-345678-9 ");
    }

    #[test]
    fn no_label_is_none() {
        assert!(extract_candidate("978-4-12-345678-9").is_none());
        assert!(extract_candidate("").is_none());
    }

    #[test]
    fn label_without_run_is_none() {
        assert!(extract_candidate("このテキストにはISBNが含まれていません").is_none());
    }
}
