// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the scan screen.
//
// Every error kind maps to exactly one message per locale plus a recovery
// hint. The severity tells the UI whether recapturing is likely to help.

use crate::error::BookscanError;
use crate::types::{ErrorKind, Locale};

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Try again as-is (recapture, network blip).
    Transient,
    /// User must change something (framing, lighting, reading mode).
    ActionRequired,
    /// Retrying this input will not help.
    Permanent,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether recapturing the same book is worth offering.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

struct Entry {
    ja: (&'static str, &'static str),
    en: (&'static str, &'static str),
    retriable: bool,
    severity: Severity,
}

fn entry(kind: ErrorKind) -> Entry {
    match kind {
        ErrorKind::ImageLoadFailed => Entry {
            ja: (
                "画像の読み込みに失敗しました",
                "JPEG・PNG・HEIC・WebP形式の画像を選ぶか、もう一度撮影してください。",
            ),
            en: (
                "The image could not be loaded.",
                "Choose a JPEG, PNG, HEIC or WebP image, or take the photo again.",
            ),
            retriable: false,
            severity: Severity::Permanent,
        },
        ErrorKind::NotFound => Entry {
            ja: (
                "ISBNバーコードが見つかりませんでした",
                "裏表紙の「978」「979」で始まるバーコードが枠いっぱいに写るように撮り直してください。",
            ),
            en: (
                "No ISBN barcode was found.",
                "Recapture with the barcode starting 978 or 979 filling the frame.",
            ),
            retriable: true,
            severity: Severity::Transient,
        },
        ErrorKind::Corrupted => Entry {
            ja: (
                "バーコードが破損しています",
                "ピントを合わせ、反射や影が入らないようにして撮り直してください。",
            ),
            en: (
                "The barcode is damaged or blurred.",
                "Hold the camera steady, avoid glare and shadows, and recapture.",
            ),
            retriable: true,
            severity: Severity::Transient,
        },
        ErrorKind::UnsupportedFormat => Entry {
            ja: (
                "サポートされていないバーコード形式です",
                "文字認識モードに切り替えて、ISBNの印字を撮影してください。",
            ),
            en: (
                "This barcode type is not supported.",
                "Switch to text recognition mode and photograph the printed ISBN.",
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        ErrorKind::RecognitionFailed => Entry {
            ja: (
                "文字認識に失敗しました",
                "明るい場所で、文字がはっきり写るように撮り直してください。",
            ),
            en: (
                "Text recognition didn't work on this photo.",
                "Recapture in better light, making sure the text is sharp and in focus.",
            ),
            retriable: true,
            severity: Severity::Transient,
        },
        ErrorKind::NoCandidate => Entry {
            ja: (
                "ISBNが見つかりませんでした",
                "「ISBN」の文字と番号が写るように撮り直すか、バーコードモードを試してください。",
            ),
            en: (
                "No ISBN was found in the text.",
                "Recapture so the word ISBN and its number are visible, or try barcode mode.",
            ),
            retriable: true,
            severity: Severity::ActionRequired,
        },
        ErrorKind::InvalidFormat => Entry {
            ja: (
                "有効なISBN形式ではありません",
                "番号の一部が欠けている可能性があります。ISBN全体が写るように撮り直してください。",
            ),
            en: (
                "That is not a valid ISBN.",
                "Part of the number may be cut off. Recapture with the whole ISBN in frame.",
            ),
            retriable: true,
            severity: Severity::ActionRequired,
        },
        ErrorKind::LookupNotFound => Entry {
            ja: (
                "書籍が見つかりませんでした",
                "書誌データベースにこのISBNの登録がありません。番号が正しいか確認してください。",
            ),
            en: (
                "No book was found for this ISBN.",
                "The catalogue has no record of it. Check that the number is correct.",
            ),
            retriable: false,
            severity: Severity::Permanent,
        },
        ErrorKind::LookupTransportError => Entry {
            ja: (
                "書籍情報の取得に失敗しました",
                "インターネット接続を確認して、もう一度お試しください。",
            ),
            en: (
                "Book details could not be fetched.",
                "Check your internet connection and try again.",
            ),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

/// The single localized message for an error kind.
pub fn message(kind: ErrorKind, locale: Locale) -> &'static str {
    let e = entry(kind);
    match locale {
        Locale::Ja => e.ja.0,
        Locale::En => e.en.0,
    }
}

/// Convert an error kind into a localized `HumanError`.
pub fn humanize(kind: ErrorKind, locale: Locale) -> HumanError {
    let e = entry(kind);
    let (message, suggestion) = match locale {
        Locale::Ja => e.ja,
        Locale::En => e.en,
    };
    HumanError {
        message: message.into(),
        suggestion: suggestion.into(),
        retriable: e.retriable,
        severity: e.severity,
    }
}

/// Convert any `BookscanError` into a `HumanError`.
///
/// Pipeline and lookup errors use their kind's message; the rest get a
/// generic message per variant.
pub fn humanize_error(err: &BookscanError, locale: Locale) -> HumanError {
    if let Some(kind) = err.kind() {
        return humanize(kind, locale);
    }

    let (ja, en, retriable, severity) = match err {
        BookscanError::UnsupportedImageType(_) => (
            ("この画像形式には対応していません", "JPEG・PNG・HEIC・WebP形式の画像を選んでください。"),
            ("This image type isn't supported.", "Choose a JPEG, PNG, HEIC or WebP image."),
            false,
            Severity::Permanent,
        ),
        BookscanError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => (
            ("ファイルが見つかりませんでした", "ファイルをもう一度選んでください。"),
            ("The file couldn't be found.", "It may have been moved or deleted. Choose it again."),
            false,
            Severity::ActionRequired,
        ),
        BookscanError::PlatformUnavailable | BookscanError::Bridge(_) => (
            ("この端末ではこの機能を利用できません", "画像ファイルのアップロードをお試しください。"),
            ("This feature isn't available on your device.", "Try uploading an image file instead."),
            false,
            Severity::Permanent,
        ),
        _ => (
            ("処理中にエラーが発生しました", "もう一度お試しください。"),
            ("Something went wrong.", "Try again. If this keeps happening, please report it."),
            true,
            Severity::Transient,
        ),
    };

    let (message, suggestion) = match locale {
        Locale::Ja => ja,
        Locale::En => en,
    };
    HumanError {
        message: message.into(),
        suggestion: suggestion.into(),
        retriable,
        severity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_kind_has_distinct_message_per_locale() {
        for locale in [Locale::Ja, Locale::En] {
            let messages: HashSet<_> = ErrorKind::ALL
                .iter()
                .map(|k| message(*k, locale))
                .collect();
            assert_eq!(messages.len(), ErrorKind::ALL.len());
        }
    }

    #[test]
    fn original_japanese_strings_are_kept() {
        assert_eq!(message(ErrorKind::NoCandidate, Locale::Ja), "ISBNが見つかりませんでした");
        assert_eq!(message(ErrorKind::InvalidFormat, Locale::Ja), "有効なISBN形式ではありません");
        assert_eq!(message(ErrorKind::Corrupted, Locale::Ja), "バーコードが破損しています");
    }

    #[test]
    fn unsupported_format_asks_for_mode_switch() {
        let human = humanize(ErrorKind::UnsupportedFormat, Locale::En);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("text recognition"));
    }

    #[test]
    fn not_found_is_retriable() {
        let human = humanize(ErrorKind::NotFound, Locale::Ja);
        assert!(human.retriable);
        assert_eq!(human.severity, Severity::Transient);
    }

    #[test]
    fn pipeline_errors_use_kind_message() {
        let err = BookscanError::RecognitionFailed("tesseract init failed".into());
        let human = humanize_error(&err, Locale::En);
        assert_eq!(human.message, message(ErrorKind::RecognitionFailed, Locale::En));
    }

    #[test]
    fn platform_unavailable_is_permanent() {
        let human = humanize_error(&BookscanError::PlatformUnavailable, Locale::En);
        assert_eq!(human.severity, Severity::Permanent);
        assert!(!human.retriable);
    }
}
