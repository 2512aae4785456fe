// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bookscan ISBN acquisition pipeline.

use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookscanError, Result};

/// Unique identifier for one acquisition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(pub Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AttemptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Image formats accepted from capture and upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMime {
    Jpeg,
    Png,
    Heic,
    Webp,
}

impl ImageMime {
    /// Every accepted format, in the order offered to file pickers.
    pub const ALL: [ImageMime; 4] = [Self::Jpeg, Self::Png, Self::Heic, Self::Webp];

    /// MIME type string.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Heic => "image/heic",
            Self::Webp => "image/webp",
        }
    }

    /// Parse a declared MIME type (parameters such as `; charset` are ignored).
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/heic" | "image/heif" => Some(Self::Heic),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Infer the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "heic" | "heif" => Some(Self::Heic),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

/// Encoded image bytes plus their declared MIME type.
///
/// Owned by a single acquisition attempt and never mutated; adapters borrow it
/// and decode their own bitmap from the bytes.
#[derive(Clone)]
pub struct RawImage {
    bytes: Vec<u8>,
    mime_type: String,
    name: Option<String>,
}

impl RawImage {
    /// Wrap encoded bytes with a declared MIME type.
    ///
    /// The declared type is not checked here; restricting uploads to
    /// [`ImageMime::ALL`] is the uploader's job.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            name: None,
        }
    }

    /// Wrap a JPEG frame grabbed from the camera, named after the capture time.
    pub fn captured(bytes: Vec<u8>) -> Self {
        let millis = Utc::now().timestamp_millis();
        Self {
            bytes,
            mime_type: ImageMime::Jpeg.mime_type().to_string(),
            name: Some(format!("captured-image-{millis}.jpg")),
        }
    }

    /// Read an image file, inferring its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`BookscanError::UnsupportedImageType`] for extensions outside
    /// JPEG, PNG, HEIC, and WebP, and [`BookscanError::Io`] if the file cannot
    /// be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mime = ImageMime::from_extension(ext).ok_or_else(|| {
            BookscanError::UnsupportedImageType(format!("{} ({})", path.display(), ext))
        })?;
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        Ok(Self {
            bytes,
            mime_type: mime.mime_type().to_string(),
            name,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The declared type, if it is one of the accepted formats.
    pub fn image_mime(&self) -> Option<ImageMime> {
        ImageMime::from_mime(&self.mime_type)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for RawImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawImage")
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .field("name", &self.name)
            .finish()
    }
}

/// Which recognition strategy an acquisition attempt uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingMode {
    /// Decode the EAN-13 barcode on the back cover.
    Barcode,
    /// Read the printed `ISBN ...` label with text recognition.
    Ocr,
}

impl std::fmt::Display for ReadingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Barcode => f.write_str("barcode"),
            Self::Ocr => f.write_str("ocr"),
        }
    }
}

/// Language used for user-facing messages and share text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

/// Raw text from the optical recognizer plus the engine's confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionOutput {
    pub text: String,
    /// Mean confidence reported by the engine, 0–100.
    pub confidence: f32,
}

impl RecognitionOutput {
    /// Build an output, clamping the confidence into 0–100.
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 100.0)
        };
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Whether an identifier has the 10- or 13-character shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsbnKind {
    Isbn10,
    Isbn13,
}

/// A normalized identifier: ASCII digits and uppercase `X`, length 10 or 13.
///
/// Holding an `Isbn` only guarantees that shape. Prefix rules are applied by
/// the validator before one is handed out, and check digits are never
/// enforced (see [`Isbn::check_digit_valid`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    /// Accept an already-normalized value if it has the identifier shape.
    pub fn from_normalized(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let shape_ok = matches!(value.len(), 10 | 13)
            && value.bytes().all(|b| b.is_ascii_digit() || b == b'X');
        shape_ok.then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> IsbnKind {
        if self.0.len() == 13 {
            IsbnKind::Isbn13
        } else {
            IsbnKind::Isbn10
        }
    }

    /// Verify the check digit (mod 11 for ISBN-10, weighted mod 10 for ISBN-13).
    ///
    /// Informational only: acquisition accepts identifiers that fail this.
    pub fn check_digit_valid(&self) -> bool {
        let bytes = self.0.as_bytes();
        match self.kind() {
            IsbnKind::Isbn10 => {
                let mut sum = 0u32;
                for (i, &b) in bytes.iter().enumerate() {
                    let value = match b {
                        b'0'..=b'9' => u32::from(b - b'0'),
                        b'X' if i == 9 => 10,
                        _ => return false,
                    };
                    sum += value * (10 - i as u32);
                }
                sum % 11 == 0
            }
            IsbnKind::Isbn13 => {
                let mut sum = 0u32;
                for (i, &b) in bytes.iter().enumerate() {
                    if !b.is_ascii_digit() {
                        return false;
                    }
                    let weight = if i % 2 == 0 { 1 } else { 3 };
                    sum += u32::from(b - b'0') * weight;
                }
                sum % 10 == 0
            }
        }
    }
}

impl std::fmt::Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Isbn {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_normalized(value.clone()).ok_or_else(|| format!("not a normalized ISBN: {value}"))
    }
}

impl From<Isbn> for String {
    fn from(isbn: Isbn) -> Self {
        isbn.0
    }
}

/// Classified failure of an acquisition attempt or of the metadata lookup.
///
/// Callers branch on the tag to choose recovery hints; the localized text
/// comes from [`crate::human_errors::humanize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The image bytes could not be decoded as a bitmap.
    ImageLoadFailed,
    /// No ISBN barcode was located (or the barcode was not a book code).
    NotFound,
    /// A symbol was located but its check digit did not match.
    Corrupted,
    /// A barcode of a symbology other than EAN-13 was found.
    UnsupportedFormat,
    /// The text recognition engine raised an error.
    RecognitionFailed,
    /// Recognised text contained no `ISBN`-labelled run.
    NoCandidate,
    /// The extracted candidate has the wrong length or ISBN-13 prefix.
    InvalidFormat,
    /// The metadata provider had no record for the identifier.
    LookupNotFound,
    /// The metadata provider could not be reached or answered garbage.
    LookupTransportError,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 9] = [
        Self::ImageLoadFailed,
        Self::NotFound,
        Self::Corrupted,
        Self::UnsupportedFormat,
        Self::RecognitionFailed,
        Self::NoCandidate,
        Self::InvalidFormat,
        Self::LookupNotFound,
        Self::LookupTransportError,
    ];

    /// Whether the failure came from the metadata collaborator rather than
    /// the acquisition pipeline.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::LookupNotFound | Self::LookupTransportError)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Terminal output of an acquisition attempt.
///
/// Either valid with an [`Isbn`], or invalid with an [`ErrorKind`] — never
/// both. Fields are private so that shape cannot be broken after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    isbn: Option<Isbn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ValidationResult {
    pub fn success(isbn: Isbn) -> Self {
        Self {
            valid: true,
            isbn: Some(isbn),
            error_kind: None,
            detail: None,
        }
    }

    pub fn failure(kind: ErrorKind) -> Self {
        Self {
            valid: false,
            isbn: None,
            error_kind: Some(kind),
            detail: None,
        }
    }

    /// A failure carrying the underlying message (engine error, rejected candidate).
    pub fn failure_with(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::failure(kind)
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn isbn(&self) -> Option<&Isbn> {
        self.isbn.as_ref()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Convert into a `Result` so callers can continue with `?`.
    pub fn into_result(self) -> Result<Isbn> {
        match (self.isbn, self.error_kind) {
            (Some(isbn), _) => Ok(isbn),
            (None, Some(kind)) => Err(BookscanError::from_kind(kind, self.detail)),
            (None, None) => Err(BookscanError::InvalidFormat(
                self.detail.unwrap_or_default(),
            )),
        }
    }
}

/// Bibliographic metadata returned by the lookup collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInfo {
    pub isbn: Isbn,
    pub title: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    /// Cover thumbnail URL.
    pub image_url: Option<String>,
    pub published_date: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isbn_shape_is_enforced() {
        assert!(Isbn::from_normalized("9784123456789").is_some());
        assert!(Isbn::from_normalized("412345678X").is_some());
        assert!(Isbn::from_normalized("412345678x").is_none());
        assert!(Isbn::from_normalized("12345").is_none());
        assert!(Isbn::from_normalized("978-4123456789").is_none());
    }

    #[test]
    fn check_digit_isbn13() {
        let good = Isbn::from_normalized("9780306406157").unwrap();
        assert!(good.check_digit_valid());
        let bad = Isbn::from_normalized("9784123456789").unwrap();
        assert!(!bad.check_digit_valid());
    }

    #[test]
    fn check_digit_isbn10() {
        let good = Isbn::from_normalized("0306406152").unwrap();
        assert!(good.check_digit_valid());
        let with_x = Isbn::from_normalized("080442957X").unwrap();
        assert!(with_x.check_digit_valid());
        let x_in_middle = Isbn::from_normalized("08044X9570").unwrap();
        assert!(!x_in_middle.check_digit_valid());
    }

    #[test]
    fn validation_result_never_carries_both() {
        let ok = ValidationResult::success(Isbn::from_normalized("9784123456789").unwrap());
        assert!(ok.is_valid());
        assert!(ok.error_kind().is_none());

        let failed = ValidationResult::failure_with(ErrorKind::RecognitionFailed, "engine down");
        assert!(!failed.is_valid());
        assert!(failed.isbn().is_none());
        assert_eq!(failed.detail(), Some("engine down"));
    }

    #[test]
    fn into_result_maps_kind_to_error() {
        let failed = ValidationResult::failure(ErrorKind::NoCandidate);
        let err = failed.into_result().unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NoCandidate));
    }

    #[test]
    fn isbn_serde_rejects_bad_shape() {
        let parsed: std::result::Result<Isbn, _> = serde_json::from_str("\"12345\"");
        assert!(parsed.is_err());
        let parsed: Isbn = serde_json::from_str("\"9784123456789\"").unwrap();
        assert_eq!(parsed.as_str(), "9784123456789");
    }

    #[test]
    fn mime_parsing() {
        assert_eq!(ImageMime::from_mime("image/JPEG"), Some(ImageMime::Jpeg));
        assert_eq!(ImageMime::from_mime("image/webp; q=1"), Some(ImageMime::Webp));
        assert_eq!(ImageMime::from_mime("application/pdf"), None);
        assert_eq!(ImageMime::from_extension("HEIC"), Some(ImageMime::Heic));
    }

    #[test]
    fn captured_image_is_named_jpeg() {
        let img = RawImage::captured(vec![1, 2, 3]);
        assert_eq!(img.image_mime(), Some(ImageMime::Jpeg));
        let name = img.name().unwrap();
        assert!(name.starts_with("captured-image-") && name.ends_with(".jpg"));
    }

    #[test]
    fn from_path_rejects_unknown_extension() {
        let err = RawImage::from_path("/nonexistent/cover.gif").unwrap_err();
        assert!(matches!(err, BookscanError::UnsupportedImageType(_)));
    }

    #[test]
    fn only_two_kinds_come_from_lookup() {
        let lookup: Vec<_> = ErrorKind::ALL.iter().filter(|k| k.is_lookup()).collect();
        assert_eq!(
            lookup,
            vec![&ErrorKind::LookupNotFound, &ErrorKind::LookupTransportError]
        );
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(RecognitionOutput::new("x", 140.0).confidence, 100.0);
        assert_eq!(RecognitionOutput::new("x", -3.0).confidence, 0.0);
        assert_eq!(RecognitionOutput::new("x", f32::NAN).confidence, 0.0);
    }
}
