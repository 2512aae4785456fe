// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bookscan.

use thiserror::Error;

use crate::types::ErrorKind;

/// Top-level error type for all Bookscan operations.
#[derive(Debug, Error)]
pub enum BookscanError {
    // -- Acquisition errors --
    #[error("image could not be decoded: {0}")]
    ImageLoadFailed(String),

    #[error("no ISBN barcode found in image")]
    BarcodeNotFound,

    #[error("barcode located but its check digit does not match")]
    BarcodeCorrupted,

    #[error("unsupported barcode symbology: {0}")]
    UnsupportedSymbology(String),

    #[error("text recognition failed: {0}")]
    RecognitionFailed(String),

    #[error("no ISBN label found in recognised text")]
    NoCandidate,

    #[error("not a valid ISBN: {0}")]
    InvalidFormat(String),

    // -- Metadata lookup --
    #[error("no book found for ISBN {0}")]
    LookupNotFound(String),

    #[error("metadata lookup failed: {0}")]
    LookupTransport(String),

    // -- Input / configuration --
    #[error("unsupported image type: {0}")]
    UnsupportedImageType(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

impl BookscanError {
    /// The pipeline/lookup error kind this error represents, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::ImageLoadFailed(_) => Some(ErrorKind::ImageLoadFailed),
            Self::BarcodeNotFound => Some(ErrorKind::NotFound),
            Self::BarcodeCorrupted => Some(ErrorKind::Corrupted),
            Self::UnsupportedSymbology(_) => Some(ErrorKind::UnsupportedFormat),
            Self::RecognitionFailed(_) => Some(ErrorKind::RecognitionFailed),
            Self::NoCandidate => Some(ErrorKind::NoCandidate),
            Self::InvalidFormat(_) => Some(ErrorKind::InvalidFormat),
            Self::LookupNotFound(_) => Some(ErrorKind::LookupNotFound),
            Self::LookupTransport(_) => Some(ErrorKind::LookupTransportError),
            Self::UnsupportedImageType(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Serialization(_)
            | Self::Bridge(_)
            | Self::PlatformUnavailable => None,
        }
    }

    /// Rebuild an error from a classified kind and its optional detail.
    pub fn from_kind(kind: ErrorKind, detail: Option<String>) -> Self {
        let detail = detail.unwrap_or_default();
        match kind {
            ErrorKind::ImageLoadFailed => Self::ImageLoadFailed(detail),
            ErrorKind::NotFound => Self::BarcodeNotFound,
            ErrorKind::Corrupted => Self::BarcodeCorrupted,
            ErrorKind::UnsupportedFormat => Self::UnsupportedSymbology(detail),
            ErrorKind::RecognitionFailed => Self::RecognitionFailed(detail),
            ErrorKind::NoCandidate => Self::NoCandidate,
            ErrorKind::InvalidFormat => Self::InvalidFormat(detail),
            ErrorKind::LookupNotFound => Self::LookupNotFound(detail),
            ErrorKind::LookupTransportError => Self::LookupTransport(detail),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BookscanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_error() {
        for kind in ErrorKind::ALL {
            let err = BookscanError::from_kind(kind, Some("detail".into()));
            assert_eq!(err.kind(), Some(kind));
        }
    }

    #[test]
    fn ambient_errors_have_no_kind() {
        assert_eq!(BookscanError::PlatformUnavailable.kind(), None);
        assert_eq!(BookscanError::Config("bad".into()).kind(), None);
    }
}
