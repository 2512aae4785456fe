// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{BookscanError, Result};
use crate::types::{Locale, ReadingMode};

/// Default Google Books volumes endpoint.
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Language for messages and share text.
    pub locale: Locale,
    /// Reading mode used when none is given explicitly.
    pub default_mode: ReadingMode,
    pub ocr: OcrSettings,
    pub barcode: BarcodeSettings,
    pub lookup: LookupSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: Locale::Ja,
            default_mode: ReadingMode::Barcode,
            ocr: OcrSettings::default(),
            barcode: BarcodeSettings::default(),
            lookup: LookupSettings::default(),
        }
    }
}

impl AppConfig {
    /// Reject settings that would make every attempt fail.
    pub fn validate(&self) -> Result<()> {
        if self.ocr.languages.trim().is_empty() {
            return Err(BookscanError::Config("ocr.languages must not be empty".into()));
        }
        if self.barcode.scan_lines == 0 {
            return Err(BookscanError::Config("barcode.scan_lines must be at least 1".into()));
        }
        if self.lookup.timeout_secs == 0 {
            return Err(BookscanError::Config("lookup.timeout_secs must be at least 1".into()));
        }
        if !(self.lookup.endpoint.starts_with("https://")
            || self.lookup.endpoint.starts_with("http://"))
        {
            return Err(BookscanError::Config(format!(
                "lookup.endpoint is not an http(s) URL: {}",
                self.lookup.endpoint
            )));
        }
        Ok(())
    }
}

/// Text recognition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Tesseract language string; `+` joins several lexicons.
    pub languages: String,
    /// Directory holding `*.traineddata`; `None` uses the system default.
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            languages: "jpn+eng".into(),
            tessdata_dir: None,
        }
    }
}

/// Barcode scanner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeSettings {
    /// Number of evenly spaced rows scanned per orientation.
    pub scan_lines: u32,
    /// Rescan the image rotated by 90° when no row decodes.
    pub try_rotated: bool,
}

impl Default for BarcodeSettings {
    fn default() -> Self {
        Self {
            scan_lines: 24,
            try_rotated: true,
        }
    }
}

/// Metadata provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Optional provider API key, sent as the `key` query parameter.
    pub api_key: Option<String>,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_LOOKUP_ENDPOINT.into(),
            timeout_secs: 10,
            api_key: None,
        }
    }
}
