// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tesseract OCR backend via `leptess`.
//
// # Language data
//
// Tesseract needs a `<lang>.traineddata` file for every language in the
// configured language string (default `jpn+eng`). Distribution packages
// install them under `/usr/share/tesseract-ocr/*/tessdata`:
//
// ```sh
// apt install tesseract-ocr-jpn tesseract-ocr-eng
// ```
//
// Point `ocr.tessdata_dir` at a different directory to use downloaded models.

use std::path::PathBuf;

use bookscan_core::config::OcrSettings;
use bookscan_core::error::{BookscanError, Result};
use bookscan_core::{RawImage, RecognitionOutput};
use leptess::LepTess;
use tracing::{debug, info, instrument};

use super::TextRecognizer;

/// Tesseract-backed recognizer for a mixed-language lexicon.
///
/// A fresh engine is created per call so concurrent attempts never share
/// Tesseract state.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    languages: String,
    tessdata_dir: Option<PathBuf>,
}

impl TesseractRecognizer {
    pub fn new(settings: &OcrSettings) -> Self {
        Self {
            languages: settings.languages.clone(),
            tessdata_dir: settings.tessdata_dir.clone(),
        }
    }

    /// Check that an explicitly configured tessdata directory has every
    /// requested language.
    pub fn validate(&self) -> Result<()> {
        let Some(dir) = &self.tessdata_dir else {
            return Ok(());
        };
        for lang in self.languages.split('+').filter(|l| !l.is_empty()) {
            let path = dir.join(format!("{lang}.traineddata"));
            if !path.exists() {
                return Err(BookscanError::RecognitionFailed(format!(
                    "language data not found at {}; install the tesseract `{lang}` language pack",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    pub fn languages(&self) -> &str {
        &self.languages
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    #[instrument(skip_all, fields(languages = %self.languages, len = image.len()))]
    fn recognize(&self, image: &RawImage) -> Result<RecognitionOutput> {
        let data_path = self
            .tessdata_dir
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let mut engine = LepTess::new(data_path.as_deref(), &self.languages).map_err(|err| {
            BookscanError::RecognitionFailed(format!(
                "failed to initialise tesseract ({}): {}",
                self.languages, err
            ))
        })?;

        engine.set_image_from_mem(image.bytes()).map_err(|err| {
            BookscanError::RecognitionFailed(format!("tesseract could not read the image: {err}"))
        })?;

        info!("Starting text recognition");
        let text = engine.get_utf8_text().map_err(|err| {
            BookscanError::RecognitionFailed(format!("recognised text was not valid UTF-8: {err}"))
        })?;
        let confidence = engine.mean_text_conf();

        debug!(
            line_count = text.lines().count(),
            char_count = text.chars().count(),
            confidence,
            "Text recognition complete"
        );
        Ok(RecognitionOutput::new(text, confidence as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_languages_are_japanese_and_english() {
        let recognizer = TesseractRecognizer::new(&OcrSettings::default());
        assert_eq!(recognizer.languages(), "jpn+eng");
    }

    #[test]
    fn validate_reports_missing_language_data() {
        let recognizer = TesseractRecognizer::new(&OcrSettings {
            languages: "jpn+eng".into(),
            tessdata_dir: Some(PathBuf::from("/nonexistent/tessdata")),
        });
        let err = recognizer.validate().unwrap_err();
        assert!(err.to_string().contains("jpn.traineddata"));
    }

    #[test]
    fn validate_skips_system_default() {
        let recognizer = TesseractRecognizer::new(&OcrSettings::default());
        assert!(recognizer.validate().is_ok());
    }
}
