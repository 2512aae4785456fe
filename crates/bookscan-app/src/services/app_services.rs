// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service container shared by every command.
//
// The acquisition coordinator is CPU-bound (image decoding, scanline
// decoding, Tesseract), so each attempt runs on tokio's blocking pool. The
// coordinator is immutable and `Send + Sync`, shared through an `Arc`, which
// lets overlapping attempts proceed without locking.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bookscan_books::{GoogleBooksClient, MetadataProvider, ShareTarget, share_text};
use bookscan_bridge::{PlatformBridge, accepts_image, picker_mime_types};
use bookscan_core::config::OcrSettings;
use bookscan_core::error::{BookscanError, Result};
use bookscan_core::{AppConfig, BookInfo, Isbn, RawImage, ReadingMode};
use bookscan_recognize::{Acquisition, AcquisitionCoordinator, Ean13Reader, TextRecognizer};
use tracing::{debug, info, warn};

use super::data_dir;

/// Shared handle to all backend services.
#[derive(Clone)]
pub struct AppServices {
    config: Arc<AppConfig>,
    /// Where `save_config` writes: the file the configuration came from.
    config_path: PathBuf,
    coordinator: Arc<AcquisitionCoordinator>,
    metadata: Arc<dyn MetadataProvider>,
    bridge: Arc<dyn PlatformBridge>,
}

/// What happened to share output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOutcome {
    /// Text or intent URL for the chosen target.
    pub rendered: String,
    /// Whether the host bridge took it (clipboard, browser). When false the
    /// caller should print `rendered` itself.
    pub delivered: bool,
}

impl AppServices {
    /// Resolve the configuration and the file it belongs to.
    ///
    /// An explicit path must exist and parse. Without one, `config.json` in the
    /// data dir is used if present and defaults otherwise.
    pub fn resolve_config(explicit: Option<&Path>) -> Result<(PathBuf, AppConfig)> {
        match explicit {
            Some(path) => Ok((path.to_path_buf(), load_config_file(path)?)),
            None => {
                let dir = data_dir::data_dir();
                let config = load_config(&dir).unwrap_or_default();
                Ok((dir.join(CONFIG_FILE), config))
            }
        }
    }

    /// Build services from an already-resolved configuration.
    pub fn init(config: AppConfig, config_path: PathBuf) -> Result<Self> {
        config.validate()?;
        info!(config = %config_path.display(), "initialising app services");

        let coordinator = AcquisitionCoordinator::new(
            Box::new(Ean13Reader::new(config.barcode.clone())),
            text_recognizer(&config.ocr),
        );
        let metadata = GoogleBooksClient::new(&config.lookup)?;

        let bridge: Arc<dyn PlatformBridge> = Arc::from(bookscan_bridge::platform_bridge());
        debug!(platform = bridge.platform_name(), "platform bridge ready");

        Ok(Self {
            config: Arc::new(config),
            config_path,
            coordinator: Arc::new(coordinator),
            metadata: Arc::new(metadata),
            bridge,
        })
    }

    /// Swap in a different metadata provider.
    #[cfg(test)]
    pub fn with_metadata(mut self, metadata: Arc<dyn MetadataProvider>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // -- Acquisition ---------------------------------------------------------

    /// Take a photo with the host camera. `None` when the user cancelled.
    pub fn capture(&self) -> Result<Option<RawImage>> {
        self.bridge.capture_image()
    }

    /// Run one acquisition attempt on the blocking pool.
    ///
    /// Images whose declared type the pickers would not offer are refused
    /// before any decoding.
    pub async fn acquire(&self, image: RawImage, mode: ReadingMode) -> Result<Acquisition> {
        if !accepts_image(&image) {
            return Err(BookscanError::UnsupportedImageType(format!(
                "{} (expected {})",
                image.mime_type(),
                picker_mime_types().join(", ")
            )));
        }
        let coordinator = Arc::clone(&self.coordinator);
        tokio::task::spawn_blocking(move || coordinator.acquire(&image, mode))
            .await
            .map_err(|e| BookscanError::Io(std::io::Error::other(e)))
    }

    // -- Lookup & share ------------------------------------------------------

    pub async fn lookup(&self, isbn: &Isbn) -> Result<BookInfo> {
        self.metadata.lookup(isbn).await
    }

    /// Render share output for `book` and hand it to the host.
    ///
    /// Plain text goes to the share sheet, or the clipboard when there is no
    /// share sheet. Intent URLs go to the URL opener. A host without those
    /// capabilities is not an error.
    pub fn share(&self, book: &BookInfo, target: ShareTarget) -> Result<ShareOutcome> {
        let text = share_text(book, self.config.locale);
        let rendered = target.render(&text);

        let handed_off = match target {
            ShareTarget::Text => match self.bridge.share_text(&rendered) {
                Err(BookscanError::PlatformUnavailable) => self.bridge.write_text(&rendered),
                other => other,
            },
            ShareTarget::X | ShareTarget::Slack => self.bridge.open_url(&rendered),
        };
        let delivered = match handed_off {
            Ok(()) => true,
            Err(BookscanError::PlatformUnavailable) => {
                debug!(%target, "host cannot take share output, returning it to the caller");
                false
            }
            Err(e) => return Err(e),
        };
        Ok(ShareOutcome { rendered, delivered })
    }

    // -- Config --------------------------------------------------------------

    /// Write the current configuration back to the file it was loaded from.
    pub fn save_config(&self) -> Result<&Path> {
        persist_config(&self.config_path, &self.config)?;
        Ok(&self.config_path)
    }
}

#[cfg(feature = "ocr")]
fn text_recognizer(settings: &OcrSettings) -> Box<dyn TextRecognizer> {
    let recognizer = bookscan_recognize::TesseractRecognizer::new(settings);
    if let Err(e) = recognizer.validate() {
        warn!(error = %e, "text recognition may fail");
    }
    Box::new(recognizer)
}

#[cfg(not(feature = "ocr"))]
fn text_recognizer(settings: &OcrSettings) -> Box<dyn TextRecognizer> {
    debug!(languages = %settings.languages, "built without text recognition");
    Box::new(bookscan_recognize::UnavailableRecognizer)
}

// -- Config file persistence -------------------------------------------------

pub const CONFIG_FILE: &str = "config.json";

/// Load `config.json` from `data_dir`. Missing or unreadable files yield `None`.
pub fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    match load_config_file(&path) {
        Ok(config) => Some(config),
        Err(BookscanError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config file unusable, using defaults");
            None
        }
    }
}

/// Load a config file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn persist_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}
