// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface definition.

use std::path::PathBuf;

use bookscan_books::ShareTarget;
use bookscan_core::{AppConfig, Locale, ReadingMode};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Photograph a book, get its ISBN
#[derive(Parser, Debug)]
#[command(name = "bookscan", version, about)]
pub struct Cli {
    /// Config file to use instead of `config.json` in the config directory
    #[arg(long, global = true, env = "BOOKSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Language for messages and share text
    #[arg(long, global = true, value_enum)]
    pub locale: Option<LocaleArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read the ISBN from a photo of a book
    Scan(ScanArgs),
    /// Print the effective configuration as JSON
    Config {
        /// Also write it back to the config file it was loaded from
        #[arg(long, default_value_t = false)]
        write: bool,
    },
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Image file (JPEG, PNG, HEIC or WebP); omit to use the device camera
    pub image: Option<PathBuf>,

    /// How to read the ISBN (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Look the book up after reading its ISBN
    #[arg(short, long, default_value_t = false)]
    pub lookup: bool,

    /// Render share output for the book (implies --lookup)
    #[arg(short, long, value_enum)]
    pub share: Option<ShareArg>,

    /// Tesseract languages, joined with `+`
    #[arg(long)]
    pub languages: Option<String>,

    /// Print the acquisition result as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Barcode,
    Ocr,
}

impl From<ModeArg> for ReadingMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Barcode => ReadingMode::Barcode,
            ModeArg::Ocr => ReadingMode::Ocr,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleArg {
    Ja,
    En,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Ja => Locale::Ja,
            LocaleArg::En => Locale::En,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareArg {
    Text,
    X,
    Slack,
}

impl From<ShareArg> for ShareTarget {
    fn from(arg: ShareArg) -> Self {
        match arg {
            ShareArg::Text => ShareTarget::Text,
            ShareArg::X => ShareTarget::X,
            ShareArg::Slack => ShareTarget::Slack,
        }
    }
}

impl Cli {
    /// Apply flags that override persisted settings.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(locale) = self.locale {
            config.locale = locale.into();
        }
        if let Command::Scan(scan) = &self.command {
            if let Some(mode) = scan.mode {
                config.default_mode = mode.into();
            }
            if let Some(languages) = &scan.languages {
                config.ocr.languages = languages.clone();
            }
        }
    }
}
