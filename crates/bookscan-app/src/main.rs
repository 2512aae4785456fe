// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bookscan — resolve a photo of a book to its ISBN.
//
// Entry point. Initialises logging, resolves configuration, builds the
// services and runs the requested command.

mod cli;
mod services;

use std::process::ExitCode;

use anyhow::{Context, Result};
use bookscan_core::human_errors::{humanize, humanize_error};
use bookscan_core::RawImage;
use clap::Parser;

use cli::{Cli, Command, ScanArgs};
use services::app_services::AppServices;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "bookscan failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let (config_path, mut config) = AppServices::resolve_config(cli.config.as_deref())
        .with_context(|| match &cli.config {
            Some(path) => format!("could not load config {}", path.display()),
            None => "could not load config".to_string(),
        })?;
    cli.apply_overrides(&mut config);

    let svc = AppServices::init(config, config_path).context("invalid configuration")?;

    match &cli.command {
        Command::Scan(args) => scan(&svc, args).await,
        Command::Config { write } => {
            println!("{}", serde_json::to_string_pretty(svc.config())?);
            if *write {
                let path = svc.save_config().context("could not write config")?;
                eprintln!("wrote {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn scan(svc: &AppServices, args: &ScanArgs) -> Result<ExitCode> {
    let locale = svc.config().locale;
    let mode = svc.config().default_mode;

    let loaded = match &args.image {
        Some(path) => RawImage::from_path(path).map(Some),
        None => svc.capture(),
    };
    let image = match loaded {
        Ok(Some(image)) => image,
        Ok(None) => {
            tracing::info!("capture cancelled");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            report(&humanize_error(&e, locale));
            return Ok(ExitCode::FAILURE);
        }
    };

    let acquisition = match svc.acquire(image, mode).await {
        Ok(acquisition) => acquisition,
        Err(e) => {
            report(&humanize_error(&e, locale));
            return Ok(ExitCode::FAILURE);
        }
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&acquisition)?);
    }

    let isbn = match (acquisition.isbn(), acquisition.error_kind()) {
        (Some(isbn), _) => isbn.clone(),
        (None, Some(kind)) => {
            report(&humanize(kind, locale));
            return Ok(ExitCode::FAILURE);
        }
        (None, None) => anyhow::bail!("acquisition produced neither an ISBN nor an error"),
    };
    if !args.json {
        println!("{isbn}");
    }

    if !(args.lookup || args.share.is_some()) {
        return Ok(ExitCode::SUCCESS);
    }

    let book = match svc.lookup(&isbn).await {
        Ok(book) => book,
        Err(e) => {
            report(&humanize_error(&e, locale));
            return Ok(ExitCode::FAILURE);
        }
    };
    println!("{}", serde_json::to_string_pretty(&book)?);

    if let Some(target) = args.share {
        let outcome = svc.share(&book, target.into())?;
        if !outcome.delivered {
            println!("{}", outcome.rendered);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn report(human: &bookscan_core::human_errors::HumanError) {
    eprintln!("{}", human.message);
    eprintln!("{}", human.suggestion);
}
