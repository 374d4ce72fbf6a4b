//! Command-line client for the document translation service.
mod app;
mod cli;
mod config;
mod effects;
mod render;

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use translator_core::{truncate_display_name, LANGUAGES};
use translator_logging::{app_error, LogDestination};

use crate::app::Outcome;
use crate::cli::{Cli, Commands};
use crate::config::AppConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let destination = match cli.log_file.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    translator_logging::initialize(destination, level);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            app_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Languages => {
            for language in LANGUAGES {
                println!("{:<6} {}", language.code, language.name);
            }
            Ok(true)
        }
        Commands::Check { file } => match app::check_file(&config.client, &file)? {
            Ok(()) => {
                println!("{} can be uploaded", file.display());
                Ok(true)
            }
            Err(message) => {
                eprintln!("{message}");
                Ok(false)
            }
        },
        Commands::Translate {
            file,
            lang,
            server,
            output,
            token,
            retries,
        } => {
            if let Some(server) = server {
                config.server.base_url = server;
            }
            if let Some(output) = output {
                config.output_dir = Some(output);
            }
            if token.is_some() {
                config.server.csrf_token = token;
            }
            if let Some(retries) = retries {
                config.server.poll_retries = retries;
            }

            let display = config.client.display;
            let shown = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!(
                "Translating {} to {}",
                truncate_display_name(&shown, display.max_len, display.tail_len),
                lang.to_ascii_uppercase()
            );

            match app::run_translation(&config, &file, &lang)? {
                Outcome::Saved => Ok(true),
                Outcome::Cancelled => {
                    eprintln!("Translation cancelled");
                    Ok(false)
                }
                Outcome::Failed(message) => {
                    eprintln!("Translation failed: {message}");
                    Ok(false)
                }
            }
        }
    }
}
