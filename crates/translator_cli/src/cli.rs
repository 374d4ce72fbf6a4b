use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "translate")]
#[command(about = "Upload a document to the translation service and fetch the translated copy")]
#[command(version)]
pub struct Cli {
    /// Configuration file (RON). Defaults to ./translator.ron when present.
    #[arg(short, long, global = true, env = "TRANSLATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write the log to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a document
    Translate {
        /// Document to translate
        file: PathBuf,
        /// Target language code (see `languages`)
        #[arg(short, long)]
        lang: String,
        /// Service root URL
        #[arg(short, long, env = "TRANSLATOR_SERVER")]
        server: Option<String>,
        /// Directory for the translated file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Anti-forgery token; fetched from the service when omitted
        #[arg(long, env = "TRANSLATOR_TOKEN")]
        token: Option<String>,
        /// Retries for failed progress checks
        #[arg(long)]
        retries: Option<u32>,
    },

    /// List the supported target languages
    Languages,

    /// Check a document against the upload limits without uploading it
    Check {
        /// Document to check
        file: PathBuf,
    },
}
