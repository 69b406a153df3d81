//! CLI binary for anuvad.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `PipelineConfig` and prints results. No pipeline logic lives here.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use anuvad::{EngineOptions, EngineSet, PipelineConfig};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "anuvad",
    version,
    about = "Translate, summarise, and re-render scanned PDF documents",
    after_help = "Engine endpoints are read from ANUVAD_INFERENCE_HOST, \
                  ANUVAD_TRANSLATE_URL, and related ANUVAD_* variables."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline on a PDF and print the JSON record.
    Process {
        /// Path to the input PDF.
        input: PathBuf,

        /// Source-language code of the document.
        #[arg(long, default_value = "hi")]
        source_lang: String,

        /// Target-language code for translation.
        #[arg(long, default_value = "en")]
        target_lang: String,

        /// OCR language set (Tesseract notation).
        #[arg(long, default_value = "hin+eng")]
        ocr_languages: String,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },

    /// Render plain text into a paginated PDF.
    Render {
        /// Path to a UTF-8 text file, or '-' for stdin.
        input: String,

        /// Output PDF path.
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Process {
            input,
            source_lang,
            target_lang,
            ocr_languages,
            pretty,
        } => {
            let mut options = EngineOptions::from_env();
            options.source_language = source_lang.clone();
            options.target_language = target_lang.clone();

            let engines = EngineSet::initialize(&options).await;
            let config = PipelineConfig::builder()
                .source_language(source_lang)
                .target_language(target_lang)
                .ocr_languages(ocr_languages)
                .engines(Arc::new(engines))
                .build()
                .context("invalid configuration")?;

            let output = anuvad::process(&input, &config).await;

            let json = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{json}");
        }

        Command::Render { input, output } => {
            let text = if input == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading stdin")?;
                buf
            } else {
                std::fs::read_to_string(&input)
                    .with_context(|| format!("reading '{input}'"))?
            };

            let pdf = anuvad::render(&text).context("rendering document")?;
            std::fs::write(&output, &pdf)
                .with_context(|| format!("writing '{}'", output.display()))?;
            eprintln!("wrote {} bytes to {}", pdf.len(), output.display());
        }
    }

    Ok(())
}
