//! carlex-ner - Thread preprocessing job
//!
//! Reads scraped discussion threads, extracts car brand and model mentions
//! sentence by sentence, and writes annotated threads for downstream analysis.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use carlex_common::config::{load_config, resolve_dictionary_path, LoggingConfig};
use carlex_common::ReferenceDictionary;
use carlex_ner::job::JobRunner;
use carlex_ner::tagger::build_tagger;
use carlex_ner::Pipeline;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_INPUT_DIR: &str = "data/raw_data";
const DEFAULT_OUTPUT_DIR: &str = "data/preprocessed_data";

/// Command-line arguments for carlex-ner
#[derive(Parser, Debug)]
#[command(name = "carlex-ner")]
#[command(about = "Car brand/model entity extraction for discussion threads")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "CARLEX_CONFIG")]
    config: Option<PathBuf>,

    /// Reference dictionary (JSON or TOML)
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Directory of raw thread files
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory for preprocessed thread files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!("Starting carlex-ner v{}", env!("CARGO_PKG_VERSION"));

    // Step 1: Reference dictionary (required)
    let dictionary_path = resolve_dictionary_path(args.dictionary.as_deref(), &config);
    let dictionary = ReferenceDictionary::load(&dictionary_path).with_context(|| {
        format!("Failed to load reference dictionary {}", dictionary_path.display())
    })?;

    // Step 2: Tagger backend
    let tagger = build_tagger(&config.tagger, config.tagger_api_token())
        .context("Failed to initialize tagger")?;
    if tagger.is_available() {
        info!("Tagger: {}", tagger.tagger_id());
    } else {
        warn!("Tagger {} reports unavailable; sections will fail", tagger.tagger_id());
    }

    // Step 3: Pipeline and job
    let pipeline = Pipeline::from_config(Arc::new(dictionary), tagger, &config);
    let runner = JobRunner::new(pipeline, &config.job);

    let input_dir = resolve_dir(args.input_dir, config.job.input_dir.clone(), DEFAULT_INPUT_DIR);
    let output_dir = resolve_dir(args.output_dir, config.job.output_dir.clone(), DEFAULT_OUTPUT_DIR);

    let summary = runner
        .run(&input_dir, &output_dir)
        .await
        .with_context(|| format!("Preprocessing {} failed", input_dir.display()))?;

    info!(
        "Done: {} unique car brands, {} unique car models across {} files",
        summary.coverage.brand_count(),
        summary.coverage.model_count(),
        summary.files
    );
    Ok(())
}

/// CLI → TOML → default
fn resolve_dir(cli: Option<PathBuf>, toml: Option<PathBuf>, default: &str) -> PathBuf {
    cli.or(toml).unwrap_or_else(|| Path::new(default).to_path_buf())
}

/// RUST_LOG overrides the configured level; a log file replaces stderr output
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("carlex_ner={0},carlex_common={0}", logging.level)));

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}
