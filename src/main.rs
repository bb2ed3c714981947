use anyhow::{Context, Result};
use clap::Parser;
use langwrap::{LanguageConfig, RunWrapEngine};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "langwrap")]
#[command(about = "Wrap target-language text runs in directional markup")]
#[command(version)]
struct Args {
    /// Input file to transform; reads stdin when omitted
    input: Option<PathBuf>,

    /// Language code whose runs receive directional wrappers
    /// (overrides the config file; built-in default is "he")
    #[arg(long)]
    target_lang: Option<String>,

    /// JSON file overriding the built-in language tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit markup for legacy rendering engines (explicit rtl direction,
    /// non-breaking-space number handling)
    #[arg(long)]
    legacy_quirks: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging enables observability and debugging in production
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    info!("Starting langwrap");
    info!(?args, "Parsed CLI arguments");

    // WHY: validate configuration early to fail fast with a clear error
    let mut config = match &args.config {
        Some(path) => LanguageConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => LanguageConfig::default(),
    };
    if let Some(code) = &args.target_lang {
        config.target_language = code.clone();
    }
    if args.legacy_quirks {
        config.legacy_quirks = true;
    }

    let engine = RunWrapEngine::new(&config).with_context(|| {
        format!(
            "Invalid configuration for target '{}'",
            config.target_language
        )
    })?;

    let text = match &args.input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let mut total_lines = 0u64;
    let mut wrapped_lines = 0u64;

    for line in text.lines() {
        let transformed = engine.transform(line);
        if transformed != line {
            wrapped_lines += 1;
        }
        total_lines += 1;
        println!("{transformed}");
    }

    info!(
        "Transform complete: {} lines processed, {} lines wrapped",
        total_lines, wrapped_lines
    );

    Ok(())
}
