//! Chat CLI
//!
//! Resolves messages against a phrasebook dataset and prints one JSON reply
//! per message.
//!
//! Usage:
//!   cargo run --features cli --bin chat_cli -- --data data/sesotho.json "how do i say hello"
//!
//!   # Interactive: one message per stdin line
//!   cargo run --features cli --bin chat_cli -- --data data/sesotho.json --threshold 80

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use explore_chat::{load_store, ChatEngine, ChatService, EngineConfig, NoopChatLog};

/// Phrasebook chat from the command line
#[derive(Parser, Debug)]
#[command(name = "chat_cli")]
#[command(about = "Resolve messages against a phrasebook dataset")]
struct Args {
    /// Dataset JSON file (falls back to EXPLORE_CHAT_DATA / config file)
    #[arg(long, short = 'd')]
    data: Option<PathBuf>,

    /// Minimum fuzzy similarity (0-100)
    #[arg(long, short = 't', value_parser = clap::value_parser!(u8).range(0..=100))]
    threshold: Option<u8>,

    /// YAML config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Message to resolve; reads stdin lines when omitted
    message: Option<String>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config = config.with_fuzzy_threshold(threshold);
    }
    if let Some(data) = args.data {
        config.data_path = Some(data);
    }
    config.validate()?;

    let data_path = config
        .data_path
        .clone()
        .context("No dataset given (use --data or EXPLORE_CHAT_DATA)")?;
    let (store, summary) = load_store(&data_path)
        .with_context(|| format!("Failed to import {}", data_path.display()))?;
    info!(items = summary.items, "Dataset loaded");

    let engine = ChatEngine::new(Arc::new(store)).with_fuzzy_threshold(config.fuzzy_threshold);
    // replies already go to stdout
    let service = ChatService::new(engine, Arc::new(NoopChatLog));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(message) = args.message {
        respond(&service, &message, &mut out)?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        respond(&service, &line, &mut out)?;
    }
    Ok(())
}

fn respond(service: &ChatService, message: &str, out: &mut impl Write) -> Result<()> {
    let reply = service.handle(message)?;
    writeln!(out, "{}", serde_json::to_string(&reply)?)?;
    out.flush()?;
    Ok(())
}
