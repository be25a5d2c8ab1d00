//! Test-core HSS replay tool
//!
//! Loads the HSS configuration and the provisioned subscribers, answers a
//! single binary Update-Location-Request and writes the encoded
//! Update-Location-Answer.

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::sync::Arc;
use testcore_diameter::DiameterMessage;
use testcore_hssd::{HomeSubscriberServer, HssConfig, MemorySubscriberStore};

/// Test-core HSS - S6a Update-Location replay
#[derive(Parser, Debug)]
#[command(name = "testcore-hssd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Answers an S6a Update-Location-Request from a test-core HSS", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, default_value = "/etc/testcore/hss.yaml")]
    config: String,

    /// Provisioned subscribers file path
    #[arg(short = 's', long, default_value = "/etc/testcore/subscribers.yaml")]
    subscribers: String,

    /// Encoded Update-Location-Request
    #[arg(short = 'r', long)]
    request: String,

    /// Where to write the encoded answer (stdout when omitted)
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'e', long, default_value = "info")]
    log_level: String,

    /// Disable color output
    #[arg(short = 'm', long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args)?;

    log::info!("Test-core HSS v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = HssConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config))?;
    log::info!(
        "Loaded configuration for {} ({} profiles)",
        config.server.host,
        config.sub_profiles.len()
    );

    let store = MemorySubscriberStore::from_file(&args.subscribers)
        .with_context(|| format!("Failed to load subscribers from {}", args.subscribers))?;

    let raw = std::fs::read(&args.request)
        .with_context(|| format!("Failed to read request from {}", args.request))?;
    let mut buf = Bytes::from(raw);
    let request = DiameterMessage::decode(&mut buf)
        .with_context(|| format!("Failed to decode Diameter message in {}", args.request))?;

    let hss = HomeSubscriberServer::new(Arc::new(config), store);

    match &args.output {
        Some(path) => {
            let mut file =
                File::create(path).with_context(|| format!("Failed to create {}", path))?;
            hss.handle_ulr(&mut file, &request)
                .with_context(|| format!("Failed to write answer to {}", path))?;
            log::info!("Answer written to {}", path);
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            hss.handle_ulr(&mut lock, &request)
                .context("Failed to write answer to stdout")?;
            lock.flush()?;
        }
    }

    Ok(())
}

/// Initialize logging
fn init_logging(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    builder.filter_level(level);

    builder.format_timestamp_millis();

    if args.no_color {
        builder.write_style(env_logger::WriteStyle::Never);
    }

    // The answer may go to stdout
    builder.target(env_logger::Target::Stderr);

    builder.init();

    Ok(())
}
