//! Mutecut - Silence Removal for Video Files
//!
//! This is the main entry point for the mutecut command-line tool, which
//! removes silent segments from a video file by driving external
//! ffmpeg/ffprobe binaries.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use mutecut::cli::Args;
use mutecut::config::Config;
use mutecut::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    info!("Starting mutecut");

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load config.toml from current directory first
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    // Create workflow instance, which verifies ffmpeg is reachable
    let workflow = Workflow::new(config, args.no_hardware)?;

    let summary = workflow
        .run(
            &args.input,
            args.chunk_length,
            args.output.as_deref(),
            args.dry_run,
        )
        .await?;

    match summary {
        Some(summary) => {
            println!(
                "Silence removed successfully, output saved to {}",
                summary.output.display()
            );
            println!(
                "Total duration removed: {:.2} seconds ({:.1}% of the input)",
                summary.removed_duration(),
                summary.removed_percent()
            );
        }
        None => {
            println!("Dry run complete, no output produced");
        }
    }

    info!("Mutecut completed successfully");
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let mutecut_dir = std::env::current_dir()?.join(".mutecut");
    let log_dir = mutecut_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "mutecut.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    // Setup layered subscriber
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    // Initialize the subscriber
    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
