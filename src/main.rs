//! Tubegrab - Self-Contained Video Downloader
//!
//! This is the main entry point for the tubegrab CLI, which stages the
//! bundled yt-dlp and ffmpeg executables at startup and drives them to
//! inspect video metadata and download video or audio streams.

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tokio::sync::mpsc::unbounded_channel;
use tubegrab::cli::{Args, Commands};
use tubegrab::config::Config;
use tubegrab::model::{DownloadRequest, DownloadStatus, MediaKind};
use tubegrab::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

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

    // Stage the bundled tools before anything user-facing happens; a missing
    // or unwritable payload aborts the run here.
    let workflow = Workflow::new(config).await?;

    match args.command {
        Commands::Info { url } => match workflow.fetch_info(&url).await {
            Ok(meta) => {
                println!("Title: {}", meta.title);
                println!("Uploader: {}", meta.uploader);
                println!("Duration: {}", meta.duration);
            }
            Err(e) => {
                warn!("Metadata fetch failed: {}", e);
                eprintln!("Failed to fetch video info: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Download { url, audio } => {
            let kind = if audio { MediaKind::Audio } else { MediaKind::Video };
            let request = DownloadRequest { url, kind };

            let (tx, mut rx) = unbounded_channel();
            let handle = workflow.start_download(request, tx)?;

            // The worker owns the process; the foreground only renders the
            // status channel and stays responsive.
            let spinner = ProgressBar::new_spinner();
            spinner.enable_steady_tick(Duration::from_millis(120));

            while let Some(status) = rx.recv().await {
                if status.is_terminal() {
                    spinner.finish_with_message(status.to_string());
                } else {
                    spinner.set_message(status.to_string());
                }
            }

            if let DownloadStatus::Failed(_) = handle.await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = std::env::current_dir()?.join(".tubegrab").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "tubegrab.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer().with_target(false);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
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
