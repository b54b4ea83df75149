use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print title, uploader and duration for a video URL
    Info {
        /// Source video URL
        url: String,
    },

    /// Download a video to the working directory
    Download {
        /// Source video URL
        url: String,

        /// Download the best audio-only stream instead of video+audio
        #[arg(short, long)]
        audio: bool,
    },
}
