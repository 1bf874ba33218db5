use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input video file
    pub input: PathBuf,

    /// Split the input into chunks of this many seconds before trimming
    pub chunk_length: Option<f64>,

    /// Output file path (default: sibling of the input named <stem>_trimmed.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Detect silence and print the ffmpeg invocation without encoding
    #[arg(long)]
    pub dry_run: bool,

    /// Never use a hardware encoder, even when the ffmpeg build has one
    #[arg(long)]
    pub no_hardware: bool,
}
