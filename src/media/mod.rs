// Media subprocess layer
//
// Everything that touches the external ffmpeg/ffprobe binaries lives here:
// - Commands: argument-vector builder and execution
// - Processor: the ffmpeg-backed implementation of the operations

pub mod commands;
pub mod processor;

use async_trait::async_trait;
use std::path::Path;

pub use commands::*;
pub use processor::*;

use crate::config::MediaConfig;
use crate::error::Result;

/// Main trait for media processing operations
#[async_trait]
pub trait MediaProcessor: Send + Sync {
    /// Probe the duration of a media file in seconds
    async fn probe_duration(&self, path: &Path) -> Result<f64>;

    /// Run silence detection and return the detector's diagnostic log
    async fn detect_silence(
        &self,
        path: &Path,
        noise_db: f64,
        min_silence: f64,
        total_duration: f64,
    ) -> Result<String>;

    /// Build the trim invocation for a prepared filter script
    fn trim_command(
        &self,
        input: &Path,
        filter_script: &Path,
        output: &Path,
        encoder_args: &[String],
    ) -> MediaCommand;

    /// Build the concat-demuxer invocation for a prepared list file
    fn concat_command(&self, list_path: &Path, output: &Path) -> MediaCommand;

    /// Extract a stream-copied segment of the input
    async fn cut_segment(
        &self,
        input: &Path,
        start: f64,
        length: f64,
        output: &Path,
    ) -> Result<()>;

    /// Copy the input to the output without re-encoding
    async fn copy_through(&self, input: &Path, output: &Path) -> Result<()>;

    /// Execute a previously built command
    async fn execute_command(&self, command: MediaCommand) -> Result<()>;

    /// Check if the media tool is available
    fn check_availability(&self) -> Result<()>;

    /// Get media tool version information
    async fn version_info(&self) -> Result<String>;
}

/// Factory for creating media processor instances
pub struct MediaProcessorFactory;

impl MediaProcessorFactory {
    /// Create the default media processor implementation (ffmpeg-based)
    pub fn create_processor(config: MediaConfig) -> Box<dyn MediaProcessor> {
        Box::new(processor::FfmpegProcessor::new(config))
    }
}
