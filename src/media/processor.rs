use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::Command;
use tracing::{info, debug};

use crate::config::MediaConfig;
use crate::error::{Result, MutecutError};
use super::{MediaProcessor, MediaCommand};

/// Concrete implementation of the media processor (ffmpeg/ffprobe-based)
pub struct FfmpegProcessor {
    config: MediaConfig,
}

impl FfmpegProcessor {
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }
}

// ffprobe -print_format json emits durations as strings
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: ProbeFormat,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: String,
}

fn parse_probe_duration(json: &str) -> Result<f64> {
    let probe: ProbeOutput = serde_json::from_str(json)?;
    probe
        .format
        .duration
        .trim()
        .parse::<f64>()
        .map_err(|e| MutecutError::Probe(format!("Invalid duration in probe output: {}", e)))
}

/// Extract the stream position from an ffmpeg `time=HH:MM:SS.cc` progress line
fn time_position(re: &Regex, line: &str) -> Option<f64> {
    let cap = re.captures(line)?;
    let hours = cap[1].parse::<f64>().ok()?;
    let minutes = cap[2].parse::<f64>().ok()?;
    let seconds = cap[3].parse::<f64>().ok()?;
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

#[async_trait]
impl MediaProcessor for FfmpegProcessor {
    async fn probe_duration(&self, path: &Path) -> Result<f64> {
        debug!("Probing duration of {}", path.display());

        let output = MediaCommand::new(&self.config.ffprobe_path, "Duration probe")
            .args(["-v", "error", "-print_format", "json"])
            .args(["-show_entries", "format=duration"])
            .output(path)
            .execute_capture()?;

        let duration = parse_probe_duration(&String::from_utf8_lossy(&output.stdout))?;
        debug!("Probed duration: {:.3}s", duration);
        Ok(duration)
    }

    /// Run the silencedetect filter over the input with a null muxer.
    ///
    /// The detector writes its markers to stderr interleaved with normal
    /// progress chatter; the whole stream is collected as the silence log
    /// while `time=` lines drive the progress bar.
    async fn detect_silence(
        &self,
        path: &Path,
        noise_db: f64,
        min_silence: f64,
        total_duration: f64,
    ) -> Result<String> {
        info!("Detecting silence in {}", path.display());

        let command = MediaCommand::new(&self.config.ffmpeg_path, "Silence detection")
            .input(path)
            .audio_filter(format!("silencedetect=noise={}dB:d={}", noise_db, min_silence))
            .null_output();

        let mut child = command.spawn_piped_stderr()?;
        let stderr = child.stderr.take().ok_or_else(|| {
            MutecutError::Media("Failed to capture silence detector output".to_string())
        })?;

        let time_re = Regex::new(r"time=(\d+):(\d+):(\d+(?:\.\d+)?)")?;

        let pb = ProgressBar::new(total_duration.ceil() as u64);
        pb.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}s/{len}s ({eta})")
            .unwrap()
            .progress_chars("#>-"));

        let mut log = String::new();
        for line in BufReader::new(stderr).lines() {
            let line = line?;
            if let Some(position) = time_position(&time_re, &line) {
                pb.set_position(position as u64);
            }
            log.push_str(&line);
            log.push('\n');
        }

        let status = child
            .wait()
            .map_err(|e| MutecutError::Media(format!("Silence detection failed: {}", e)))?;
        pb.finish_and_clear();

        if !status.success() {
            return Err(MutecutError::Media(format!(
                "Silence detection exited with {}",
                status
            )));
        }

        Ok(log)
    }

    fn trim_command(
        &self,
        input: &Path,
        filter_script: &Path,
        output: &Path,
        encoder_args: &[String],
    ) -> MediaCommand {
        MediaCommand::new(&self.config.ffmpeg_path, "Silence trim")
            .overwrite()
            .input(input)
            .filter_script(filter_script)
            .map("[v]")
            .map("[a]")
            .args(encoder_args.iter().cloned())
            .output(output)
    }

    fn concat_command(&self, list_path: &Path, output: &Path) -> MediaCommand {
        // +genpts regenerates timestamps so the copied chunks concatenate
        // without non-monotonic DTS warnings
        MediaCommand::new(&self.config.ffmpeg_path, "Chunk concatenation")
            .overwrite()
            .concat_input(list_path)
            .args(["-fflags", "+genpts"])
            .copy_streams()
            .output(output)
    }

    async fn cut_segment(
        &self,
        input: &Path,
        start: f64,
        length: f64,
        output: &Path,
    ) -> Result<()> {
        debug!("Cutting {:.3}s chunk at {:.3}s from {}", length, start, input.display());

        MediaCommand::new(&self.config.ffmpeg_path, "Chunk cut")
            .overwrite()
            .seek(start)
            .input(input)
            .limit(length)
            .copy_streams()
            .output(output)
            .execute()
    }

    async fn copy_through(&self, input: &Path, output: &Path) -> Result<()> {
        debug!("Copying {} through unchanged", input.display());

        MediaCommand::new(&self.config.ffmpeg_path, "Stream copy")
            .overwrite()
            .input(input)
            .copy_streams()
            .output(output)
            .execute()
    }

    async fn execute_command(&self, command: MediaCommand) -> Result<()> {
        info!("Executing media command: {}", command.description);
        command.execute()
    }

    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .output()
            .map_err(|e| MutecutError::Media(format!("ffmpeg not found: {}", e)))?;

        if output.status.success() {
            info!("ffmpeg is available");
            Ok(())
        } else {
            Err(MutecutError::Media("ffmpeg version check failed".to_string()))
        }
    }

    async fn version_info(&self) -> Result<String> {
        debug!("Getting ffmpeg version information");

        let output = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .output()
            .map_err(|e| MutecutError::Media(format!("Failed to execute ffmpeg: {}", e)))?;

        if output.status.success() {
            let version_info = String::from_utf8_lossy(&output.stdout);
            let first_line = version_info.lines().next().unwrap_or("Unknown version");
            Ok(first_line.to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(MutecutError::Media(format!("ffmpeg version check failed: {}", stderr)))
        }
    }
}
