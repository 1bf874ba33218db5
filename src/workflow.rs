use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, debug};

use crate::config::Config;
use crate::error::{Result, MutecutError};
use crate::filter::build_filter_complex;
use crate::hardware;
use crate::media::{MediaProcessor, MediaProcessorFactory};
use crate::segments::{compute_stats, invert_silence};
use crate::silence::parse_silence_log;

/// End-of-run figures reported to the user.
#[derive(Debug, Clone)]
pub struct TrimSummary {
    pub output: PathBuf,
    pub input_duration: f64,
    pub output_duration: f64,
}

impl TrimSummary {
    pub fn removed_duration(&self) -> f64 {
        (self.input_duration - self.output_duration).max(0.0)
    }

    pub fn removed_percent(&self) -> f64 {
        if self.input_duration > 0.0 {
            self.removed_duration() / self.input_duration * 100.0
        } else {
            0.0
        }
    }
}

/// What became of one piece of media after detection.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PieceOutcome {
    /// Silence was found and trimmed out
    Trimmed,
    /// No silence found, piece copied through unchanged
    Copied,
    /// Nothing but silence, piece dropped entirely
    AllSilent,
}

pub struct Workflow {
    config: Config,
    media: Box<dyn MediaProcessor>,
    encoder_args: Vec<String>,
}

impl Workflow {
    pub fn new(config: Config, no_hardware: bool) -> Result<Self> {
        let media = MediaProcessorFactory::create_processor(config.media.clone());

        // Check dependencies
        media.check_availability()?;

        let encoder_args = resolve_encoder_args(&config, no_hardware);

        Ok(Self {
            config,
            media,
            encoder_args,
        })
    }

    /// Trim silence out of a single input file.
    ///
    /// Returns `None` for a dry run, which stops after printing the
    /// invocations that would have produced output.
    pub async fn run(
        &self,
        input: &Path,
        chunk_length: Option<f64>,
        output: Option<&Path>,
        dry_run: bool,
    ) -> Result<Option<TrimSummary>> {
        if !input.exists() {
            return Err(MutecutError::FileNotFound(input.display().to_string()));
        }

        let output = match output {
            Some(path) => path.to_path_buf(),
            None => default_output_path(input)?,
        };

        if let Ok(version) = self.media.version_info().await {
            debug!("Media tool: {}", version);
        }

        let input_duration = self.media.probe_duration(input).await?;
        info!("Input {} runs {:.2}s", input.display(), input_duration);

        match chunk_length {
            Some(length) if length <= 0.0 => {
                return Err(MutecutError::Config(
                    "Chunk length must be positive".to_string(),
                ));
            }
            Some(length) if length < input_duration => {
                self.run_chunked(input, input_duration, length, &output, dry_run)
                    .await?;
            }
            _ => {
                if chunk_length.is_some() {
                    debug!("Chunk length covers the whole input, trimming in one pass");
                }
                self.trim_piece(input, input_duration, &output, dry_run, true)
                    .await?;
            }
        }

        if dry_run {
            return Ok(None);
        }

        let output_duration = self.media.probe_duration(&output).await?;
        let summary = TrimSummary {
            output,
            input_duration,
            output_duration,
        };

        info!(
            "Removed {:.2}s of silence ({:.1}% of the input)",
            summary.removed_duration(),
            summary.removed_percent()
        );

        Ok(Some(summary))
    }

    /// Detect, invert and trim one piece of media.
    ///
    /// With `require_silence` a silence-free piece is an error (the
    /// single-file case); without it the piece is copied through unchanged
    /// and an all-silent piece is dropped (chunks of a larger run).
    async fn trim_piece(
        &self,
        input: &Path,
        duration: f64,
        output: &Path,
        dry_run: bool,
        require_silence: bool,
    ) -> Result<PieceOutcome> {
        let log = self
            .media
            .detect_silence(
                input,
                self.config.detect.noise_db,
                self.config.detect.min_silence,
                duration,
            )
            .await?;

        let spans = parse_silence_log(&log, duration)?;
        if spans.is_empty() {
            if require_silence {
                return Err(MutecutError::NoSilence);
            }
            info!("No silence in {}, passing through", input.display());
            if !dry_run {
                self.media.copy_through(input, output).await?;
            }
            return Ok(PieceOutcome::Copied);
        }

        let detected: f64 = spans.iter().map(|s| s.duration()).sum();
        info!(
            "Detected {} silence spans totalling {:.2}s in {}",
            spans.len(),
            detected,
            input.display()
        );

        let intervals = invert_silence(&spans, duration, self.config.detect.min_keep);
        if intervals.is_empty() {
            if require_silence {
                return Err(MutecutError::NothingToKeep);
            }
            info!("Nothing audible in {}, dropping it", input.display());
            return Ok(PieceOutcome::AllSilent);
        }

        let stats = compute_stats(&intervals, duration);
        info!(
            "Keeping {} intervals, {:.2}s of {:.2}s ({:.1}% removed)",
            stats.keep_count,
            stats.kept_duration,
            stats.total_duration,
            stats.removed_percent()
        );

        let mut script = tempfile::NamedTempFile::new()?;
        script.write_all(build_filter_complex(&intervals).as_bytes())?;
        script.flush()?;

        let command = self
            .media
            .trim_command(input, script.path(), output, &self.encoder_args);

        if dry_run {
            println!("{}", command.command_line());
            return Ok(PieceOutcome::Trimmed);
        }

        self.media.execute_command(command).await?;
        Ok(PieceOutcome::Trimmed)
    }

    /// Split the input into stream-copied chunks, trim each independently,
    /// and concatenate the results with the concat demuxer.
    async fn run_chunked(
        &self,
        input: &Path,
        input_duration: f64,
        chunk_length: f64,
        output: &Path,
        dry_run: bool,
    ) -> Result<()> {
        let chunk_count = (input_duration / chunk_length).ceil() as usize;
        info!(
            "Splitting {:.2}s input into {} chunks of up to {:.2}s",
            input_duration, chunk_count, chunk_length
        );

        let workspace = tempfile::tempdir()?;
        let extension = input.extension().and_then(|e| e.to_str()).unwrap_or("mp4");

        let mut silence_found = false;
        let mut pieces = Vec::with_capacity(chunk_count);

        for index in 0..chunk_count {
            let start = index as f64 * chunk_length;
            let chunk_path = workspace
                .path()
                .join(format!("chunk_{:03}.{}", index, extension));
            self.media
                .cut_segment(input, start, chunk_length, &chunk_path)
                .await?;

            // Stream copy lands on keyframes, so the chunk's real length can
            // differ from the requested one
            let chunk_duration = self.media.probe_duration(&chunk_path).await?;

            let trimmed_path = workspace
                .path()
                .join(format!("trimmed_{:03}.{}", index, extension));
            match self
                .trim_piece(&chunk_path, chunk_duration, &trimmed_path, dry_run, false)
                .await?
            {
                PieceOutcome::Trimmed => {
                    silence_found = true;
                    pieces.push(trimmed_path);
                }
                PieceOutcome::Copied => pieces.push(trimmed_path),
                PieceOutcome::AllSilent => silence_found = true,
            }
        }

        if pieces.is_empty() {
            return Err(MutecutError::NothingToKeep);
        }
        if !silence_found {
            return Err(MutecutError::NoSilence);
        }

        let list_path = workspace.path().join("concat.txt");
        let mut list = String::new();
        for piece in &pieces {
            list.push_str(&format!("file '{}'\n", piece.display()));
        }
        fs::write(&list_path, list).await?;

        let command = self.media.concat_command(&list_path, output);

        if dry_run {
            println!("{}", command.command_line());
            return Ok(());
        }

        self.media.execute_command(command).await?;

        // The workspace and its chunk files are removed when the guard drops
        Ok(())
    }
}

fn resolve_encoder_args(config: &Config, no_hardware: bool) -> Vec<String> {
    let encode = &config.encode;

    let codec = if !no_hardware
        && encode.use_hardware
        && hardware::encoder_available(&config.media.ffmpeg_path, &encode.hardware_codec)
    {
        info!("Using hardware encoder {}", encode.hardware_codec);
        encode.hardware_codec.clone()
    } else {
        info!("Using software encoder {}", encode.video_codec);
        encode.video_codec.clone()
    };

    let mut args = vec!["-c:v".to_string(), codec];
    args.extend(encode.extra_options.iter().cloned());
    args
}

fn default_output_path(input: &Path) -> Result<PathBuf> {
    let stem = input.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
        MutecutError::Config(format!(
            "Cannot derive an output name from {}",
            input.display()
        ))
    })?;
    let extension = input.extension().and_then(|e| e.to_str()).unwrap_or("mp4");
    let file_name = format!("{}_trimmed.{}", stem, extension);

    Ok(match input.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from(file_name),
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("/videos/talk.mp4")).unwrap();
        assert_eq!(path, PathBuf::from("/videos/talk_trimmed.mp4"));
    }

    #[test]
    fn test_default_output_path_bare_name() {
        let path = default_output_path(Path::new("talk.mkv")).unwrap();
        assert_eq!(path, PathBuf::from("talk_trimmed.mkv"));
    }

    #[test]
    fn test_default_output_path_no_extension() {
        let path = default_output_path(Path::new("/videos/talk")).unwrap();
        assert_eq!(path, PathBuf::from("/videos/talk_trimmed.mp4"));
    }

    #[test]
    fn test_encoder_args_software_fallback() {
        let mut config = Config::default();
        // Probe against a binary that cannot exist: hardware unavailable
        config.media.ffmpeg_path = "/nonexistent/ffmpeg".to_string();
        config.encode.extra_options = vec!["-preset".to_string(), "fast".to_string()];

        let args = resolve_encoder_args(&config, false);
        assert_eq!(args, vec!["-c:v", "libx264", "-preset", "fast"]);
    }

    #[test]
    fn test_encoder_args_no_hardware_flag() {
        let config = Config::default();
        let args = resolve_encoder_args(&config, true);
        assert_eq!(args, vec!["-c:v", "libx264"]);
    }

    #[test]
    fn test_summary_figures() {
        let summary = TrimSummary {
            output: PathBuf::from("out.mp4"),
            input_duration: 120.0,
            output_duration: 90.0,
        };
        assert!((summary.removed_duration() - 30.0).abs() < 1e-9);
        assert!((summary.removed_percent() - 25.0).abs() < 1e-9);
    }
}
