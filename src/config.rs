use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, MutecutError};

// Default for the shortest keep interval worth emitting: one frame at 30fps
fn default_min_keep() -> f64 {
    1.0 / 30.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub detect: DetectConfig,
    pub encode: EncodeConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectConfig {
    /// Loudness threshold in dB below which audio counts as silence
    pub noise_db: f64,
    /// Minimum duration in seconds for a gap to count as silence
    pub min_silence: f64,
    /// Keep intervals shorter than this many seconds are dropped
    #[serde(default = "default_min_keep")]
    pub min_keep: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeConfig {
    /// Software video encoder used for the trimmed output
    pub video_codec: String,
    /// Hardware encoder to probe for and prefer when present
    pub hardware_codec: String,
    /// Use the hardware encoder when the local ffmpeg build carries it
    pub use_hardware: bool,
    /// Additional encoding options appended to the trim invocation
    /// Common options: ["-preset", "medium", "-crf", "23", "-pix_fmt", "yuv420p"]
    pub extra_options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub ffmpeg_path: String,
    /// Path to ffprobe binary
    pub ffprobe_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detect: DetectConfig {
                noise_db: -30.0,
                min_silence: 0.5,
                min_keep: default_min_keep(),
            },
            encode: EncodeConfig {
                video_codec: "libx264".to_string(),
                hardware_codec: "h264_nvenc".to_string(),
                use_hardware: true,
                extra_options: vec![],
            },
            media: MediaConfig {
                ffmpeg_path: "ffmpeg".to_string(),
                ffprobe_path: "ffprobe".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MutecutError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| MutecutError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MutecutError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| MutecutError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.detect.noise_db, -30.0);
        assert_eq!(config.detect.min_silence, 0.5);
        assert_eq!(config.encode.video_codec, "libx264");
        assert_eq!(config.encode.hardware_codec, "h264_nvenc");
        assert!(config.encode.use_hardware);
        assert_eq!(config.media.ffmpeg_path, "ffmpeg");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.detect.noise_db, config.detect.noise_db);
        assert_eq!(parsed.encode.hardware_codec, config.encode.hardware_codec);
        assert_eq!(parsed.media.ffprobe_path, config.media.ffprobe_path);
    }

    #[test]
    fn test_min_keep_defaults_when_absent() {
        let parsed: Config = toml::from_str(
            r#"
            [detect]
            noise_db = -35.0
            min_silence = 1.0

            [encode]
            video_codec = "libx264"
            hardware_codec = "h264_nvenc"
            use_hardware = false
            extra_options = []

            [media]
            ffmpeg_path = "ffmpeg"
            ffprobe_path = "ffprobe"
            "#,
        )
        .unwrap();
        assert!((parsed.detect.min_keep - 1.0 / 30.0).abs() < 1e-9);
        assert!(!parsed.encode.use_hardware);
    }
}
