use std::process::Command;
use tracing::{debug, warn};

/// Check whether the local ffmpeg build carries the given encoder.
///
/// Runs `ffmpeg -hide_banner -encoders` and substring-checks the listing.
/// Any probe failure counts as unavailable rather than an error, so a broken
/// or missing ffmpeg surfaces later through the availability check instead.
pub fn encoder_available(ffmpeg_path: &str, encoder: &str) -> bool {
    let output = match Command::new(ffmpeg_path)
        .args(["-hide_banner", "-encoders"])
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            warn!("Encoder probe could not run {}: {}", ffmpeg_path, e);
            return false;
        }
    };

    if !output.status.success() {
        warn!("Encoder probe exited with {}", output.status);
        return false;
    }

    let available = listing_contains_encoder(&String::from_utf8_lossy(&output.stdout), encoder);
    debug!("Encoder {} available: {}", encoder, available);
    available
}

fn listing_contains_encoder(listing: &str, encoder: &str) -> bool {
    listing.contains(encoder)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODER_LISTING: &str = "\
Encoders:
 V....D libx264              libx264 H.264 / AVC / MPEG-4 AVC
 V....D h264_nvenc           NVIDIA NVENC H.264 encoder (codec h264)
 A....D aac                  AAC (Advanced Audio Coding)
";

    #[test]
    fn test_listing_match() {
        assert!(listing_contains_encoder(ENCODER_LISTING, "h264_nvenc"));
        assert!(listing_contains_encoder(ENCODER_LISTING, "libx264"));
        assert!(!listing_contains_encoder(ENCODER_LISTING, "hevc_nvenc"));
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        assert!(!encoder_available("/nonexistent/ffmpeg", "h264_nvenc"));
    }
}
