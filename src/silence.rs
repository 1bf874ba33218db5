use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// A detected span of silence, in seconds from stream start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceSpan {
    pub start: f64,
    pub end: f64,
}

impl SilenceSpan {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Parse ffmpeg silencedetect output into silence spans.
///
/// The detector interleaves its markers with ordinary encoder chatter, so the
/// log is scanned line by line, pairing each `silence_start:` with the next
/// `silence_end:`. A trailing `silence_start` without a matching end means
/// the input ends in silence; that span is closed at `total_duration`.
pub fn parse_silence_log(log: &str, total_duration: f64) -> Result<Vec<SilenceSpan>> {
    // silencedetect can report a slightly negative first start
    let start_re = Regex::new(r"silence_start:\s*(-?\d+(?:\.\d+)?)")?;
    let end_re = Regex::new(r"silence_end:\s*(-?\d+(?:\.\d+)?)")?;

    let mut spans = Vec::new();
    let mut open_start: Option<f64> = None;

    for line in log.lines() {
        if let Some(cap) = start_re.captures(line) {
            if let Ok(start) = cap[1].parse::<f64>() {
                open_start = Some(start.max(0.0));
            }
        } else if let Some(cap) = end_re.captures(line) {
            if let (Some(start), Ok(end)) = (open_start.take(), cap[1].parse::<f64>()) {
                if end > start {
                    spans.push(SilenceSpan { start, end });
                }
            }
        }
    }

    if let Some(start) = open_start {
        if total_duration > start {
            spans.push(SilenceSpan {
                start,
                end: total_duration,
            });
        }
    }

    debug!("Parsed {} silence spans from detector log", spans.len());
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LOG: &str = "\
ffmpeg version 6.1 Copyright (c) 2000-2023 the FFmpeg developers
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'talk.mp4':
  Duration: 00:01:00.00, start: 0.000000, bitrate: 2507 kb/s
[silencedetect @ 0x55c] silence_start: 4.51102
[silencedetect @ 0x55c] silence_end: 6.0243 | silence_duration: 1.51329
frame=  240 fps=120 q=-0.0 size=N/A time=00:00:10.00 bitrate=N/A speed=5.0x
[silencedetect @ 0x55c] silence_start: 12.3
[silencedetect @ 0x55c] silence_end: 14.75 | silence_duration: 2.45
size=N/A time=00:01:00.00 bitrate=N/A speed=5.2x
";

    #[test]
    fn test_parse_paired_markers() {
        let spans = parse_silence_log(SAMPLE_LOG, 60.0).unwrap();
        assert_eq!(spans.len(), 2);
        assert!((spans[0].start - 4.51102).abs() < 1e-9);
        assert!((spans[0].end - 6.0243).abs() < 1e-9);
        assert!((spans[1].start - 12.3).abs() < 1e-9);
        assert!((spans[1].end - 14.75).abs() < 1e-9);
    }

    #[test]
    fn test_trailing_start_closed_at_duration() {
        let log = "\
[silencedetect @ 0x1] silence_start: 2.0
[silencedetect @ 0x1] silence_end: 3.0 | silence_duration: 1.0
[silencedetect @ 0x1] silence_start: 55.5
";
        let spans = parse_silence_log(log, 60.0).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1], SilenceSpan { start: 55.5, end: 60.0 });
    }

    #[test]
    fn test_no_markers() {
        let log = "frame=  240 fps=120 q=-0.0 size=N/A time=00:00:10.00\n";
        let spans = parse_silence_log(log, 60.0).unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_negative_start_clamped() {
        let log = "\
[silencedetect @ 0x1] silence_start: -0.023021
[silencedetect @ 0x1] silence_end: 1.5 | silence_duration: 1.523
";
        let spans = parse_silence_log(log, 60.0).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 0.0);
    }

    #[test]
    fn test_unmatched_end_ignored() {
        let log = "[silencedetect @ 0x1] silence_end: 3.0 | silence_duration: 1.0\n";
        let spans = parse_silence_log(log, 60.0).unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_span_duration() {
        let span = SilenceSpan { start: 1.5, end: 4.0 };
        assert!((span.duration() - 2.5).abs() < 1e-9);
    }
}
