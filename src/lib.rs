//! Mutecut - Silence Removal for Video Files
//!
//! Detects silent segments with ffmpeg's silencedetect filter and produces a
//! trimmed output with those segments removed, optionally chunking large
//! inputs and using a hardware encoder when the local ffmpeg build has one.

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod hardware;
pub mod media;
pub mod segments;
pub mod silence;
pub mod workflow;
