use thiserror::Error;

#[derive(Error, Debug)]
pub enum MutecutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Media processing error: {0}")]
    Media(String),

    #[error("Probe error: {0}")]
    Probe(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No silence detected in input")]
    NoSilence,

    #[error("No audible content remains after trimming")]
    NothingToKeep,
}

pub type Result<T> = std::result::Result<T, MutecutError>;
