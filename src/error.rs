//! Errors raised at the I/O boundary. Extraction itself never fails.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid glob pattern {pattern}: {source}")]
    Glob {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to parse navigation template {path}: {source}")]
    Navigation {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}
