//! Error types for watchlens-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the watchlens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Export is valid JSON but not the expected top-level shape
    #[error("invalid watch history: expected {expected}, found {found}")]
    InvalidShape {
        expected: &'static str,
        found: &'static str,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Export discovery error (bad glob pattern)
    #[error("discovery error: {0}")]
    Discovery(String),

    /// Directory contained no watch-history export
    #[error("no watch-history.json found under {0}")]
    NoExports(PathBuf),
}

/// Result type alias for watchlens-core
pub type Result<T> = std::result::Result<T, Error>;
