//! Error types for Lodestar
//!
//! The analysis path itself never fails; these errors come from loading
//! configuration and response sets.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    #[error("Unknown insight category: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, Error>;
