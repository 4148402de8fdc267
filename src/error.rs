use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("\"{include}\" included more than once (inconsistently) in \"{path}:{line}\"")]
    InconsistentInclude {
        include: String,
        path: PathBuf,
        line: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StyleGuardError>;
