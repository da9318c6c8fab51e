use std::path::PathBuf;

use design_token_pipeline_core::TokenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {}: {source}", path.display())]
    Parse { path: PathBuf, source: json5::Error },
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid source pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("Failed to read source path: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("Failed to parse token source {}: {message}", path.display())]
    Source { path: PathBuf, message: String },
    #[error("Unknown platform `{0}`")]
    UnknownPlatform(String),
    #[error("Unknown format `{0}`")]
    UnknownFormat(String),
    #[error("Unknown filter `{0}`")]
    UnknownFilter(String),
    #[error("Unknown transform `{0}`")]
    UnknownTransform(String),
    #[error("Unknown transform group `{0}`")]
    UnknownTransformGroup(String),
    #[error(transparent)]
    Token(#[from] TokenError),
}
