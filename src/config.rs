//! Pipeline configuration, read from `config.json5`.
//!
//! ```json5
//! {
//!   source: ["tokens/**/*.json"],
//!   platforms: {
//!     js: {
//!       transformGroup: "js",
//!       buildPath: "dist/",
//!       files: [{ destination: "tokens.js", format: "javascript/esm" }],
//!     },
//!   },
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use design_token_pipeline_core::FormatOptions;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "config.json5";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Glob patterns, relative to `base_dir`.
    pub source: Vec<String>,
    #[serde(default)]
    pub platforms: IndexMap<String, PlatformConfig>,
    /// Directory relative paths resolve against. Set by [`PipelineConfig::load`].
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    pub transform_group: Option<String>,
    /// Applied after the group's transforms, in order.
    #[serde(default)]
    pub transforms: Vec<String>,
    #[serde(default)]
    pub build_path: PathBuf,
    #[serde(default)]
    pub files: Vec<FileConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub destination: PathBuf,
    pub format: String,
    pub filter: Option<String>,
    #[serde(default)]
    pub options: FormatOptions,
}

impl PipelineConfig {
    pub fn parse(data: &str, path: &Path) -> Result<Self, ConfigError> {
        json5::from_str(data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&data, path)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    pub fn build_dir(&self, platform: &PlatformConfig) -> PathBuf {
        self.base_dir.join(&platform.build_path)
    }
}
