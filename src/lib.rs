//! Compiles design token sources into JavaScript, TypeScript and JSON theme modules.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod registry;

pub use config::{FileConfig, PipelineConfig, PlatformConfig};
pub use design_token_pipeline_core as tokens;
pub use error::{BuildError, ConfigError};
pub use pipeline::{build, clean, load_tokens, BuildReport, WrittenFile};
pub use registry::{Registry, Transform};
