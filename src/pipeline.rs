//! Loads token sources, runs each platform's transforms, filters and formats, and
//! writes the results.

use std::{
    fs,
    path::{Path, PathBuf},
};

use design_token_pipeline_core::{Token, TokenOrGroup};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::{
    config::{PipelineConfig, PlatformConfig},
    error::BuildError,
    registry::Registry,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub platform: String,
    pub path: PathBuf,
    pub token_count: usize,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub files: Vec<WrittenFile>,
}

fn read_source(path: &Path) -> Result<TokenOrGroup, BuildError> {
    let data = fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = match path.extension().and_then(|x| x.to_str()) {
        Some("json5") => json5::from_str(&data).map_err(|err| err.to_string()),
        _ => serde_json::from_str(&data).map_err(|err| err.to_string()),
    };
    parsed.map_err(|message| BuildError::Source {
        path: path.to_path_buf(),
        message,
    })
}

/// Every source file's tokens, in source order. A token redefined by a later file
/// keeps its original position and takes the later definition.
pub fn load_tokens(config: &PipelineConfig) -> Result<Vec<Token>, BuildError> {
    let mut tokens: IndexMap<Vec<String>, Token> = IndexMap::new();
    for pattern in &config.source {
        let full_pattern = config.base_dir.join(pattern);
        let full_pattern = full_pattern.to_string_lossy();
        let paths = glob::glob(&full_pattern).map_err(|source| BuildError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        for path in paths {
            let path = path?;
            debug!(path = %path.display(), "reading token source");
            for token in read_source(&path)?.flatten(Some(path.as_path())) {
                if let Some(previous) = tokens.insert(token.path.clone(), token) {
                    warn!(
                        token = %previous.path.join("."),
                        previous = ?previous.file_path,
                        "token redefined by a later source"
                    );
                }
            }
        }
    }
    Ok(tokens.into_iter().map(|(_, token)| token).collect())
}

fn selected_platforms<'a>(
    config: &'a PipelineConfig,
    names: &[String],
) -> Result<Vec<(&'a str, &'a PlatformConfig)>, BuildError> {
    if names.is_empty() {
        return Ok(config
            .platforms
            .iter()
            .map(|(name, platform)| (name.as_str(), platform))
            .collect());
    }
    names
        .iter()
        .map(|name| {
            config
                .platforms
                .get_key_value(name)
                .map(|(name, platform)| (name.as_str(), platform))
                .ok_or_else(|| BuildError::UnknownPlatform(name.clone()))
        })
        .collect()
}

/// Fails on the first unknown name so nothing is written for a broken config.
fn validate(
    registry: &Registry,
    platforms: &[(&str, &PlatformConfig)],
) -> Result<(), BuildError> {
    for (_, platform) in platforms {
        registry.platform_transforms(platform)?;
        for file in &platform.files {
            registry.format(&file.format)?;
            if let Some(filter) = &file.filter {
                registry.filter(filter)?;
            }
        }
    }
    Ok(())
}

pub fn build_platform(
    config: &PipelineConfig,
    registry: &Registry,
    name: &str,
    platform: &PlatformConfig,
    tokens: &[Token],
) -> Result<Vec<WrittenFile>, BuildError> {
    let mut tokens = tokens.to_vec();
    for (transform_name, transform) in registry.platform_transforms(platform)? {
        debug!(platform = name, transform = transform_name, "applying transform");
        for token in &mut tokens {
            transform.apply(token)?;
        }
    }

    let build_dir = config.build_dir(platform);
    let mut written = Vec::new();
    for file in &platform.files {
        let selected: Vec<Token> = match &file.filter {
            Some(filter) => {
                let filter = registry.filter(filter)?;
                tokens.iter().filter(|&token| filter(token)).cloned().collect()
            }
            None => tokens.clone(),
        };
        let format = registry.format(&file.format)?;
        let output = format(selected.as_slice(), &file.options)?;

        let path = build_dir.join(&file.destination);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, output).map_err(|source| BuildError::Io {
            path: path.clone(),
            source,
        })?;
        info!(
            platform = name,
            format = %file.format,
            path = %path.display(),
            tokens = selected.len(),
            "wrote token file"
        );
        written.push(WrittenFile {
            platform: name.to_string(),
            path,
            token_count: selected.len(),
        });
    }
    Ok(written)
}

/// Builds `platforms`, or every configured platform when empty.
pub fn build(
    config: &PipelineConfig,
    registry: &Registry,
    platforms: &[String],
) -> Result<BuildReport, BuildError> {
    let platforms = selected_platforms(config, platforms)?;
    validate(registry, &platforms)?;

    let tokens = load_tokens(config)?;
    info!(tokens = tokens.len(), "loaded token sources");

    let mut report = BuildReport::default();
    for (name, platform) in platforms {
        report
            .files
            .extend(build_platform(config, registry, name, platform, &tokens)?);
    }
    Ok(report)
}

/// Removes the files `build` would write. Returns the ones that existed.
pub fn clean(config: &PipelineConfig, platforms: &[String]) -> Result<Vec<PathBuf>, BuildError> {
    let mut removed = Vec::new();
    for (name, platform) in selected_platforms(config, platforms)? {
        let build_dir = config.build_dir(platform);
        for file in &platform.files {
            let path = build_dir.join(&file.destination);
            if !path.exists() {
                continue;
            }
            fs::remove_file(&path).map_err(|source| BuildError::Io {
                path: path.clone(),
                source,
            })?;
            info!(platform = name, path = %path.display(), "removed token file");
            removed.push(path);
        }
    }
    Ok(removed)
}
