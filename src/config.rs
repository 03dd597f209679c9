//! Targets file loading.
//!
//! A targets file holds a single `targets` list. YAML is the default format;
//! files ending in `.toml` are read as TOML. Loading validates every record
//! and rejects targets whose names or artifacts would collide in the build
//! file.

use crate::error::{Error, Result};
use crate::ninja;
use crate::target::{Target, TargetRecord};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const DEFAULT_TARGETS_FILE: &str = "targets.yaml";

/// Top-level layout of a targets file.
#[derive(Deserialize, Debug, Default)]
pub struct TargetsFile {
    pub targets: Vec<TargetRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, anything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Read and validate every target in `path`.
pub fn load_targets(path: &Path) -> Result<Vec<Target>> {
    let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_targets(&content, ConfigFormat::from_path(path), path)
}

/// Parse targets from an in-memory document. `origin` is only used in errors.
pub fn parse_targets(content: &str, format: ConfigFormat, origin: &Path) -> Result<Vec<Target>> {
    let parse_error = |source: Box<dyn std::error::Error + Send + Sync>| Error::ConfigParse {
        path: origin.to_path_buf(),
        source,
    };

    let file: TargetsFile = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.into()))?,
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.into()))?,
    };

    let targets = file
        .targets
        .into_iter()
        .map(Target::from_record)
        .collect::<Result<Vec<_>>>()?;

    check_unique_outputs(&targets)?;
    Ok(targets)
}

/// Every target name and every artifact must appear once, and no artifact may
/// shadow the phony aggregate edge.
fn check_unique_outputs(targets: &[Target]) -> Result<()> {
    let mut names = HashSet::new();
    let mut artifacts = HashSet::new();
    for target in targets {
        if !names.insert(target.name.as_str()) {
            return Err(Error::DuplicateTarget(target.name.clone()));
        }
        if target.artifact_file == ninja::ALL {
            return Err(Error::ReservedArtifact {
                target: target.name.clone(),
                artifact: target.artifact_file.clone(),
            });
        }
        if !artifacts.insert(target.artifact_file.as_str()) {
            return Err(Error::DuplicateArtifact {
                target: target.name.clone(),
                artifact: target.artifact_file.clone(),
            });
        }
    }
    Ok(())
}
