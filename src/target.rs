//! Build target model.
//!
//! A target is one linkable unit: an executable, a shared library or a static
//! library. All three carry the same settings and differ only in how their
//! output file is named, so the variant is a [`TargetKind`] tag on a single
//! [`Target`] struct rather than three separate types.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Kind of artifact a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Executable,
    SharedLibrary,
    StaticLibrary,
}

impl TargetKind {
    /// Parse the `type` value of a target record.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "executable" => Some(TargetKind::Executable),
            "shared library" => Some(TargetKind::SharedLibrary),
            "static library" => Some(TargetKind::StaticLibrary),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            TargetKind::Executable => "executable",
            TargetKind::SharedLibrary => "shared library",
            TargetKind::StaticLibrary => "static library",
        }
    }

    /// Extension of the default artifact name.
    pub fn default_extension(&self) -> &'static str {
        match self {
            TargetKind::Executable => "exe",
            TargetKind::SharedLibrary => "dll",
            TargetKind::StaticLibrary => "lib",
        }
    }

    /// Record key that overrides the artifact name for this kind.
    pub fn artifact_key(&self) -> &'static str {
        match self {
            TargetKind::Executable => "executable_file",
            TargetKind::SharedLibrary | TargetKind::StaticLibrary => "library_file",
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            TargetKind::Executable => "Executable",
            TargetKind::SharedLibrary => "SharedLibrary",
            TargetKind::StaticLibrary => "StaticLibrary",
        }
    }
}

/// One entry of the `targets` list, as deserialized from the targets file.
///
/// Every field is optional here so that missing keys surface as
/// [`Error::MissingField`] from [`Target::from_record`] instead of an opaque
/// deserializer message. Unknown keys are ignored.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct TargetRecord {
    pub name: Option<String>,
    /// A `type` key with a null value becomes an empty tag, so it is
    /// reported as an unknown type rather than a missing one.
    #[serde(rename = "type", default, deserialize_with = "present_tag")]
    pub kind: Option<String>,
    pub executable_file: Option<String>,
    pub library_file: Option<String>,
    #[serde(default)]
    pub system_libraries: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub compiler_definitions: Vec<String>,
    #[serde(default)]
    pub compiler_args: Vec<String>,
    #[serde(default)]
    pub linker_args: Vec<String>,
}

fn present_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Some(Option::<String>::deserialize(deserializer)?.unwrap_or_default()))
}

/// A validated build target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub kind: TargetKind,
    /// Relative to the parent of the build directory.
    pub sources: Vec<String>,
    pub system_libraries: Vec<String>,
    /// Appended after the architecture's extra definitions.
    pub definitions: Vec<String>,
    pub compiler_args: Vec<String>,
    pub linker_args: Vec<String>,
    pub artifact_file: String,
}

impl Target {
    /// Validate a record and fill in per-kind defaults.
    pub fn from_record(record: TargetRecord) -> Result<Self> {
        let name = record.name.ok_or(Error::MissingField {
            field: "name",
            target: None,
        })?;
        let tag = record.kind.ok_or_else(|| Error::MissingField {
            field: "type",
            target: Some(name.clone()),
        })?;
        let kind = TargetKind::from_tag(&tag).ok_or_else(|| Error::UnknownTargetType {
            name: name.clone(),
            kind: tag.clone(),
        })?;

        let artifact_override = match kind {
            TargetKind::Executable => record.executable_file,
            TargetKind::SharedLibrary | TargetKind::StaticLibrary => record.library_file,
        };
        let artifact_file = artifact_override
            .unwrap_or_else(|| format!("{}.{}", name, kind.default_extension()));

        Ok(Self {
            name,
            kind,
            sources: record.sources,
            system_libraries: record.system_libraries,
            definitions: record.compiler_definitions,
            compiler_args: record.compiler_args,
            linker_args: record.linker_args,
            artifact_file,
        })
    }

    /// Namespacing prefix for this target's object files.
    pub fn work_dir(&self) -> String {
        format!("{}.dir", self.name)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(name={:?}, system_libraries={:?}, sources={:?}, definitions={:?}, \
             compiler_args={:?}, linker_args={:?}, {}={:?})",
            self.kind.type_name(),
            self.name,
            self.system_libraries,
            self.sources,
            self.definitions,
            self.compiler_args,
            self.linker_args,
            self.kind.artifact_key(),
            self.artifact_file,
        )
    }
}
