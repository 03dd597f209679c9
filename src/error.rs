//! Error types for target loading and build-graph generation.

use std::path::PathBuf;

/// Errors raised while turning a targets file into a build description.
///
/// Emission itself cannot fail; every variant here originates from the
/// architecture lookup, the targets document or the build directory.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown architecture '{name}' (known: {known})")]
    UnknownArchitecture { name: String, known: String },

    #[error("missing {field} for target{}", display_target(.target))]
    MissingField {
        field: &'static str,
        target: Option<String>,
    },

    #[error("unknown target type '{kind}' for target '{name}'")]
    UnknownTargetType { name: String, kind: String },

    #[error("target '{0}' is defined more than once")]
    DuplicateTarget(String),

    #[error("artifact '{artifact}' of target '{target}' is already produced by another target")]
    DuplicateArtifact { target: String, artifact: String },

    #[error("target '{target}' cannot produce '{artifact}', the name is reserved for the aggregate build step")]
    ReservedArtifact { target: String, artifact: String },

    #[error("failed to read targets file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse targets file {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The invocation conflicts with what is on disk. Raised before anything
    /// is written or removed.
    #[error("{0}")]
    Usage(String),

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_))
    }
}

fn display_target(target: &Option<String>) -> String {
    match target {
        Some(name) => format!(" '{name}'"),
        None => String::new(),
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
