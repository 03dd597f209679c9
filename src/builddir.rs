//! Build directory checks and preparation.
//!
//! Checking is split from preparing so the caller can validate the directory,
//! load every target and render the build file before anything on disk is
//! created or removed.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// What [`prepare`] has to do to make the build directory usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildDirAction {
    /// Nothing exists yet.
    Create,
    /// Exists and is empty.
    Reuse,
    /// Exists with contents and `--force` was given.
    Clear,
}

/// Decide how to prepare `dir` without touching it.
pub fn check(dir: &Path, force: bool) -> Result<BuildDirAction> {
    if !dir.exists() {
        return Ok(BuildDirAction::Create);
    }

    if !dir.is_dir() {
        return Err(Error::Usage(format!(
            "builddir '{}' already exists but is not a directory, not proceeding",
            dir.display()
        )));
    }

    let mut entries = fs::read_dir(dir).map_err(|source| io_error(dir, source))?;
    if entries.next().is_none() {
        return Ok(BuildDirAction::Reuse);
    }

    if !force {
        return Err(Error::Usage(format!(
            "builddir '{}' already exists and is not empty (use --force to empty it)",
            dir.display()
        )));
    }

    Ok(BuildDirAction::Clear)
}

/// Apply `action` to `dir`. With [`BuildDirAction::Clear`] every entry inside
/// the directory is removed; the directory itself is kept.
pub fn prepare(dir: &Path, action: BuildDirAction) -> Result<()> {
    match action {
        BuildDirAction::Create => {
            fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;
        }
        BuildDirAction::Reuse => {}
        BuildDirAction::Clear => {
            for entry in fs::read_dir(dir).map_err(|source| io_error(dir, source))? {
                let path = entry.map_err(|source| io_error(dir, source))?.path();
                debug!("removing {}", path.display());
                let removed = if path.is_dir() {
                    fs::remove_dir_all(&path)
                } else {
                    fs::remove_file(&path)
                };
                removed.map_err(|source| io_error(&path, source))?;
            }
        }
    }
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}
