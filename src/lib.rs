//! # xcross - exact-flag Ninja generator for clang cross builds
//!
//! xcross turns a short list of build targets into a `build.ninja` that
//! cross-compiles them to Windows with clang and lld. Unlike CMake or Meson it
//! adds no flags of its own: every definition, compiler argument and linker
//! argument in the build file comes from the architecture table or from the
//! targets file.
//!
//! ## Quick Start
//!
//! ```bash
//! xcross-setup build -t x64 targets.yaml
//! ninja -C build
//! ```
//!
//! ## Library Usage
//!
//! ```rust
//! use xcross::{arch, ninja, target::{Target, TargetRecord}};
//!
//! let x64 = arch::lookup("x64").unwrap();
//! let app = Target::from_record(TargetRecord {
//!     name: Some("app".into()),
//!     kind: Some("executable".into()),
//!     sources: vec!["main.cpp".into()],
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let text = ninja::emit(x64, &[app]);
//! assert!(text.contains("build app.exe: CXX_LINKER app.dir/main.cpp.o\n"));
//! ```
//!
//! ## Module Organization
//!
//! - [`arch`] - Architecture registry (triplets, SDK paths)
//! - [`target`] - Target model and record validation
//! - [`config`] - Targets file loading (YAML / TOML)
//! - [`rules`] - Compiler and linker rule templates
//! - [`graph`] - Format-neutral build plan
//! - [`ninja`] - `build.ninja` emission
//! - [`compdb`] - `compile_commands.json` generation

/// Architecture registry.
pub mod arch;

/// Build directory checks and `--force` clearing.
pub mod builddir;

/// Compilation database output.
pub mod compdb;

/// Targets file parsing.
pub mod config;

/// Error type shared by every module.
pub mod error;

/// Build plan shared by the renderers.
pub mod graph;

/// Ninja build file emission.
pub mod ninja;

/// Compiler and linker rules.
pub mod rules;

/// Target model.
pub mod target;

/// Terminal tables.
pub mod ui;

pub use error::{Error, Result};
