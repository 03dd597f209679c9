//! Architecture registry.
//!
//! Every supported cross-compilation architecture maps to the clang target
//! triplet and the xwin-style Windows SDK layout it builds against. The table
//! is static and read-only; look entries up with [`lookup`].

use crate::error::{Error, Result};

/// Toolchain parameters for one target architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Architecture {
    /// Registry key, as passed to `--target-architecture`.
    pub name: &'static str,
    /// Clang target triplet (`--target=<triplet>`).
    pub triplet: &'static str,
    /// Searched with `-isystem`, in order.
    pub system_include_dirs: &'static [&'static str],
    /// Searched with `-L`, in order.
    pub system_library_dirs: &'static [&'static str],
    /// Defined for every target, before the target's own definitions.
    pub extra_definitions: &'static [&'static str],
}

const XWIN_INCLUDE_DIRS: &[&str] = &[
    "/xwin/crt/include",
    "/xwin/sdk/include/shared",
    "/xwin/sdk/include/ucrt",
    "/xwin/sdk/include/um",
];

pub const ARCHITECTURES: &[Architecture] = &[
    Architecture {
        name: "x64",
        triplet: "x86_64-pc-windows-msvc",
        system_include_dirs: XWIN_INCLUDE_DIRS,
        system_library_dirs: &[
            "/xwin/crt/lib/x86_64",
            "/xwin/sdk/lib/ucrt/x86_64",
            "/xwin/sdk/lib/um/x86_64",
        ],
        extra_definitions: &[],
    },
    Architecture {
        name: "armv7",
        triplet: "armv7-pc-windows-msvc",
        system_include_dirs: XWIN_INCLUDE_DIRS,
        system_library_dirs: &[
            "/xwin/crt/lib/aarch",
            "/xwin/sdk/lib/ucrt/aarch",
            "/xwin/sdk/lib/um/aarch",
        ],
        extra_definitions: &["_ARM_WINAPI_PARTITION_DESKTOP_SDK_AVAILABLE"],
    },
];

/// Find the architecture registered under `name`.
pub fn lookup(name: &str) -> Result<&'static Architecture> {
    ARCHITECTURES
        .iter()
        .find(|arch| arch.name == name)
        .ok_or_else(|| Error::UnknownArchitecture {
            name: name.to_string(),
            known: names().join(", "),
        })
}

/// All registry keys, in table order.
pub fn names() -> Vec<&'static str> {
    ARCHITECTURES.iter().map(|arch| arch.name).collect()
}
