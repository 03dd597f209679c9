//! Ninja rule templates for the clang toolchain.
//!
//! A rule is declared once per build file and referenced by every edge that
//! compiles or links. Per-edge flags are passed through the `$ARGS` and
//! `$LINK_ARGS` variables so the rule text only depends on the language and
//! the architecture's triplet.

use crate::arch::Architecture;

/// Source language of a compile or link step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    C,
    #[default]
    Cxx,
}

impl Language {
    /// Clang driver for this language.
    pub fn driver(&self) -> &'static str {
        match self {
            Language::C => "clang",
            Language::Cxx => "clang++",
        }
    }

    fn rule_prefix(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cxx => "CXX",
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cxx => "C++",
        }
    }
}

/// Something that can be declared as a ninja `rule`.
pub trait RuleProvider {
    /// Rule name referenced by build edges.
    fn name(&self) -> String;

    /// The `command` binding for `arch`.
    fn command(&self, arch: &Architecture) -> String;

    /// The `description` binding.
    fn description(&self) -> String;

    /// Indented rule body, without the `rule <name>` header line.
    fn rule_text(&self, arch: &Architecture) -> String {
        format!(
            "  command = {}\n  description = {}",
            self.command(arch),
            self.description()
        )
    }
}

/// Compiles one source file to one object file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    pub language: Language,
}

/// Links object files into an artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linker {
    pub language: Language,
}

impl Compiler {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// The rule's command as an argument vector, with `$ARGS`, `$out` and
    /// `$in` filled in. Each element is one argument, so paths need no quoting.
    pub fn arguments(
        &self,
        arch: &Architecture,
        args: &[String],
        object: &str,
        input: &str,
    ) -> Vec<String> {
        let mut argv = driver_args(self.language, arch);
        argv.extend(args.iter().cloned());
        argv.extend(["-o", object, "-c", input].map(str::to_string));
        argv
    }
}

impl Linker {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

/// Driver, target selection and the embedded linker, shared by all rules.
pub fn driver_args(language: Language, arch: &Architecture) -> Vec<String> {
    vec![
        language.driver().to_string(),
        format!("--target={}", arch.triplet),
        "-fuse-ld=lld".to_string(),
    ]
}

fn driver_prefix(language: Language, arch: &Architecture) -> String {
    driver_args(language, arch).join(" ")
}

impl RuleProvider for Compiler {
    fn name(&self) -> String {
        format!("{}_COMPILER", self.language.rule_prefix())
    }

    fn command(&self, arch: &Architecture) -> String {
        format!(
            "{} $ARGS -o $out -c $in",
            driver_prefix(self.language, arch)
        )
    }

    fn description(&self) -> String {
        format!("Compiling {} object $out", self.language.display_name())
    }
}

impl RuleProvider for Linker {
    fn name(&self) -> String {
        format!("{}_LINKER", self.language.rule_prefix())
    }

    fn command(&self, arch: &Architecture) -> String {
        format!("{} $LINK_ARGS -o $out $in", driver_prefix(self.language, arch))
    }

    fn description(&self) -> String {
        "Linking $out".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch;

    #[test]
    fn test_cxx_compiler_rule() {
        let x64 = arch::lookup("x64").unwrap();
        let compiler = Compiler::new(Language::Cxx);
        assert_eq!(compiler.name(), "CXX_COMPILER");
        assert_eq!(
            compiler.rule_text(x64),
            "  command = clang++ --target=x86_64-pc-windows-msvc -fuse-ld=lld $ARGS -o $out -c $in\n  \
             description = Compiling C++ object $out"
        );
    }

    #[test]
    fn test_cxx_linker_rule() {
        let armv7 = arch::lookup("armv7").unwrap();
        let linker = Linker::new(Language::Cxx);
        assert_eq!(linker.name(), "CXX_LINKER");
        assert_eq!(
            linker.rule_text(armv7),
            "  command = clang++ --target=armv7-pc-windows-msvc -fuse-ld=lld $LINK_ARGS -o $out $in\n  \
             description = Linking $out"
        );
    }

    #[test]
    fn test_c_rules() {
        let x64 = arch::lookup("x64").unwrap();
        let compiler = Compiler::new(Language::C);
        let linker = Linker::new(Language::C);

        assert_eq!(compiler.name(), "C_COMPILER");
        assert_eq!(linker.name(), "C_LINKER");
        assert!(compiler.command(x64).starts_with("clang --target=x86_64-pc-windows-msvc "));
        assert_eq!(compiler.description(), "Compiling C object $out");
        assert!(linker.command(x64).starts_with("clang --target="));
    }

    #[test]
    fn test_compiler_arguments_follow_command() {
        let x64 = arch::lookup("x64").unwrap();
        let compiler = Compiler::new(Language::C);
        let argv = compiler.arguments(x64, &["-O2".to_string()], "t.dir/a b.c.o", "../a b.c");
        assert_eq!(
            argv,
            vec![
                "clang",
                "--target=x86_64-pc-windows-msvc",
                "-fuse-ld=lld",
                "-O2",
                "-o",
                "t.dir/a b.c.o",
                "-c",
                "../a b.c",
            ]
        );
        assert!(compiler.command(x64).starts_with(&driver_args(Language::C, x64).join(" ")));
    }

    #[test]
    fn test_default_language_is_cxx() {
        assert_eq!(Compiler::default().name(), "CXX_COMPILER");
        assert_eq!(Linker::default().name(), "CXX_LINKER");
    }
}
