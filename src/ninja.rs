//! `build.ninja` emission.
//!
//! Output layout, in order: a generated-file comment, the two search-path
//! variables, the compile and link rules, one compile edge per source, one
//! link edge per target and a phony `all` edge marked as the default goal.
//! The text is a pure function of its inputs so regenerating an unchanged
//! configuration leaves the file byte-identical.

use crate::arch::Architecture;
use crate::graph::BuildPlan;
use crate::rules::{Compiler, Language, Linker, RuleProvider};
use crate::target::Target;

pub const BUILD_FILE: &str = "build.ninja";

pub const HEADER: &str =
    "# Automatically generated by xcross-setup for cross-compiling to Windows. Do not edit.";

const INCLUDE_DIRS_VAR: &str = "SYSTEM_INCLUDE_DIRS";
const LIBRARY_DIRS_VAR: &str = "SYSTEM_LIBRARY_DIRS";
/// Phony aggregate of every artifact; no target may produce a file with this name.
pub const ALL: &str = "all";

/// Render the build file for `targets` using the C++ rules.
pub fn emit(arch: &Architecture, targets: &[Target]) -> String {
    emit_with_language(arch, targets, Language::Cxx)
}

/// Render the build file with the compile and link rules of `language`.
pub fn emit_with_language(arch: &Architecture, targets: &[Target], language: Language) -> String {
    render(&BuildPlan::new(arch, targets), language)
}

pub fn render(plan: &BuildPlan<'_>, language: Language) -> String {
    let compiler = Compiler::new(language);
    let linker = Linker::new(language);
    let mut w = NinjaWriter::new();

    w.comment(HEADER);
    w.newline();

    w.variable(INCLUDE_DIRS_VAR, &plan.include_flags().join(" "));
    w.variable(LIBRARY_DIRS_VAR, &plan.library_dir_flags().join(" "));
    w.newline();

    w.rule(&compiler, plan.arch);
    w.rule(&linker, plan.arch);

    let compiler_name = compiler.name();
    let linker_name = linker.name();

    for target in &plan.targets {
        for step in &target.compile {
            w.build(&step.object, &compiler_name, [step.input.as_str()]);
            w.binding("ARGS", &with_global(INCLUDE_DIRS_VAR, &step.args));
            w.newline();
        }

        w.build(
            &target.link.artifact,
            &linker_name,
            target.link.objects.iter().map(String::as_str),
        );
        w.binding("LINK_ARGS", &with_global(LIBRARY_DIRS_VAR, &target.link.args));
        w.newline();
    }

    w.build(ALL, "phony", plan.artifacts());
    w.default(ALL);

    w.finish()
}

/// `$VAR` followed by the per-edge flags, single-space separated.
fn with_global(var: &str, args: &[String]) -> String {
    std::iter::once(format!("${var}"))
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape a path for use in a `build` line.
///
/// Flags inside variable bindings are written verbatim; only paths in the
/// output and input lists need `$`, space and `:` escaped.
pub fn escape_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '$' | ' ' | ':' => {
                out.push('$');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Minimal line-oriented writer for ninja syntax.
struct NinjaWriter {
    out: String,
}

impl NinjaWriter {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }

    fn comment(&mut self, text: &str) {
        self.line(text);
    }

    fn variable(&mut self, name: &str, value: &str) {
        self.line(format!("{name} = {value}").trim_end());
    }

    fn binding(&mut self, name: &str, value: &str) {
        self.line(format!("  {name} = {value}").trim_end());
    }

    fn rule(&mut self, rule: &dyn RuleProvider, arch: &Architecture) {
        self.line(&format!("rule {}", rule.name()));
        self.line(&rule.rule_text(arch));
        self.newline();
    }

    fn build<'a>(&mut self, output: &str, rule: &str, inputs: impl IntoIterator<Item = &'a str>) {
        let mut line = format!("build {}: {}", escape_path(output), rule);
        for input in inputs {
            line.push(' ');
            line.push_str(&escape_path(input));
        }
        self.line(&line);
    }

    fn default(&mut self, target: &str) {
        self.line(&format!("default {}", escape_path(target)));
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch;
    use crate::target::TargetRecord;

    fn target(name: &str, kind: &str, sources: &[&str]) -> Target {
        Target::from_record(TargetRecord {
            name: Some(name.into()),
            kind: Some(kind.into()),
            sources: sources.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_single_executable_full_text() {
        let x64 = arch::lookup("x64").unwrap();
        let text = emit(x64, &[target("app", "executable", &["main.cpp"])]);

        let expected = format!(
            "{HEADER}

SYSTEM_INCLUDE_DIRS = -isystem /xwin/crt/include -isystem /xwin/sdk/include/shared -isystem /xwin/sdk/include/ucrt -isystem /xwin/sdk/include/um
SYSTEM_LIBRARY_DIRS = -L/xwin/crt/lib/x86_64 -L/xwin/sdk/lib/ucrt/x86_64 -L/xwin/sdk/lib/um/x86_64

rule CXX_COMPILER
  command = clang++ --target=x86_64-pc-windows-msvc -fuse-ld=lld $ARGS -o $out -c $in
  description = Compiling C++ object $out

rule CXX_LINKER
  command = clang++ --target=x86_64-pc-windows-msvc -fuse-ld=lld $LINK_ARGS -o $out $in
  description = Linking $out

build app.dir/main.cpp.o: CXX_COMPILER ../main.cpp
  ARGS = $SYSTEM_INCLUDE_DIRS

build app.exe: CXX_LINKER app.dir/main.cpp.o
  LINK_ARGS = $SYSTEM_LIBRARY_DIRS

build all: phony app.exe
default all
"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_edge_bindings_carry_flags_in_order() {
        let armv7 = arch::lookup("armv7").unwrap();
        let mut t = target("gui", "shared library", &["gui.cpp"]);
        t.definitions = vec!["UNICODE".into()];
        t.compiler_args = vec!["-O2".into()];
        t.system_libraries = vec!["user32".into()];
        t.linker_args = vec!["-shared".into()];

        let text = emit(armv7, &[t]);
        assert!(text.contains(
            "build gui.dir/gui.cpp.o: CXX_COMPILER ../gui.cpp\n  \
             ARGS = $SYSTEM_INCLUDE_DIRS -D _ARM_WINAPI_PARTITION_DESKTOP_SDK_AVAILABLE -D UNICODE -O2\n"
        ));
        assert!(text.contains(
            "build gui.dll: CXX_LINKER gui.dir/gui.cpp.o\n  \
             LINK_ARGS = $SYSTEM_LIBRARY_DIRS -luser32 -shared\n"
        ));
    }

    #[test]
    fn test_rules_declared_once() {
        let x64 = arch::lookup("x64").unwrap();
        let targets = [
            target("a", "executable", &["a.cpp", "b.cpp"]),
            target("b", "static library", &["c.cpp"]),
        ];
        let text = emit(x64, &targets);
        assert_eq!(text.matches("rule CXX_COMPILER\n").count(), 1);
        assert_eq!(text.matches("rule CXX_LINKER\n").count(), 1);
        assert_eq!(text.matches(": CXX_COMPILER ").count(), 3);
        assert_eq!(text.matches(": CXX_LINKER").count(), 2);
        assert!(text.ends_with("build all: phony a.exe b.lib\ndefault all\n"));
    }

    #[test]
    fn test_no_targets() {
        let x64 = arch::lookup("x64").unwrap();
        let text = emit(x64, &[]);
        assert!(text.ends_with("build all: phony\ndefault all\n"));
    }

    #[test]
    fn test_c_language_rules() {
        let x64 = arch::lookup("x64").unwrap();
        let targets = [target("tool", "executable", &["tool.c"])];
        let text = emit_with_language(x64, &targets, Language::C);
        assert!(text.contains("rule C_COMPILER\n  command = clang --target="));
        assert!(text.contains("build tool.dir/tool.c.o: C_COMPILER ../tool.c\n"));
        assert!(text.contains("build tool.exe: C_LINKER tool.dir/tool.c.o\n"));
    }

    #[test]
    fn test_escape_path() {
        assert_eq!(escape_path("main.cpp"), "main.cpp");
        assert_eq!(escape_path("my file.cpp"), "my$ file.cpp");
        assert_eq!(escape_path("C:/src/a.cpp"), "C$:/src/a.cpp");
        assert_eq!(escape_path("$x"), "$$x");
    }
}
