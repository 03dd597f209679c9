//! Format-neutral build plan.
//!
//! The plan resolves every target into concrete compile and link steps for one
//! architecture. Renderers ([`crate::ninja`], [`crate::compdb`]) only decide
//! how the global search paths are spelled; all per-target flags are fixed
//! here so the outputs cannot drift apart.

use crate::arch::Architecture;
use crate::target::Target;

/// Build directories sit one level below the sources' root.
pub const SOURCE_ROOT: &str = "..";

/// Compile one source into one object file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileStep {
    /// Source path as written in the targets file.
    pub source: String,
    /// Source path as seen from the build directory.
    pub input: String,
    pub object: String,
    /// Definitions followed by the target's compiler args.
    pub args: Vec<String>,
}

/// Link all of a target's objects into its artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStep {
    pub artifact: String,
    /// In source order.
    pub objects: Vec<String>,
    /// Library flags followed by the target's linker args.
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPlan {
    pub name: String,
    pub compile: Vec<CompileStep>,
    pub link: LinkStep,
}

#[derive(Debug, Clone)]
pub struct BuildPlan<'a> {
    pub arch: &'a Architecture,
    pub targets: Vec<TargetPlan>,
}

impl<'a> BuildPlan<'a> {
    pub fn new(arch: &'a Architecture, targets: &[Target]) -> Self {
        let targets = targets
            .iter()
            .map(|target| plan_target(arch, target))
            .collect();
        Self { arch, targets }
    }

    /// `-isystem <dir>` for every system include dir, one token per element.
    pub fn include_flags(&self) -> Vec<String> {
        self.arch
            .system_include_dirs
            .iter()
            .flat_map(|dir| ["-isystem".to_string(), dir.to_string()])
            .collect()
    }

    /// `-L<dir>` for every system library dir.
    pub fn library_dir_flags(&self) -> Vec<String> {
        self.arch
            .system_library_dirs
            .iter()
            .map(|dir| format!("-L{dir}"))
            .collect()
    }

    /// Artifacts of every target, in target order.
    pub fn artifacts(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.link.artifact.as_str())
    }

    pub fn compile_steps(&self) -> impl Iterator<Item = &CompileStep> {
        self.targets.iter().flat_map(|t| t.compile.iter())
    }
}

/// `-D <symbol>` pairs, architecture definitions first, then the target's,
/// without deduplication.
pub fn effective_definitions(arch: &Architecture, target: &Target) -> Vec<String> {
    arch.extra_definitions
        .iter()
        .copied()
        .chain(target.definitions.iter().map(String::as_str))
        .flat_map(|symbol| ["-D".to_string(), symbol.to_string()])
        .collect()
}

pub fn library_flags(target: &Target) -> Vec<String> {
    target
        .system_libraries
        .iter()
        .map(|lib| format!("-l{lib}"))
        .collect()
}

fn plan_target(arch: &Architecture, target: &Target) -> TargetPlan {
    let work_dir = target.work_dir();

    let mut compile_args = effective_definitions(arch, target);
    compile_args.extend(target.compiler_args.iter().cloned());

    let compile: Vec<CompileStep> = target
        .sources
        .iter()
        .map(|source| CompileStep {
            source: source.clone(),
            input: format!("{SOURCE_ROOT}/{source}"),
            object: format!("{work_dir}/{source}.o"),
            args: compile_args.clone(),
        })
        .collect();

    let mut link_args = library_flags(target);
    link_args.extend(target.linker_args.iter().cloned());

    let link = LinkStep {
        artifact: target.artifact_file.clone(),
        objects: compile.iter().map(|step| step.object.clone()).collect(),
        args: link_args,
    };

    TargetPlan {
        name: target.name.clone(),
        compile,
        link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch;
    use crate::target::TargetRecord;

    fn target(name: &str, sources: &[&str]) -> Target {
        Target::from_record(TargetRecord {
            name: Some(name.into()),
            kind: Some("executable".into()),
            sources: sources.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_definitions_arch_first_no_dedup() {
        let armv7 = arch::lookup("armv7").unwrap();
        let mut t = target("app", &[]);
        t.definitions = vec![
            "UNICODE".into(),
            "_ARM_WINAPI_PARTITION_DESKTOP_SDK_AVAILABLE".into(),
        ];
        assert_eq!(
            effective_definitions(armv7, &t),
            vec![
                "-D",
                "_ARM_WINAPI_PARTITION_DESKTOP_SDK_AVAILABLE",
                "-D",
                "UNICODE",
                "-D",
                "_ARM_WINAPI_PARTITION_DESKTOP_SDK_AVAILABLE",
            ]
        );
    }

    #[test]
    fn test_objects_namespaced_per_target() {
        let x64 = arch::lookup("x64").unwrap();
        let plan = BuildPlan::new(x64, &[target("a", &["x.cpp"]), target("b", &["x.cpp"])]);
        let objects: Vec<_> = plan.compile_steps().map(|s| s.object.as_str()).collect();
        assert_eq!(objects, vec!["a.dir/x.cpp.o", "b.dir/x.cpp.o"]);
    }

    #[test]
    fn test_compile_and_link_args_order() {
        let x64 = arch::lookup("x64").unwrap();
        let mut t = target("app", &["src/main.cpp", "src/util.cpp"]);
        t.definitions = vec!["NDEBUG".into()];
        t.compiler_args = vec!["-std=c++20".into(), "-O2".into()];
        t.system_libraries = vec!["kernel32".into(), "user32".into()];
        t.linker_args = vec!["-Wl,/subsystem:console".into()];

        let plan = BuildPlan::new(x64, &[t]);
        let tp = &plan.targets[0];

        assert_eq!(tp.compile.len(), 2);
        assert_eq!(tp.compile[0].input, "../src/main.cpp");
        assert_eq!(tp.compile[0].args, vec!["-D", "NDEBUG", "-std=c++20", "-O2"]);
        assert_eq!(
            tp.link.objects,
            vec!["app.dir/src/main.cpp.o", "app.dir/src/util.cpp.o"]
        );
        assert_eq!(
            tp.link.args,
            vec!["-lkernel32", "-luser32", "-Wl,/subsystem:console"]
        );
    }

    #[test]
    fn test_search_path_flags() {
        let x64 = arch::lookup("x64").unwrap();
        let plan = BuildPlan::new(x64, &[]);
        assert_eq!(&plan.include_flags()[..2], ["-isystem", "/xwin/crt/include"]);
        assert_eq!(plan.include_flags().len(), 8);
        assert_eq!(plan.library_dir_flags().len(), 3);
        assert_eq!(plan.library_dir_flags()[2], "-L/xwin/sdk/lib/um/x86_64");
    }
}
