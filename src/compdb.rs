//! `compile_commands.json` generation for clangd and IDE integration.

use crate::graph::BuildPlan;
use crate::rules::{Compiler, Language};
use serde_json::{Value, json};
use std::path::Path;

pub const COMPDB_FILE: &str = "compile_commands.json";

/// One entry per compile edge, in the same order as `build.ninja`.
///
/// Each entry carries an `arguments` array rather than a shell command
/// string: the include-dir flags and the step's own args sit where the rule
/// has `$ARGS`, followed by the object and the source as seen from
/// `build_dir`.
pub fn compile_commands(plan: &BuildPlan<'_>, language: Language, build_dir: &Path) -> Value {
    let compiler = Compiler::new(language);
    let include_flags = plan.include_flags();
    let directory = build_dir.to_string_lossy();

    let entries: Vec<Value> = plan
        .compile_steps()
        .map(|step| {
            let mut args = include_flags.clone();
            args.extend(step.args.iter().cloned());

            json!({
                "directory": directory,
                "arguments": compiler.arguments(plan.arch, &args, &step.object, &step.input),
                "file": step.input,
                "output": step.object,
            })
        })
        .collect();

    Value::Array(entries)
}
