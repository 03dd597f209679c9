//! # xcross-setup CLI Entry Point
//!
//! Generates `<builddir>/build.ninja` from a targets file for one
//! architecture. The build directory is only created or emptied once every
//! target has been loaded and the build file rendered, so a bad targets file
//! never leaves the directory half-cleared.

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::*;
use log::{LevelFilter, debug, info};
use std::fs;
use std::path::PathBuf;

use xcross::arch;
use xcross::builddir;
use xcross::compdb;
use xcross::config;
use xcross::graph::BuildPlan;
use xcross::ninja;
use xcross::rules::Language;
use xcross::ui;

#[derive(Parser)]
#[command(name = "xcross-setup")]
#[command(
    about = "Create a Ninja build environment for cross-compiling C/C++ targets to Windows",
    version = env!("CARGO_PKG_VERSION")
)]
#[command(long_about = None)]
struct Cli {
    /// The target directory to build in
    #[arg(value_name = "builddir")]
    build_dir: PathBuf,

    /// The definition of compile targets
    #[arg(value_name = "targets.yaml", default_value = config::DEFAULT_TARGETS_FILE)]
    targets: PathBuf,

    /// Which architecture to create the build environment for
    #[arg(
        short = 't',
        long = "target-architecture",
        value_name = "ARCH",
        value_parser = PossibleValuesParser::new(arch::names())
    )]
    architecture: String,

    /// Force creation even if builddir is not empty. WARNING: empties the directory instead!
    #[arg(short, long)]
    force: bool,

    /// Also write compile_commands.json into builddir
    #[arg(long)]
    compile_commands: bool,

    /// Print the generated build.ninja instead of writing anything
    #[arg(long)]
    dry_run: bool,

    /// Show debug output (parsed targets, cleared paths)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let arch = arch::lookup(&cli.architecture)?;

    let action = if cli.dry_run {
        None
    } else {
        match builddir::check(&cli.build_dir, cli.force) {
            Ok(action) => Some(action),
            Err(e) if e.is_usage() => usage_error(&e.to_string()),
            Err(e) => return Err(e.into()),
        }
    };

    let targets = config::load_targets(&cli.targets)
        .with_context(|| format!("failed to load targets from {}", cli.targets.display()))?;
    for target in &targets {
        debug!("{target}");
    }

    let plan = BuildPlan::new(arch, &targets);
    let build_file = ninja::render(&plan, Language::Cxx);

    let Some(action) = action else {
        print!("{build_file}");
        return Ok(());
    };

    builddir::prepare(&cli.build_dir, action)
        .with_context(|| format!("failed to prepare {}", cli.build_dir.display()))?;
    info!("build directory {} ready ({action:?})", cli.build_dir.display());

    let build_file_path = cli.build_dir.join(ninja::BUILD_FILE);
    fs::write(&build_file_path, &build_file)
        .with_context(|| format!("failed to write {}", build_file_path.display()))?;

    if cli.compile_commands {
        let build_dir = fs::canonicalize(&cli.build_dir).unwrap_or_else(|_| cli.build_dir.clone());
        let entries = compdb::compile_commands(&plan, Language::Cxx, &build_dir);
        let compdb_path = cli.build_dir.join(compdb::COMPDB_FILE);
        fs::write(&compdb_path, serde_json::to_string_pretty(&entries)?)
            .with_context(|| format!("failed to write {}", compdb_path.display()))?;
        println!("{} Wrote {}", "✓".green(), compdb_path.display());
    }

    println!(
        "{} Generated {} for {} ({} targets)",
        "✓".green(),
        build_file_path.display(),
        arch.name.cyan(),
        targets.len()
    );
    if targets.is_empty() {
        println!("{} No targets defined in {}", "!".yellow(), cli.targets.display());
    } else {
        ui::target_table(&targets).print();
    }
    println!(
        "   Run {} to build.",
        format!("ninja -C {}", cli.build_dir.display()).white().bold()
    );

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("XCROSS_LOG")
        .format_timestamp(None)
        .init();
}

/// Report a conflicting invocation with the usage line and exit.
fn usage_error(message: &str) -> ! {
    Cli::command()
        .error(ErrorKind::ValueValidation, message)
        .exit()
}
