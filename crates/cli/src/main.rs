mod baseline;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use surface_diff::{diff_manifests, resolve_error_classes, ErrorClass};
use surface_manifest::{from_manifest, ApiManifest};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Stability-aware API compatibility gate.
#[derive(Parser)]
#[command(name = "surface", version, about = "Stability-aware API compatibility gate")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff two API manifests and gate on backward-compatibility breaks
    Diff {
        /// Path to the old (baseline) manifest JSON
        old: PathBuf,
        /// Path to the new manifest JSON
        new: PathBuf,
        /// Comma-separated error classes whose violations fail the gate
        /// (stable, experimental, external, deprecated, non-experimental, prod, all)
        #[arg(long, default_value = "prod")]
        error_on: String,
        /// Baseline file of violation keys to suppress (forced to warnings)
        #[arg(long)]
        baseline: Option<PathBuf>,
        /// Write the current run's violation keys to a baseline file
        #[arg(long)]
        write_baseline: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Diff {
            old,
            new,
            error_on,
            baseline,
            write_baseline,
        } => {
            cmd_diff(
                &old,
                &new,
                &error_on,
                baseline.as_deref(),
                write_baseline.as_deref(),
                cli.output,
                cli.quiet,
            );
        }
    }
}

fn cmd_diff(
    old_path: &Path,
    new_path: &Path,
    error_on: &str,
    baseline_path: Option<&Path>,
    write_baseline_path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    // Parse the error-class policy before touching the filesystem so bad
    // flags fail regardless of manifest state.
    let mut classes: BTreeSet<ErrorClass> = BTreeSet::new();
    for token in error_on.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match token.parse::<ErrorClass>() {
            Ok(class) => {
                classes.insert(class);
            }
            Err(e) => {
                report_error(&e.to_string(), output, quiet);
                process::exit(1);
            }
        }
    }
    if classes.is_empty() {
        report_error("--error-on must name at least one error class", output, quiet);
        process::exit(1);
    }
    let error_stabilities = resolve_error_classes(&classes);

    let old_manifest = load_manifest(old_path, output, quiet);
    let new_manifest = load_manifest(new_path, output, quiet);

    let skip = match baseline_path {
        None => BTreeSet::new(),
        Some(path) => match baseline::load_baseline(path) {
            Ok(set) => set,
            Err(e) => {
                let msg = format!("error reading baseline '{}': {}", path.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        },
    };

    let report = diff_manifests(&old_manifest, &new_manifest, &error_stabilities, &skip);

    if let Some(path) = write_baseline_path {
        if let Err(e) = baseline::write_baseline(path, &report.diagnostics) {
            let msg = format!("error writing baseline '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }

    if !quiet {
        match output {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report.to_json()).unwrap_or_default()
                );
            }
            OutputFormat::Text => {
                println!("{}", report.to_text());
            }
        }
    }

    if report.has_errors() {
        process::exit(1);
    }
}

/// Read and parse a manifest JSON file, exiting on failure.
fn load_manifest(path: &Path, output: OutputFormat, quiet: bool) -> ApiManifest {
    let contents = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let value: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    match from_manifest(&value) {
        Ok(m) => m,
        Err(e) => {
            let msg = format!("error loading manifest '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}
