//! # BBox Batch Rename CLI
//!
//! Renames the selected meshes of one collection after the nearest selected
//! mesh of another, by world-space bounding-box center.
//!
//! ## Usage
//!
//! ```bash
//! # high_poly → low_poly with _high → _low, scene rewritten in place
//! bbox-rename props.scene.toml
//!
//! # Custom collections and suffixes, written to a new file
//! bbox-rename props.scene.toml --from-collection sculpt --to-collection bake \
//!     --name-from _hp --name-to _lp --output props.renamed.scene.toml
//!
//! # Preview only, machine-readable
//! bbox-rename props.scene.toml --dry-run --json
//! ```
//!
//! ## Configuration (rename.toml)
//!
//! ```toml
//! from_collection = "high_poly"
//! to_collection = "low_poly"
//! name_from = "_high"
//! name_to = "_low"
//! ```
//!
//! Flags override the config file, which overrides the defaults.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use eustress_bbox_rename::prelude::*;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "bbox-rename")]
#[command(about = "Batch rename selected objects by bounding-box proximity")]
#[command(version)]
struct Args {
    /// Scene document (*.scene.toml)
    scene: PathBuf,

    /// Collection used as rename source [default: high_poly]
    #[arg(long)]
    from_collection: Option<String>,

    /// Collection that will be renamed [default: low_poly]
    #[arg(long)]
    to_collection: Option<String>,

    /// Substring removed from source object names [default: _high]
    #[arg(long, allow_hyphen_values = true)]
    name_from: Option<String>,

    /// Substring appended to renamed objects [default: _low]
    #[arg(long, allow_hyphen_values = true)]
    name_to: Option<String>,

    /// Rename options file
    #[arg(short, long, env = "BBOX_RENAME_CONFIG")]
    config: Option<PathBuf>,

    /// Write the renamed scene here instead of overwriting SCENE
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Match and report without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Output machine-readable JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    dry_run: bool,
    data: T,
}

#[derive(Serialize)]
struct JsonError {
    ok: bool,
    error: String,
}

// ============================================================================
// Main
// ============================================================================

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    ExitCode::from(finish(args.json, run(&args)))
}

/// Print the outcome of a run and pick the process exit status
fn finish(json: bool, outcome: anyhow::Result<String>) -> u8 {
    match outcome {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(err) => {
            if json {
                println!("{}", render_error_json(&err));
            } else {
                eprintln!("{} {:#}", "error:".red().bold(), err);
            }
            1
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Defaults, then the config file, then explicit flags
fn resolve_options(args: &Args) -> anyhow::Result<RenameOptions> {
    let mut options = match &args.config {
        Some(path) => RenameOptions::from_file(path)?,
        None => RenameOptions::default(),
    };

    if let Some(v) = &args.from_collection {
        options.from_collection = v.clone();
    }
    if let Some(v) = &args.to_collection {
        options.to_collection = v.clone();
    }
    if let Some(v) = &args.name_from {
        options.name_from = v.clone();
    }
    if let Some(v) = &args.name_to {
        options.name_to = v.clone();
    }
    Ok(options)
}

/// Load, rename and save. Returns what should be printed to stdout.
fn run(args: &Args) -> anyhow::Result<String> {
    let options = resolve_options(args)?;
    let mut scene = Scene::load(&args.scene)
        .with_context(|| format!("loading scene {}", args.scene.display()))?;

    let report = if args.dry_run {
        plan(&scene, &options)?.preview()
    } else {
        let report = batch_rename(&mut scene, &options)?;
        let out = args.output.as_ref().unwrap_or(&args.scene);
        scene
            .save(out)
            .with_context(|| format!("writing scene {}", out.display()))?;
        tracing::debug!("Wrote {}", out.display());
        report
    };

    if args.json {
        Ok(render_json(args.dry_run, &report)?)
    } else {
        Ok(render_human(&scene, &report, args.dry_run))
    }
}

// ============================================================================
// Output
// ============================================================================

fn render_json<T: Serialize>(dry_run: bool, data: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonOut {
        ok: true,
        dry_run,
        data,
    })
}

fn render_error_json(err: &anyhow::Error) -> String {
    let out = JsonError {
        ok: false,
        error: format!("{:#}", err),
    };
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| format!("{:#}", err))
}

fn render_human(scene: &Scene, report: &RenameReport<Uuid>, dry_run: bool) -> String {
    let mut lines = Vec::new();
    for rename in &report.renamed {
        let mut line = format!("  {} -> {}", rename.old_name, rename.new_name.green());
        if rename.new_name != rename.requested_name {
            line.push_str(&format!(" {}", format!("('{}' taken)", rename.requested_name).dimmed()));
        }
        lines.push(line);
    }
    for id in &report.unmatched {
        let name = scene.object(*id).map(|o| o.name.as_str()).unwrap_or("?");
        lines.push(format!("  {} {}", name, "(no source left)".yellow()));
    }

    let summary = if dry_run {
        format!("{} [dry run, nothing written]", report.summary())
    } else {
        report.summary()
    };
    lines.push(summary.bold().to_string());
    lines.join("\n")
}
