//! Dataset generation entry point.
//!
//! Scans the part catalog, plans the pending jobs, and dispatches one
//! `brickgen-render` process per part, strictly in sequence.

use std::collections::BTreeSet;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use brickgen_core::catalog::scan_catalog;
use brickgen_core::config::RenderConfig;
use brickgen_core::jobs::{plan_jobs, Dispatcher, TARGET_CATEGORY};
use brickgen_core::logging::init_tracing;

/// Categories skipped when no `--exclude` flags are given.
const DEFAULT_EXCLUSIONS: [&str; 5] = ["Minifig", "Sticker", "Duplo", "Figure", "Pov-RAY"];

/// Generate a labeled brick image dataset from a part catalog.
#[derive(Debug, Parser)]
#[command(name = "brickgen", author, version, about)]
struct Args {
    /// Directory of part files.
    #[arg(short, long)]
    input: PathBuf,

    /// Directory of background images.
    #[arg(short, long)]
    backgrounds: Option<PathBuf>,

    /// Output root for the generated dataset.
    #[arg(short, long, default_value = "results/dataset/")]
    out: PathBuf,

    /// Number of images rendered per part.
    #[arg(short = 'n', long, default_value_t = 1)]
    images: u32,

    /// Category to skip entirely; repeatable. Replaces the default
    /// exclusion list when given.
    #[arg(long = "exclude", value_name = "CATEGORY")]
    excludes: Vec<String>,

    /// Render config file.
    #[arg(long, default_value = "brickgen.toml")]
    config: PathBuf,
}

fn exclusion_set(excludes: &[String]) -> BTreeSet<String> {
    if excludes.is_empty() {
        DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect()
    } else {
        excludes.iter().cloned().collect()
    }
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    init_tracing("info");
    let args = Args::parse();

    // Fail fast on a bad config instead of inside the first child.
    let config = RenderConfig::load_or_default(&args.config)?;
    tracing::info!("Renderer backend: {}", config.renderer.program);

    let exclusions = exclusion_set(&args.excludes);
    let catalog = scan_catalog(&args.input, &exclusions)?;
    let jobs = plan_jobs(&catalog, TARGET_CATEGORY, &args.out)?;

    if jobs.is_empty() {
        tracing::info!("Nothing to do, all parts already rendered");
        return Ok(());
    }

    let dispatcher = Dispatcher::new(
        Dispatcher::default_render_program(),
        args.images,
        args.backgrounds,
        Some(args.config),
    );
    dispatcher.dispatch_all(&jobs)?;

    tracing::info!("Dataset generation finished");
    Ok(())
}
