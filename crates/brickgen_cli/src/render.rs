//! Per-part render entry point, invoked once per job by `brickgen`.
//!
//! Loads the render config, samples N scenes for the given part, and
//! drives the external raster backend once per scene.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use brickgen_core::config::RenderConfig;
use brickgen_core::logging::init_tracing;
use brickgen_core::render::{list_background_images, render_part, CommandBackend, SceneSampler};

/// Render randomized images of a single part file.
#[derive(Debug, Parser)]
#[command(name = "brickgen-render", author, version, about)]
struct Args {
    /// Part file to render.
    #[arg(short, long)]
    input: PathBuf,

    /// Directory of background images.
    #[arg(short, long)]
    backgrounds: Option<PathBuf>,

    /// Number of images to render.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,

    /// Output directory for the rendered images.
    #[arg(short, long, default_value = "./")]
    out: PathBuf,

    /// Render config file.
    #[arg(long, default_value = "brickgen.toml")]
    config: PathBuf,
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

    let config = RenderConfig::load_or_default(&args.config)?;

    let backgrounds = match &args.backgrounds {
        Some(dir) => list_background_images(dir)?,
        None => Vec::new(),
    };

    let sampler = SceneSampler::new(&config.scene, backgrounds)?;
    let backend = CommandBackend::new(config.renderer.program.clone(), config.image.clone());

    if !args.out.exists() {
        fs::create_dir_all(&args.out)?;
    }

    let mut rng = SmallRng::from_os_rng();
    let outputs = render_part(&backend, &sampler, &mut rng, &args.input, args.count, &args.out)?;

    tracing::info!("Wrote {} images to {}", outputs.len(), args.out.display());
    Ok(())
}
