use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use color_extractor_wasm::{AddOutcome, ClusterConfig, ColorEntry, PixelBuffer, Viewport, Workspace};
use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Extract colors from images: pick pixels or detect dominant colors.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of dominant colors to detect
    #[arg(short = 'k', long, default_value_t = 5)]
    n_colors: usize,

    /// Pixels sampled per clustering run
    #[arg(long, default_value_t = 10_000)]
    samples: usize,

    /// k-means passes
    #[arg(long, default_value_t = 5)]
    iterations: usize,

    /// Seed for reproducible clustering
    #[arg(long)]
    seed: Option<u64>,

    /// Pick the pixel at X,Y instead of auto-detecting (repeatable)
    #[arg(short = 'p', long = "pick", value_name = "X,Y")]
    picks: Vec<String>,

    /// Print JSON instead of one line per color
    #[arg(long)]
    json: bool,
}

fn parse_point(s: &str) -> Result<(f64, f64)> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected X,Y, got {s:?}");
    };
    let x = x.trim().parse().with_context(|| format!("bad x in {s:?}"))?;
    let y = y.trim().parse().with_context(|| format!("bad y in {s:?}"))?;
    Ok((x, y))
}

fn print_entries(entries: &[ColorEntry]) {
    for e in entries {
        println!("{}  {}  {}", e.hex, e.rgb, e.hsl_string);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ClusterConfig {
        k: args.n_colors,
        sample_size: args.samples,
        iterations: args.iterations,
    };
    let points: Vec<(f64, f64)> = args
        .picks
        .iter()
        .map(|s| parse_point(s))
        .collect::<Result<_>>()?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut workspace = Workspace::with_rng(rng);
    workspace.set_cluster_config(config);

    let mut report = serde_json::Map::new();
    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let buffer = PixelBuffer::decode(&bytes)
            .with_context(|| format!("decoding {}", input.display()))?;
        let viewport = Viewport::native(&buffer);
        workspace.load(buffer);

        if points.is_empty() {
            workspace.auto_detect();
        } else {
            workspace.set_eyedropper_active(true);
            for &(x, y) in &points {
                match workspace.commit(x, y, viewport) {
                    Some(AddOutcome::Added(_)) => {}
                    Some(AddOutcome::Duplicate) => warn!("{x},{y}: color already picked"),
                    None => warn!("{x},{y}: outside {}", input.display()),
                }
            }
        }

        if args.json {
            report.insert(
                input.display().to_string(),
                serde_json::to_value(workspace.colors())?,
            );
        } else {
            println!("{}:", input.display());
            print_entries(workspace.colors());
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
