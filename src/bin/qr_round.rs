use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use qr_round::tools::{collect_svgs, grid_stats, output_path_for, save_bitmap};
use qr_round::{Document, RoundConfig, Rounded, round_document, round_file};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qr-round", version, about = "Rounded pixel styling for QR-code SVGs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Overrides on top of `RoundConfig::from_env`
#[derive(Args)]
struct ConfigArgs {
    /// Pixel side length in SVG units
    #[arg(long)]
    side: Option<i32>,

    /// Registration mark diameter in pixels
    #[arg(long)]
    mark_size: Option<i32>,

    /// Keep top-level <g> elements instead of dropping them
    #[arg(long)]
    keep_groups: bool,

    /// Append lone-pixel circles inline instead of in a trailing group
    #[arg(long)]
    flat_circles: bool,
}

impl ConfigArgs {
    fn to_config(&self) -> RoundConfig {
        let mut config = RoundConfig::from_env();
        if let Some(side) = self.side {
            config = config.with_side(side);
        }
        if let Some(size) = self.mark_size {
            config = config.with_registration_size(size);
        }
        if self.keep_groups {
            config = config.with_remove_groups(false);
        }
        if self.flat_circles {
            config = config.with_isolated_layer(false);
        }
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Round the pixels of a single SVG
    Round {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Also write the occupancy grid as a PNG
        #[arg(long)]
        bitmap: Option<PathBuf>,
        /// Bitmap pixels per cell
        #[arg(long, default_value = "8")]
        scale: u32,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Write the occupancy grid of an SVG as a PNG
    Bitmap {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value = "8")]
        scale: u32,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print grid size and classification counts for an SVG
    Stats {
        #[arg(short, long)]
        input: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Round many SVGs in parallel
    Batch {
        /// Directory receiving the rounded files
        #[arg(long)]
        output_dir: PathBuf,
        /// Input files or directories to search for .svg files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Round {
            input,
            output,
            bitmap,
            scale,
            config,
        } => round_cmd(&input, &output, bitmap.as_deref(), scale, &config.to_config()),
        Command::Bitmap {
            input,
            output,
            scale,
            config,
        } => bitmap_cmd(&input, &output, scale, &config.to_config()),
        Command::Stats { input, config } => stats_cmd(&input, &config.to_config()),
        Command::Batch {
            output_dir,
            inputs,
            config,
        } => batch_cmd(&output_dir, &inputs, &config.to_config()),
    }
}

fn round_cmd(
    input: &Path,
    output: &Path,
    bitmap: Option<&Path>,
    scale: u32,
    config: &RoundConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let rounded = round_file(input, output, config)?;
    info!(
        "Rounded {} -> {} in {:.2?}",
        input.display(),
        output.display(),
        start.elapsed()
    );
    if let Some(path) = bitmap {
        save_bitmap(&rounded.grid, scale, path)?;
        info!("Wrote bitmap {}", path.display());
    }
    eprintln!(
        "Rounded {} of {} pixels into {}",
        rounded.summary.replaced(),
        rounded.summary.accounted(),
        output.display()
    );
    Ok(())
}

fn load_and_round(input: &Path, config: &RoundConfig) -> qr_round::Result<Rounded> {
    let document = Document::open(input)?;
    round_document(document, config)
}

fn bitmap_cmd(
    input: &Path,
    output: &Path,
    scale: u32,
    config: &RoundConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let rounded = load_and_round(input, config)?;
    save_bitmap(&rounded.grid, scale, output)?;
    eprintln!(
        "Wrote {}x{} grid to {}",
        rounded.grid.width(),
        rounded.grid.height(),
        output.display()
    );
    Ok(())
}

fn stats_cmd(input: &Path, config: &RoundConfig) -> Result<(), Box<dyn std::error::Error>> {
    let rounded = load_and_round(input, config)?;
    let stats = grid_stats(&rounded.grid);
    let summary = rounded.summary;

    println!("SVG: {}", input.display());
    println!(
        "Grid: {}x{} occupied={} total={} fill={:.2}%",
        stats.width,
        stats.height,
        stats.occupied,
        stats.total,
        stats.fill_ratio * 100.0
    );
    println!(
        "Pixels: found={} duplicates={}",
        summary.pixels, summary.duplicates
    );
    println!(
        "Shapes: circles={} ends={} corners={} kept={} marks={}",
        summary.circles, summary.ends, summary.corners, summary.kept, summary.marks
    );
    for row in rounded.bitmap() {
        let line: String = row
            .iter()
            .map(|&bit| if bit == 1 { '#' } else { '.' })
            .collect();
        println!("  {line}");
    }
    Ok(())
}

fn batch_cmd(
    output_dir: &Path,
    inputs: &[PathBuf],
    config: &RoundConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    std::fs::create_dir_all(output_dir)?;

    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(collect_svgs(input));
        } else {
            files.push(input.clone());
        }
    }
    if files.is_empty() {
        println!("No SVG files found");
        return Ok(());
    }

    let start = Instant::now();
    let failures: usize = files
        .par_iter()
        .map(|input| {
            let output = output_path_for(input, output_dir);
            match round_file(input, &output, config) {
                Ok(rounded) => {
                    info!(
                        "  [ok] {} -> {} ({} pixels)",
                        input.display(),
                        output.display(),
                        rounded.summary.accounted()
                    );
                    0
                }
                Err(err) => {
                    warn!("  [failed] {}: {}", input.display(), err);
                    1
                }
            }
        })
        .sum();

    println!(
        "Rounded {}/{} files in {:.2?}",
        files.len() - failures,
        files.len(),
        start.elapsed()
    );
    if failures > 0 {
        return Err(format!("{failures} file(s) failed").into());
    }
    Ok(())
}
