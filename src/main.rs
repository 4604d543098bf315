//! Command-line driver for the sketch scoring experiments.

use std::path::PathBuf;

use anyhow::{Context, Result};
use candle_core::Device;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use candle_sketch_score::analyze::{
    pairwise_ttests, smallest_mean_differences, summarize, tally_wins,
};
use candle_sketch_score::embed::DEFAULT_MODEL_ID;
use candle_sketch_score::pipeline::{
    compare_players, standard_grid, transform_grid, transform_sweep, SweepConfig,
};
use candle_sketch_score::preprocess::{
    generate_canny_references, variation_series, CANNY_HIGH, CANNY_LOW,
};
use candle_sketch_score::report::{
    read_scores, render_box_plots, render_console, render_histograms, write_html, write_scores,
};
use candle_sketch_score::SketchScorer;

#[derive(Parser)]
#[command(
    name = "sketch-score",
    about = "Score hand-drawn sketches against Canny edge references with ViT embeddings",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate Canny edge references for every photo in a directory
    Canny {
        /// Directory of source photos
        #[arg(long, default_value = "fotos")]
        input_dir: PathBuf,
        /// Where the canny_<name> references are written
        #[arg(long, default_value = "fotos_canny")]
        output_dir: PathBuf,
        /// Lower hysteresis threshold
        #[arg(long, default_value_t = CANNY_LOW)]
        low: f32,
        /// Upper hysteresis threshold
        #[arg(long, default_value_t = CANNY_HIGH)]
        high: f32,
        /// Dilation passes applied to the edge map
        #[arg(long, default_value_t = 1)]
        dilate: u8,
    },

    /// Write erosion/dilation variations of one photo's Canny edges
    Variations {
        /// Source photo
        image: PathBuf,
        #[arg(long, default_value = "canny_variations")]
        output_dir: PathBuf,
        /// Generate erode_1..=N and dilate_1..=N variants
        #[arg(long, default_value_t = 5)]
        max_iterations: u8,
    },

    /// Score every player's drawings against the canny references
    Compare {
        #[arg(long, default_value = "players")]
        players_dir: PathBuf,
        #[arg(long, default_value = "fotos_canny")]
        canny_dir: PathBuf,
        #[arg(long, default_value = DEFAULT_MODEL_ID)]
        model: String,
        /// Also write an HTML report with embedded images
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Score the fixed transform grid of one player's drawings
    Transforms {
        /// One player's drawing directory
        player_dir: PathBuf,
        #[arg(long, default_value = "fotos_canny")]
        canny_dir: PathBuf,
        /// Where transformed images are written
        #[arg(long, default_value = "transformation_results")]
        output_dir: PathBuf,
        #[arg(long, default_value = DEFAULT_MODEL_ID)]
        model: String,
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Run the full rotation x resize x dilation sweep for one drawing
    Sweep {
        /// The drawing to sweep
        image: PathBuf,
        /// The canny reference to score against
        canny: PathBuf,
        /// Score file to write, one value per line
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 360)]
        rotation_max: u32,
        #[arg(long, default_value_t = 18)]
        rotation_step: u32,
        #[arg(long, default_value_t = 50)]
        resize_min: u32,
        #[arg(long, default_value_t = 150)]
        resize_max: u32,
        #[arg(long, default_value_t = 5)]
        resize_step: u32,
        #[arg(long, default_value_t = 1)]
        dilation_min: u8,
        #[arg(long, default_value_t = 3)]
        dilation_max: u8,
        #[arg(long, default_value = DEFAULT_MODEL_ID)]
        model: String,
    },

    /// Compare score distributions from sweep output files
    Analyze {
        /// Score files, one dataset each; names come from the file stems
        #[arg(required = true)]
        scores: Vec<PathBuf>,
        /// Write a histogram panel to this PNG
        #[arg(long)]
        histograms: Option<PathBuf>,
        /// Write a box plot panel to this PNG
        #[arg(long)]
        box_plots: Option<PathBuf>,
        #[arg(long, default_value_t = 50)]
        bins: usize,
        /// How many closest-mean pairs to report
        #[arg(long, default_value_t = 5)]
        closest: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match Cli::parse().command {
        Command::Canny {
            input_dir,
            output_dir,
            low,
            high,
            dilate,
        } => {
            let written = generate_canny_references(&input_dir, &output_dir, low, high, dilate)?;
            info!(count = written.len(), "canny references written");
        }

        Command::Variations {
            image,
            output_dir,
            max_iterations,
        } => {
            let gray = image::open(&image)
                .with_context(|| format!("failed to open {}", image.display()))?
                .to_luma8();
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("failed to create {}", output_dir.display()))?;

            let stem = image
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("image")
                .to_string();
            for (label, variant) in variation_series(&gray, max_iterations) {
                let path = output_dir.join(format!("canny_{stem}_{label}.png"));
                variant
                    .save(&path)
                    .with_context(|| format!("failed to save {}", path.display()))?;
                info!(path = %path.display(), "saved variation");
            }
        }

        Command::Compare {
            players_dir,
            canny_dir,
            model,
            html,
        } => {
            let scorer = SketchScorer::new(&model, Device::Cpu)?;
            let table = compare_players(&scorer, &players_dir, &canny_dir)?;

            print!("{}", render_console(&table));

            let tally = tally_wins(&table);
            println!("\nWins over {} drawings:", tally.drawings_scored);
            for (player, wins) in tally.ranking() {
                println!("  {player}: {wins}");
            }

            if let Some(path) = html {
                write_html(&path, &table, "Similarity per player")?;
                info!(path = %path.display(), "html report written");
            }
        }

        Command::Transforms {
            player_dir,
            canny_dir,
            output_dir,
            model,
            html,
        } => {
            let scorer = SketchScorer::new(&model, Device::Cpu)?;
            let table = transform_grid(
                &scorer,
                &player_dir,
                &canny_dir,
                &output_dir,
                &standard_grid(),
            )?;

            print!("{}", render_console(&table));

            if let Some(path) = html {
                write_html(&path, &table, "Similarity per transform")?;
                info!(path = %path.display(), "html report written");
            }
        }

        Command::Sweep {
            image,
            canny,
            output,
            rotation_max,
            rotation_step,
            resize_min,
            resize_max,
            resize_step,
            dilation_min,
            dilation_max,
            model,
        } => {
            let sweep = SweepConfig {
                rotation_max,
                rotation_step,
                resize_min,
                resize_max,
                resize_step,
                dilation_min,
                dilation_max,
            };
            let scorer = SketchScorer::new(&model, Device::Cpu)?;
            let scores = transform_sweep(&scorer, &image, &canny, &sweep)?;
            write_scores(&output, &scores)?;
            info!(path = %output.display(), count = scores.len(), "sweep scores written");
        }

        Command::Analyze {
            scores,
            histograms,
            box_plots,
            bins,
            closest,
        } => {
            let mut datasets = Vec::with_capacity(scores.len());
            for path in &scores {
                let name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("scores")
                    .to_string();
                datasets.push((name, read_scores(path)?));
            }

            for (name, data) in &datasets {
                let summary = summarize(name, data)?;
                println!(
                    "{name}: n={} mean={:.4} median={:.4} std={:.4} min={:.4} max={:.4}",
                    summary.n,
                    summary.mean,
                    summary.median,
                    summary.std_dev,
                    summary.min,
                    summary.max
                );
            }

            println!("\nPairwise t-tests:");
            for result in pairwise_ttests(&datasets)? {
                println!(
                    "  {} vs {}: t={:.4} p={:.6}{}",
                    result.left,
                    result.right,
                    result.test.t_statistic,
                    result.test.p_value,
                    if result.significant {
                        "  (significant at 5%)"
                    } else {
                        ""
                    }
                );
            }

            println!("\nClosest means:");
            for diff in smallest_mean_differences(&datasets, closest) {
                println!(
                    "  {} ({:.4}) vs {} ({:.4}): |diff|={:.6}",
                    diff.left, diff.left_mean, diff.right, diff.right_mean, diff.difference
                );
            }

            if histograms.is_some() || box_plots.is_some() {
                println!("\nPlot bands, top to bottom:");
                for (index, (name, _)) in datasets.iter().enumerate() {
                    println!("  {}: {name}", index + 1);
                }
            }
            if let Some(path) = histograms {
                render_histograms(&datasets, bins, &path)?;
                info!(path = %path.display(), "histogram panel written");
            }
            if let Some(path) = box_plots {
                render_box_plots(&datasets, &path)?;
                info!(path = %path.display(), "box plot panel written");
            }
        }
    }

    Ok(())
}
