//! The scoring pipeline: a [`SketchScorer`] owning the processor and
//! encoder, plus directory-level drivers for the
//! `players/<name>/<drawing>` + `fotos_canny/canny_<drawing>` convention.

pub mod players;
pub mod transforms;

pub use players::{find_canny_reference, list_drawings, list_players};
pub use transforms::{standard_grid, SketchTransform, SweepConfig, SweepPoint};

use std::path::{Path, PathBuf};

use candle_core::Device;
use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::core::{Embedding, Result, SketchScoreError};
use crate::embed::{VitEncoder, VitImageProcessor};
use crate::preprocess::{binarize_for_model, BINARIZE_THRESHOLD};

/// How a sketch is normalized before the forward pass.
///
/// The player-comparison experiments binarize drawings so pencil pressure
/// and paper tone do not leak into the fingerprint; the transform sweeps
/// embed the raster as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchNormalization {
    /// Grayscale, threshold at 200, replicate to RGB.
    Binarized,
    /// Feed the image to the processor unchanged.
    Raw,
}

/// Anything that can turn an image into an embedding. The seam exists so
/// directory drivers can be exercised without model weights.
pub trait ImageEmbedder {
    fn embed(&self, img: &DynamicImage, normalization: SketchNormalization) -> Result<Embedding>;

    fn embed_path(&self, path: &Path, normalization: SketchNormalization) -> Result<Embedding> {
        let img = image::open(path).map_err(|e| SketchScoreError::Image {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.embed(&img, normalization)
    }
}

/// ViT-backed scorer. Loads weights once; every embedding is one forward
/// pass, no caching and no batching.
pub struct SketchScorer {
    processor: VitImageProcessor,
    encoder: VitEncoder,
    device: Device,
    binarize_threshold: u8,
}

impl SketchScorer {
    pub fn new(model_id: &str, device: Device) -> Result<Self> {
        let encoder = VitEncoder::from_pretrained(model_id, &device)?;
        info!(model_id, hidden_size = encoder.hidden_size(), "sketch scorer ready");
        Ok(Self {
            processor: VitImageProcessor::default(),
            encoder,
            device,
            binarize_threshold: BINARIZE_THRESHOLD,
        })
    }

    pub fn with_binarize_threshold(mut self, threshold: u8) -> Self {
        self.binarize_threshold = threshold;
        self
    }

    /// Embed with the standard sketch normalization.
    pub fn embed_image(&self, img: &DynamicImage) -> Result<Embedding> {
        self.embed(img, SketchNormalization::Binarized)
    }

    pub fn score(&self, a: &Embedding, b: &Embedding) -> Result<f32> {
        a.cosine(b)
    }

    /// Embed two image files and score them against each other.
    pub fn score_paths(&self, a: &Path, b: &Path) -> Result<f32> {
        let left = self.embed_path(a, SketchNormalization::Binarized)?;
        let right = self.embed_path(b, SketchNormalization::Binarized)?;
        self.score(&left, &right)
    }
}

impl ImageEmbedder for SketchScorer {
    fn embed(&self, img: &DynamicImage, normalization: SketchNormalization) -> Result<Embedding> {
        let tensor = match normalization {
            SketchNormalization::Binarized => {
                let rgb = binarize_for_model(img, self.binarize_threshold);
                self.processor.preprocess(&rgb, &self.device)?
            }
            SketchNormalization::Raw => self.processor.preprocess_dynamic(img, &self.device)?,
        };
        let cls = self.encoder.forward(&tensor)?;
        Ok(Embedding::new(cls.squeeze(0)?.to_vec1::<f32>()?))
    }
}

/// One scored cell: the similarity (if the drawing existed and decoded)
/// and the image it came from, kept for HTML rendering.
#[derive(Debug, Clone)]
pub struct Cell {
    pub score: Option<f32>,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub drawing: String,
    pub reference_image: PathBuf,
    pub cells: Vec<Cell>,
}

/// Similarity table: one row per drawing, one column per player (or per
/// transform).
#[derive(Debug, Clone)]
pub struct ComparisonTable {
    pub columns: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

/// Score every player's drawings against the canny references.
///
/// The drawing list comes from the first player's directory. A drawing
/// without a canny reference is skipped; a player missing a drawing gets
/// an empty cell. Both are warnings, not errors.
pub fn compare_players(
    embedder: &impl ImageEmbedder,
    players_dir: &Path,
    canny_dir: &Path,
) -> Result<ComparisonTable> {
    let players = list_players(players_dir)?;
    let drawings = list_drawings(&players_dir.join(&players[0]))?;

    let mut rows = Vec::new();
    for filename in &drawings {
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename)
            .to_string();

        let Some(canny_path) = find_canny_reference(canny_dir, &stem) else {
            warn!(drawing = %stem, "no canny reference found, skipping");
            continue;
        };
        let canny_embedding = embedder.embed_path(&canny_path, SketchNormalization::Binarized)?;

        let mut cells = Vec::with_capacity(players.len());
        for player in &players {
            let path = players_dir.join(player).join(filename);
            if !path.is_file() {
                warn!(player = %player, drawing = %filename, "drawing missing, scoring as N/A");
                cells.push(Cell {
                    score: None,
                    image: None,
                });
                continue;
            }
            match embedder.embed_path(&path, SketchNormalization::Binarized) {
                Ok(embedding) => {
                    let score = embedding.cosine(&canny_embedding)?;
                    debug!(player = %player, drawing = %stem, score, "scored drawing");
                    cells.push(Cell {
                        score: Some(score),
                        image: Some(path),
                    });
                }
                Err(e) => {
                    warn!(player = %player, drawing = %filename, error = %e, "failed to embed drawing, scoring as N/A");
                    cells.push(Cell {
                        score: None,
                        image: Some(path),
                    });
                }
            }
        }

        rows.push(ComparisonRow {
            drawing: stem,
            reference_image: canny_path,
            cells,
        });
    }

    Ok(ComparisonTable {
        columns: players,
        rows,
    })
}

/// Score a fixed set of transforms of one player's drawings against the
/// canny references. Transformed images are written to `output_dir` so
/// the HTML report can show what was actually scored.
pub fn transform_grid(
    embedder: &impl ImageEmbedder,
    player_dir: &Path,
    canny_dir: &Path,
    output_dir: &Path,
    transforms: &[SketchTransform],
) -> Result<ComparisonTable> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| SketchScoreError::io("create output dir", output_dir, e))?;

    let drawings = list_drawings(player_dir)?;
    let columns: Vec<String> = transforms.iter().map(|t| t.label()).collect();

    let mut rows = Vec::new();
    for filename in &drawings {
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename)
            .to_string();

        let Some(canny_path) = find_canny_reference(canny_dir, &stem) else {
            warn!(drawing = %stem, "no canny reference found, skipping");
            continue;
        };
        let canny_embedding = embedder.embed_path(&canny_path, SketchNormalization::Binarized)?;

        let source = image::open(player_dir.join(filename)).map_err(|e| SketchScoreError::Image {
            path: player_dir.join(filename),
            source: e,
        })?;

        let mut cells = Vec::with_capacity(transforms.len());
        for transform in transforms {
            let transformed = transform.apply(&source);
            let out_path = output_dir.join(format!("{stem}_{}.png", transform.label()));
            transformed
                .save(&out_path)
                .map_err(|e| SketchScoreError::Image {
                    path: out_path.clone(),
                    source: e,
                })?;

            let embedding = embedder.embed(&transformed, SketchNormalization::Binarized)?;
            let score = embedding.cosine(&canny_embedding)?;
            debug!(drawing = %stem, transform = %transform.label(), score, "scored transform");
            cells.push(Cell {
                score: Some(score),
                image: Some(out_path),
            });
        }

        rows.push(ComparisonRow {
            drawing: stem,
            reference_image: canny_path,
            cells,
        });
    }

    Ok(ComparisonTable { columns, rows })
}

/// Run the full rotation x resize x dilation sweep for one drawing,
/// returning one similarity per combination in sweep order.
pub fn transform_sweep(
    embedder: &impl ImageEmbedder,
    image_path: &Path,
    canny_path: &Path,
    sweep: &SweepConfig,
) -> Result<Vec<f32>> {
    let canny_embedding = embedder.embed_path(canny_path, SketchNormalization::Raw)?;
    let source = image::open(image_path).map_err(|e| SketchScoreError::Image {
        path: image_path.to_path_buf(),
        source: e,
    })?;

    let points = sweep.points();
    info!(
        image = %image_path.display(),
        combinations = points.len(),
        "starting transform sweep"
    );

    let mut scores = Vec::with_capacity(points.len());
    for point in points {
        let transformed = point.apply(&source);
        let embedding = embedder.embed(&transformed, SketchNormalization::Raw)?;
        let score = embedding.cosine(&canny_embedding)?;
        debug!(
            degrees = point.degrees,
            percent = point.percent,
            iterations = point.iterations,
            score,
            "sweep point"
        );
        scores.push(score);
    }

    Ok(scores)
}

#[cfg(test)]
mod transforms_test;
