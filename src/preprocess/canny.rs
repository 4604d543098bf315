//! Canny reference generation.
//!
//! A "canny reference" is the ground-truth image a sketch is scored
//! against: Canny edges of the source photo, dilated once so the strokes
//! have body, then inverted so it reads as dark lines on white paper like
//! the hand drawings do.

use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;
use imageproc::edges::canny;
use tracing::{info, warn};

use crate::core::{Result, SketchScoreError};
use crate::preprocess::sketch_ops::{dilate_sketch, erode_sketch, inverted};

/// Canny hysteresis thresholds used throughout.
pub const CANNY_LOW: f32 = 100.0;
pub const CANNY_HIGH: f32 = 200.0;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tiff"];

/// Build a canny reference from a grayscale photo.
pub fn canny_reference(gray: &GrayImage, low: f32, high: f32, dilate_iterations: u8) -> GrayImage {
    let edges = canny(gray, low, high);
    let dilated = dilate_sketch(&edges, dilate_iterations);
    inverted(dilated)
}

/// Generate canny references for every image in `input_dir`, writing
/// `canny_<name>` files into `output_dir`. Unreadable files are skipped
/// with a warning. Returns the paths written.
pub fn generate_canny_references(
    input_dir: &Path,
    output_dir: &Path,
    low: f32,
    high: f32,
    dilate_iterations: u8,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .map_err(|e| SketchScoreError::io("create output dir", output_dir, e))?;

    let mut entries: Vec<PathBuf> = fs::read_dir(input_dir)
        .map_err(|e| SketchScoreError::io("read input dir", input_dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    entries.sort();

    let mut written = Vec::new();
    for path in entries {
        let gray = match image::open(&path) {
            Ok(img) => img.to_luma8(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read image, skipping");
                continue;
            }
        };

        let reference = canny_reference(&gray, low, high, dilate_iterations);

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed.png");
        let output_path = output_dir.join(format!("canny_{file_name}"));
        reference
            .save(&output_path)
            .map_err(|e| SketchScoreError::Image {
                path: output_path.clone(),
                source: e,
            })?;
        info!(path = %output_path.display(), "saved canny reference");
        written.push(output_path);
    }

    Ok(written)
}

/// Erosion and dilation series over the Canny edges of one image.
///
/// Produces `erode_1..=n` then `dilate_1..=n` variants, each inverted,
/// labelled the way their output files are named.
pub fn variation_series(gray: &GrayImage, max_iterations: u8) -> Vec<(String, GrayImage)> {
    let edges = canny(gray, CANNY_LOW, CANNY_HIGH);
    let mut out = Vec::with_capacity(2 * usize::from(max_iterations));
    for i in 1..=max_iterations {
        out.push((format!("erode_{i}"), inverted(erode_sketch(&edges, i))));
    }
    for i in 1..=max_iterations {
        out.push((format!("dilate_{i}"), inverted(dilate_sketch(&edges, i))));
    }
    out
}
