//! PNG plots of score distributions.
//!
//! Histograms and box plots are drawn directly with rectangle and line
//! primitives. Every dataset is rendered into its own horizontal band
//! of a shared image, over a common value axis so the bands compare.

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use tracing::debug;

use crate::core::{Result, SketchScoreError};

const PLOT_WIDTH: u32 = 640;
const BAND_HEIGHT: u32 = 160;
const MARGIN: u32 = 24;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([64, 64, 64]);

const PALETTE: [Rgb<u8>; 6] = [
    Rgb([66, 133, 244]),
    Rgb([219, 68, 55]),
    Rgb([15, 157, 88]),
    Rgb([244, 160, 0]),
    Rgb([121, 85, 212]),
    Rgb([0, 150, 166]),
];

/// Binned counts over a fixed value range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.counts.len() as f64
    }
}

/// Bin `data` into `bins` equal-width buckets between its min and max.
/// The maximum value lands in the last bucket.
pub fn histogram(data: &[f64], bins: usize) -> Result<Histogram> {
    if data.is_empty() || bins == 0 {
        return Err(SketchScoreError::InsufficientSamples {
            name: "histogram".to_string(),
            n: data.len(),
            required: 1,
        });
    }

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut counts = vec![0usize; bins];
    if max > min {
        let width = (max - min) / bins as f64;
        for &value in data {
            let bin = (((value - min) / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }
    } else {
        // Degenerate range, everything in one bucket.
        counts[0] = data.len();
    }

    Ok(Histogram { min, max, counts })
}

/// Render one histogram band per dataset into a single PNG, sharing the
/// value axis across bands. Bands run top to bottom in dataset order,
/// each in its palette color; callers print the matching legend.
pub fn render_histograms(
    datasets: &[(String, Vec<f64>)],
    bins: usize,
    path: &Path,
) -> Result<()> {
    let (lo, hi) = value_range(datasets)?;
    let span = if hi > lo { hi - lo } else { 1.0 };

    let mut img = blank_canvas(datasets.len());
    for (index, (name, data)) in datasets.iter().enumerate() {
        debug!(band = index, dataset = %name, "rendering histogram band");
        let hist = histogram(data, bins)?;
        let peak = hist.counts.iter().copied().max().unwrap_or(1).max(1);
        let color = PALETTE[index % PALETTE.len()];

        let top = index as u32 * BAND_HEIGHT + MARGIN;
        let bottom = (index as u32 + 1) * BAND_HEIGHT - MARGIN;
        let band_height = bottom - top;
        let baseline = bottom as f32;

        draw_line_segment_mut(
            &mut img,
            (MARGIN as f32, baseline),
            ((PLOT_WIDTH - MARGIN) as f32, baseline),
            AXIS,
        );

        let plot_span = (PLOT_WIDTH - 2 * MARGIN) as f64;
        let bin_width = hist.bin_width().max(f64::MIN_POSITIVE);
        for (bin, &count) in hist.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let value_lo = hist.min + bin as f64 * bin_width;
            let value_hi = value_lo + bin_width;
            let x0 = MARGIN as f64 + (value_lo - lo) / span * plot_span;
            let x1 = MARGIN as f64 + (value_hi - lo) / span * plot_span;
            let bar_width = ((x1 - x0) as u32).max(1);
            let bar_height =
                ((count as f64 / peak as f64) * band_height as f64).round() as u32;
            let bar_height = bar_height.max(1);
            draw_filled_rect_mut(
                &mut img,
                Rect::at(x0 as i32, (bottom - bar_height) as i32)
                    .of_size(bar_width, bar_height),
                color,
            );
        }
    }

    save_png(&img, path)
}

/// Render one box-and-whisker band per dataset into a single PNG. Band
/// order and colors follow the dataset order, as in [`render_histograms`].
pub fn render_box_plots(datasets: &[(String, Vec<f64>)], path: &Path) -> Result<()> {
    let (lo, hi) = value_range(datasets)?;
    let span = if hi > lo { hi - lo } else { 1.0 };
    let plot_span = (PLOT_WIDTH - 2 * MARGIN) as f64;
    let to_x = |value: f64| (MARGIN as f64 + (value - lo) / span * plot_span) as f32;

    let mut img = blank_canvas(datasets.len());
    for (index, (name, data)) in datasets.iter().enumerate() {
        debug!(band = index, dataset = %name, "rendering box plot band");
        if data.is_empty() {
            return Err(SketchScoreError::InsufficientSamples {
                name: name.clone(),
                n: 0,
                required: 1,
            });
        }
        let mut sorted = data.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);

        let color = PALETTE[index % PALETTE.len()];
        let top = index as u32 * BAND_HEIGHT + MARGIN;
        let bottom = (index as u32 + 1) * BAND_HEIGHT - MARGIN;
        let mid = ((top + bottom) / 2) as f32;

        // Whiskers.
        draw_line_segment_mut(&mut img, (to_x(min), mid), (to_x(q1), mid), AXIS);
        draw_line_segment_mut(&mut img, (to_x(q3), mid), (to_x(max), mid), AXIS);
        for cap in [min, max] {
            draw_line_segment_mut(
                &mut img,
                (to_x(cap), top as f32 + 20.0),
                (to_x(cap), bottom as f32 - 20.0),
                AXIS,
            );
        }

        // Interquartile box with the median line inside.
        let box_left = to_x(q1) as i32;
        let box_width = ((to_x(q3) - to_x(q1)) as u32).max(1);
        draw_filled_rect_mut(
            &mut img,
            Rect::at(box_left, top as i32).of_size(box_width, bottom - top),
            color,
        );
        draw_hollow_rect_mut(
            &mut img,
            Rect::at(box_left, top as i32).of_size(box_width, bottom - top),
            AXIS,
        );
        draw_line_segment_mut(
            &mut img,
            (to_x(median), top as f32),
            (to_x(median), bottom as f32),
            AXIS,
        );
    }

    save_png(&img, path)
}

fn value_range(datasets: &[(String, Vec<f64>)]) -> Result<(f64, f64)> {
    let values: Vec<f64> = datasets.iter().flat_map(|(_, d)| d.iter().copied()).collect();
    if values.is_empty() {
        return Err(SketchScoreError::InsufficientSamples {
            name: "plot".to_string(),
            n: 0,
            required: 1,
        });
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok((lo, hi))
}

fn blank_canvas(bands: usize) -> RgbImage {
    let height = (bands.max(1) as u32) * BAND_HEIGHT;
    RgbImage::from_pixel(PLOT_WIDTH, height, BACKGROUND)
}

fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| SketchScoreError::io("create plot dir", parent, e))?;
    }
    img.save(path).map_err(|source| SketchScoreError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Linear-interpolation quantile over pre-sorted data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}
