//! Geometric transforms applied to sketches before scoring: the fixed
//! comparison grid and the full rotation x resize x dilation sweep.

use image::DynamicImage;
use serde::Deserialize;

use crate::preprocess::{dilate_sketch, erode_sketch, resize_percent, rotate_expanded};

/// Background fill for rotations: white paper.
const ROTATE_FILL: u8 = 255;

/// One transform of the fixed comparison grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SketchTransform {
    Original,
    ResizePercent(u32),
    RotateDegrees(f32),
    /// Thicken strokes: N passes of a 3x3 kernel over the inverted image.
    Dilate(u8),
    Erode(u8),
}

impl SketchTransform {
    /// Stable label used for output file names and table columns.
    pub fn label(&self) -> String {
        match self {
            Self::Original => "original".to_string(),
            Self::ResizePercent(p) => format!("{p}percent"),
            Self::RotateDegrees(d) => format!("{}rotate", *d as i32),
            Self::Dilate(n) => format!("dilate_{n}"),
            Self::Erode(n) => format!("erode_{n}"),
        }
    }

    pub fn apply(&self, img: &DynamicImage) -> DynamicImage {
        match self {
            Self::Original => img.clone(),
            Self::ResizePercent(p) => resize_percent(img, *p),
            Self::RotateDegrees(d) => {
                DynamicImage::ImageRgb8(rotate_expanded(img, *d, ROTATE_FILL))
            }
            // Strokes are dark on white, so thickening them means eroding
            // the white background.
            Self::Dilate(n) => DynamicImage::ImageLuma8(erode_sketch(&img.to_luma8(), *n)),
            Self::Erode(n) => DynamicImage::ImageLuma8(dilate_sketch(&img.to_luma8(), *n)),
        }
    }
}

/// The grid the per-player transform comparison uses: original, two
/// resizes, two rotations, one dilation.
pub fn standard_grid() -> Vec<SketchTransform> {
    vec![
        SketchTransform::Original,
        SketchTransform::ResizePercent(75),
        SketchTransform::ResizePercent(150),
        SketchTransform::RotateDegrees(45.0),
        SketchTransform::RotateDegrees(90.0),
        SketchTransform::Dilate(1),
    ]
}

/// Parameter ranges for the full transform sweep. Defaults reproduce the
/// original experiment: rotation 0..=360 step 18, resize 50..=150 step 5,
/// dilation 1..=3 (1323 combinations).
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_rotation_max")]
    pub rotation_max: u32,
    #[serde(default = "default_rotation_step")]
    pub rotation_step: u32,
    #[serde(default = "default_resize_min")]
    pub resize_min: u32,
    #[serde(default = "default_resize_max")]
    pub resize_max: u32,
    #[serde(default = "default_resize_step")]
    pub resize_step: u32,
    #[serde(default = "default_dilation_min")]
    pub dilation_min: u8,
    #[serde(default = "default_dilation_max")]
    pub dilation_max: u8,
}

fn default_rotation_max() -> u32 {
    360
}
fn default_rotation_step() -> u32 {
    18
}
fn default_resize_min() -> u32 {
    50
}
fn default_resize_max() -> u32 {
    150
}
fn default_resize_step() -> u32 {
    5
}
fn default_dilation_min() -> u8 {
    1
}
fn default_dilation_max() -> u8 {
    3
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            rotation_max: default_rotation_max(),
            rotation_step: default_rotation_step(),
            resize_min: default_resize_min(),
            resize_max: default_resize_max(),
            resize_step: default_resize_step(),
            dilation_min: default_dilation_min(),
            dilation_max: default_dilation_max(),
        }
    }
}

/// One point of the sweep: resize, then rotate, then dilate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepPoint {
    pub degrees: u32,
    pub percent: u32,
    pub iterations: u8,
}

impl SweepPoint {
    pub fn apply(&self, img: &DynamicImage) -> DynamicImage {
        let resized = resize_percent(img, self.percent);
        let rotated = rotate_expanded(&resized, self.degrees as f32, ROTATE_FILL);
        let dilated = erode_sketch(&DynamicImage::ImageRgb8(rotated).to_luma8(), self.iterations);
        DynamicImage::ImageLuma8(dilated)
    }
}

impl SweepConfig {
    /// All combinations in rotation-major order. Zero steps are treated
    /// as one so a bad config cannot loop forever.
    pub fn points(&self) -> Vec<SweepPoint> {
        let rotation_step = self.rotation_step.max(1);
        let resize_step = self.resize_step.max(1);

        let mut points = Vec::new();
        let mut degrees = 0;
        while degrees <= self.rotation_max {
            let mut percent = self.resize_min;
            while percent <= self.resize_max {
                for iterations in self.dilation_min..=self.dilation_max {
                    points.push(SweepPoint {
                        degrees,
                        percent,
                        iterations,
                    });
                }
                percent += resize_step;
            }
            degrees += rotation_step;
        }
        points
    }
}
