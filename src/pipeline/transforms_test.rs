//! Unit tests for transform labels and sweep enumeration.

use super::transforms::*;
use image::{DynamicImage, RgbImage};
use rstest::*;

#[rstest]
fn test_standard_grid_labels() {
    let labels: Vec<String> = standard_grid().iter().map(|t| t.label()).collect();
    assert_eq!(
        labels,
        vec![
            "original",
            "75percent",
            "150percent",
            "45rotate",
            "90rotate",
            "dilate_1"
        ]
    );
}

#[rstest]
fn test_original_is_identity() {
    let img = DynamicImage::ImageRgb8(RgbImage::new(30, 20));
    let out = SketchTransform::Original.apply(&img);
    assert_eq!((out.width(), out.height()), (30, 20));
}

#[rstest]
fn test_resize_transform_scales() {
    let img = DynamicImage::ImageRgb8(RgbImage::new(100, 100));
    let out = SketchTransform::ResizePercent(75).apply(&img);
    assert_eq!((out.width(), out.height()), (75, 75));
}

#[rstest]
fn test_rotate_transform_expands() {
    let img = DynamicImage::ImageRgb8(RgbImage::new(100, 100));
    let out = SketchTransform::RotateDegrees(45.0).apply(&img);
    assert!(out.width() > 100);
}

#[rstest]
fn test_dilate_thickens_dark_strokes() {
    // A thin dark line on white paper.
    let mut img = RgbImage::from_pixel(32, 32, image::Rgb([255, 255, 255]));
    for x in 0..32 {
        img.put_pixel(x, 16, image::Rgb([0, 0, 0]));
    }
    let out = SketchTransform::Dilate(1).apply(&DynamicImage::ImageRgb8(img));
    let dark = out.to_luma8().pixels().filter(|p| p.0[0] == 0).count();
    assert!(dark > 32, "expected stroke to thicken, got {dark} dark pixels");
}

#[rstest]
fn test_default_sweep_has_1323_points() {
    // 21 rotations x 21 resizes x 3 dilation levels.
    let sweep = SweepConfig::default();
    assert_eq!(sweep.points().len(), 21 * 21 * 3);
}

#[rstest]
fn test_sweep_order_is_rotation_major() {
    let sweep = SweepConfig::default();
    let points = sweep.points();
    assert_eq!(
        points[0],
        SweepPoint {
            degrees: 0,
            percent: 50,
            iterations: 1
        }
    );
    assert_eq!(points[1].iterations, 2);
    assert_eq!(points[3].percent, 55);
    let last = points.last().unwrap();
    assert_eq!((last.degrees, last.percent, last.iterations), (360, 150, 3));
}

#[rstest]
fn test_sweep_config_deserializes_with_defaults() {
    let sweep: SweepConfig = serde_json::from_str(r#"{"rotation_step": 90}"#).unwrap();
    assert_eq!(sweep.rotation_step, 90);
    assert_eq!(sweep.resize_step, 5);
    // 5 rotations x 21 resizes x 3 dilations
    assert_eq!(sweep.points().len(), 5 * 21 * 3);
}

#[rstest]
fn test_sweep_zero_step_does_not_hang() {
    let sweep: SweepConfig =
        serde_json::from_str(r#"{"rotation_step": 0, "rotation_max": 2}"#).unwrap();
    assert_eq!(sweep.points().len(), 3 * 21 * 3);
}

#[rstest]
fn test_sweep_point_apply_produces_valid_image() {
    let img = DynamicImage::ImageRgb8(RgbImage::new(40, 40));
    let point = SweepPoint {
        degrees: 45,
        percent: 150,
        iterations: 2,
    };
    let out = point.apply(&img);
    assert!(out.width() > 0 && out.height() > 0);
}
