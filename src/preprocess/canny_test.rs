//! Unit tests for canny reference generation.

use super::canny::*;
use image::{GrayImage, Luma};
use rstest::*;
use tempfile::tempdir;

/// A white square on black background: crisp edges for Canny.
fn square_image() -> GrayImage {
    GrayImage::from_fn(64, 64, |x, y| {
        if (16..48).contains(&x) && (16..48).contains(&y) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

#[rstest]
fn test_canny_reference_is_mostly_white() {
    // After inversion the background (non-edge area) must be white.
    let reference = canny_reference(&square_image(), CANNY_LOW, CANNY_HIGH, 1);
    let white = reference.pixels().filter(|p| p.0[0] == 255).count();
    let total = reference.pixels().count();
    assert!(
        white * 2 > total,
        "expected mostly white, got {white}/{total}"
    );
}

#[rstest]
fn test_canny_reference_has_dark_strokes() {
    let reference = canny_reference(&square_image(), CANNY_LOW, CANNY_HIGH, 1);
    assert!(reference.pixels().any(|p| p.0[0] == 0));
}

#[rstest]
fn test_dilation_thickens_strokes() {
    let thin = canny_reference(&square_image(), CANNY_LOW, CANNY_HIGH, 1);
    let thick = canny_reference(&square_image(), CANNY_LOW, CANNY_HIGH, 3);
    let dark = |img: &GrayImage| img.pixels().filter(|p| p.0[0] == 0).count();
    assert!(dark(&thick) > dark(&thin));
}

#[rstest]
fn test_blank_image_produces_all_white_reference() {
    let blank = GrayImage::new(32, 32);
    let reference = canny_reference(&blank, CANNY_LOW, CANNY_HIGH, 1);
    assert!(reference.pixels().all(|p| p.0[0] == 255));
}

#[rstest]
fn test_variation_series_labels_and_count() {
    let series = variation_series(&square_image(), 5);
    assert_eq!(series.len(), 10);
    assert_eq!(series[0].0, "erode_1");
    assert_eq!(series[4].0, "erode_5");
    assert_eq!(series[5].0, "dilate_1");
    assert_eq!(series[9].0, "dilate_5");
}

#[rstest]
fn test_generate_canny_references_writes_prefixed_files() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    square_image().save(input.path().join("estrela.png")).unwrap();
    square_image().save(input.path().join("mack.png")).unwrap();
    // Not an image extension, must be ignored.
    std::fs::write(input.path().join("notes.txt"), "not an image").unwrap();

    let written =
        generate_canny_references(input.path(), output.path(), CANNY_LOW, CANNY_HIGH, 1).unwrap();

    assert_eq!(written.len(), 2);
    assert!(output.path().join("canny_estrela.png").exists());
    assert!(output.path().join("canny_mack.png").exists());
}

#[rstest]
fn test_generate_canny_references_skips_unreadable_files() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    std::fs::write(input.path().join("corrupt.png"), b"not a png").unwrap();
    square_image().save(input.path().join("ok.png")).unwrap();

    let written =
        generate_canny_references(input.path(), output.path(), CANNY_LOW, CANNY_HIGH, 1).unwrap();
    assert_eq!(written.len(), 1);
}
