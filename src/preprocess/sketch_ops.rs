//! Pixel-level operations applied to sketches before embedding.
//!
//! The model-facing normalization is grayscale → binarize → replicate to
//! three channels; the geometric transforms (resize / rotate / morphology)
//! exist so score distributions can be measured under controlled
//! perturbations of the same drawing.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use imageproc::morphology;

/// Intensity threshold separating paper from stroke.
pub const BINARIZE_THRESHOLD: u8 = 200;

/// Threshold a grayscale image to pure black and white.
///
/// Pixels strictly above `threshold` become 255, everything else 0.
pub fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = gray.clone();
    for pixel in out.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > threshold { 255 } else { 0 };
    }
    out
}

/// Replicate a single-channel image into three identical channels.
///
/// The ViT patch embedding expects RGB input even for line art.
pub fn replicate_to_rgb(gray: &GrayImage) -> RgbImage {
    let mut out = RgbImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        let v = pixel.0[0];
        out.put_pixel(x, y, Rgb([v, v, v]));
    }
    out
}

/// Full model-facing normalization: grayscale, binarize, back to RGB.
pub fn binarize_for_model(img: &DynamicImage, threshold: u8) -> RgbImage {
    let gray = img.to_luma8();
    let binary = binarize(&gray, threshold);
    replicate_to_rgb(&binary)
}

/// Resize by a percentage of the original dimensions, Lanczos3.
///
/// Dimensions are clamped to at least one pixel so degenerate inputs
/// still produce a valid raster.
pub fn resize_percent(img: &DynamicImage, percent: u32) -> DynamicImage {
    let new_width = (img.width() * percent / 100).max(1);
    let new_height = (img.height() * percent / 100).max(1);
    img.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

/// Rotate by `degrees` with canvas expansion, bicubic interpolation.
///
/// The image is rotated inside a square big enough to hold it at any
/// angle, padded with `fill` (white for sketches on paper), then cropped
/// to the rotated bounding box, so no stroke is clipped. A non-square
/// image near a right angle has a bounding box narrower than itself, so
/// rotating a bounding-box-sized canvas would crop before the rotation.
pub fn rotate_expanded(img: &DynamicImage, degrees: f32, fill: u8) -> RgbImage {
    let rgb = img.to_rgb8();
    let (w, h) = (f64::from(rgb.width()), f64::from(rgb.height()));
    let theta = f64::from(degrees).to_radians();
    let (sin, cos) = theta.sin_cos();

    // Small slack keeps trig noise at right angles from inflating the box.
    let bound_w = (w * cos.abs() + h * sin.abs() - 1e-3).ceil().max(1.0) as u32;
    let bound_h = (w * sin.abs() + h * cos.abs() - 1e-3).ceil().max(1.0) as u32;

    let side = w.hypot(h).ceil() as u32 + 2;
    let mut canvas = RgbImage::from_pixel(side, side, Rgb([fill, fill, fill]));
    let offset_x = i64::from((side - rgb.width()) / 2);
    let offset_y = i64::from((side - rgb.height()) / 2);
    image::imageops::overlay(&mut canvas, &rgb, offset_x, offset_y);

    let rotated = rotate_about_center(
        &canvas,
        degrees.to_radians(),
        Interpolation::Bicubic,
        Rgb([fill, fill, fill]),
    );

    // Integer overlay offsets can leave the content half a pixel off the
    // canvas center; crop around where its center actually landed.
    let center = f64::from(side) / 2.0;
    let cx = offset_x as f64 + (w - 1.0) / 2.0 - center;
    let cy = offset_y as f64 + (h - 1.0) / 2.0 - center;
    let rx = center + cx * cos - cy * sin;
    let ry = center + cx * sin + cy * cos;

    let crop_x = ((rx - f64::from(bound_w - 1) / 2.0).round().max(0.0) as u32)
        .min(side - bound_w);
    let crop_y = ((ry - f64::from(bound_h - 1) / 2.0).round().max(0.0) as u32)
        .min(side - bound_h);

    image::imageops::crop_imm(&rotated, crop_x, crop_y, bound_w, bound_h).to_image()
}

/// Morphological dilation with a 3x3 structuring element, `iterations` times.
///
/// `Norm::LInf` with radius `k` is equivalent to `k` passes of a 3x3
/// square kernel.
pub fn dilate_sketch(gray: &GrayImage, iterations: u8) -> GrayImage {
    if iterations == 0 {
        return gray.clone();
    }
    morphology::dilate(gray, Norm::LInf, iterations)
}

/// Morphological erosion with a 3x3 structuring element, `iterations` times.
pub fn erode_sketch(gray: &GrayImage, iterations: u8) -> GrayImage {
    if iterations == 0 {
        return gray.clone();
    }
    morphology::erode(gray, Norm::LInf, iterations)
}

/// Invert a grayscale image in place and return it.
pub fn inverted(mut gray: GrayImage) -> GrayImage {
    for pixel in gray.pixels_mut() {
        *pixel = Luma([255 - pixel.0[0]]);
    }
    gray
}
