//! Unit tests for the image-to-tensor processor.

use super::processor::*;
use candle_core::Device;
use image::{Rgb, RgbImage};
use rstest::*;

#[rstest]
fn test_output_shape_is_nchw() {
    let processor = VitImageProcessor::default();
    let img = RgbImage::new(100, 60);
    let tensor = processor.preprocess(&img, &Device::Cpu).unwrap();
    assert_eq!(tensor.dims(), &[1, 3, 224, 224]);
}

#[rstest]
fn test_black_pixels_map_to_minus_one() {
    let processor = VitImageProcessor::default();
    let img = RgbImage::from_pixel(224, 224, Rgb([0, 0, 0]));
    let tensor = processor.preprocess(&img, &Device::Cpu).unwrap();
    let values: Vec<f32> = tensor.flatten_all().unwrap().to_vec1().unwrap();
    assert!(values.iter().all(|v| (v + 1.0).abs() < 1e-6));
}

#[rstest]
fn test_white_pixels_map_to_plus_one() {
    let processor = VitImageProcessor::default();
    let img = RgbImage::from_pixel(224, 224, Rgb([255, 255, 255]));
    let tensor = processor.preprocess(&img, &Device::Cpu).unwrap();
    let values: Vec<f32> = tensor.flatten_all().unwrap().to_vec1().unwrap();
    assert!(values.iter().all(|v| (v - 1.0).abs() < 1e-6));
}

#[rstest]
fn test_channels_are_separated_in_chw_order() {
    let processor = VitImageProcessor::default();
    // Pure red: channel 0 all ones, channels 1 and 2 all minus one.
    let img = RgbImage::from_pixel(224, 224, Rgb([255, 0, 0]));
    let tensor = processor.preprocess(&img, &Device::Cpu).unwrap();
    let values: Vec<f32> = tensor.flatten_all().unwrap().to_vec1().unwrap();

    let plane = 224 * 224;
    assert!(values[..plane].iter().all(|v| (v - 1.0).abs() < 1e-6));
    assert!(values[plane..].iter().all(|v| (v + 1.0).abs() < 1e-6));
}

#[rstest]
fn test_preprocess_is_deterministic() {
    let processor = VitImageProcessor::default();
    let img = RgbImage::from_fn(90, 120, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    let a: Vec<f32> = processor
        .preprocess(&img, &Device::Cpu)
        .unwrap()
        .flatten_all()
        .unwrap()
        .to_vec1()
        .unwrap();
    let b: Vec<f32> = processor
        .preprocess(&img, &Device::Cpu)
        .unwrap()
        .flatten_all()
        .unwrap()
        .to_vec1()
        .unwrap();
    assert_eq!(a, b);
}

#[rstest]
fn test_custom_size() {
    let processor = VitImageProcessor::new(32, [0.5; 3], [0.5; 3]);
    let img = RgbImage::new(64, 64);
    let tensor = processor.preprocess(&img, &Device::Cpu).unwrap();
    assert_eq!(tensor.dims(), &[1, 3, 32, 32]);
}
