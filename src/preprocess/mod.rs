//! Image preprocessing: binarization, geometric transforms, morphology,
//! and Canny reference generation.

pub mod canny;
pub mod sketch_ops;

pub use canny::{canny_reference, generate_canny_references, variation_series, CANNY_HIGH, CANNY_LOW};
pub use sketch_ops::{
    binarize, binarize_for_model, dilate_sketch, erode_sketch, replicate_to_rgb, resize_percent,
    rotate_expanded, BINARIZE_THRESHOLD,
};

#[cfg(test)]
mod canny_test;
