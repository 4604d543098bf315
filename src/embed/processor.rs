//! Image-to-tensor preprocessing matching the HF `ViTImageProcessor`
//! defaults for `google/vit-base-patch16-224-in21k`: resize straight to
//! 224x224 (no aspect preservation, no crop), scale by 1/255, then
//! normalize with mean 0.5 / std 0.5 per channel.

use candle_core::{Device, Tensor};
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

use crate::core::Result;

#[derive(Debug, Clone)]
pub struct VitImageProcessor {
    size: u32,
    mean: [f32; 3],
    std: [f32; 3],
}

impl Default for VitImageProcessor {
    fn default() -> Self {
        Self {
            size: 224,
            mean: [0.5, 0.5, 0.5],
            std: [0.5, 0.5, 0.5],
        }
    }
}

impl VitImageProcessor {
    pub fn new(size: u32, mean: [f32; 3], std: [f32; 3]) -> Self {
        Self { size, mean, std }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Convert an RGB image into a `[1, 3, size, size]` f32 tensor.
    pub fn preprocess(&self, img: &RgbImage, device: &Device) -> Result<Tensor> {
        let resized = if img.dimensions() == (self.size, self.size) {
            img.clone()
        } else {
            image::imageops::resize(img, self.size, self.size, FilterType::Triangle)
        };

        let side = self.size as usize;
        let mut pixels = Vec::with_capacity(3 * side * side);
        // CHW layout, normalized per channel.
        for c in 0..3 {
            for y in 0..self.size {
                for x in 0..self.size {
                    let value = f32::from(resized.get_pixel(x, y)[c]) / 255.0;
                    pixels.push((value - self.mean[c]) / self.std[c]);
                }
            }
        }

        Ok(Tensor::from_vec(pixels, (1, 3, side, side), device)?)
    }

    pub fn preprocess_dynamic(&self, img: &DynamicImage, device: &Device) -> Result<Tensor> {
        self.preprocess(&img.to_rgb8(), device)
    }
}
