//! Vision transformer embedding: checkpoint resolution, the hand-built
//! ViT encoder, and HF-processor-compatible image preprocessing.

pub mod config;
pub mod processor;
pub mod vit_encoder;

pub use config::{resolve_model_files, ModelFiles, VitConfig, WeightsFormat, DEFAULT_MODEL_ID};
pub use processor::VitImageProcessor;
pub use vit_encoder::VitEncoder;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod processor_test;
