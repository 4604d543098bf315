//! # candle-sketch-score
//!
//! Scores hand-drawn sketches against Canny edge references using Vision
//! Transformer embeddings and cosine similarity.
//!
//! The crate is one parameterized pipeline: load an image, normalize it for
//! the model (grayscale, binarize, replicate to RGB), run a single forward
//! pass through a pretrained ViT (`google/vit-base-patch16-224-in21k`) and
//! take the CLS-token hidden state as a 768-dim fingerprint, then compare
//! fingerprints with cosine similarity. On top of that sit drivers for the
//! `players/<name>/<drawing>` directory convention, geometric transform
//! grids and sweeps, win tallies, and two-sample t-test analysis of the
//! resulting score distributions.

pub mod analyze;
pub mod core;
pub mod embed;
pub mod pipeline;
pub mod preprocess;
pub mod report;

// Re-export the types most callers need
pub use crate::core::{cosine_similarity, Embedding, Result, SketchScoreError};
pub use crate::embed::{VitConfig, VitEncoder, VitImageProcessor};
pub use crate::pipeline::{ComparisonTable, SketchScorer};
