//! Embedding vectors and cosine similarity.

use crate::core::{Result, SketchScoreError};

/// A fixed-length image fingerprint: the CLS-token hidden state of a
/// pretrained vision transformer (768 dims for ViT-Base).
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// L2 norm of the vector.
    pub fn norm(&self) -> f32 {
        self.0.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Cosine similarity against another embedding.
    pub fn cosine(&self, other: &Embedding) -> Result<f32> {
        cosine_similarity(self.as_slice(), other.as_slice())
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}

/// Cosine similarity between two vectors, in [-1, 1].
///
/// Returns exactly `0.0` when either vector has zero norm. That is a
/// convention, not mathematics: a blank image produces a degenerate
/// fingerprint and we score it as "no similarity" rather than dividing
/// by zero.
///
/// Mismatched dimensions are an error rather than silent truncation.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(SketchScoreError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())) as f32)
}
