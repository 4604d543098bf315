//! Core types: embeddings, cosine similarity, and the crate error type.

pub mod error;
pub mod similarity;

pub use error::{Result, SketchScoreError};
pub use similarity::{cosine_similarity, Embedding};

#[cfg(test)]
mod similarity_test;
