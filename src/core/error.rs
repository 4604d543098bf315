//! Crate error type.
//!
//! Structured variants instead of stringly-typed failures: callers that
//! drive whole directories need to tell "this drawing is missing" (skip
//! with a warning) apart from "the model cannot be loaded" (fatal).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SketchScoreError {
    #[error("io error during {operation} for {path}: {source}")]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("model {operation} failed: {message}")]
    Model { operation: String, message: String },

    #[error("tensor operation failed: {0}")]
    Tensor(#[from] candle_core::Error),

    #[error("invalid model config at {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("invalid score file {path}: {message}")]
    ScoreFile { path: PathBuf, message: String },

    #[error("dataset '{name}' has {n} samples, need at least {required}")]
    InsufficientSamples {
        name: String,
        n: usize,
        required: usize,
    },

    #[error("no player directories found under {0}")]
    NoPlayers(PathBuf),

    #[error("no drawings found under {0}")]
    NoDrawings(PathBuf),
}

impl SketchScoreError {
    pub fn io(operation: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    pub fn model(operation: impl Into<String>, message: impl ToString) -> Self {
        Self::Model {
            operation: operation.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SketchScoreError>;
