//! ViT checkpoint configuration and weight-file resolution.
//!
//! `model_id` is either a local directory containing `config.json` plus
//! weights, or a HuggingFace model id fetched through `hf-hub`. Weights in
//! `model.safetensors` are preferred; `pytorch_model.bin` is the fallback
//! for checkpoints that were never converted.

use std::path::{Path, PathBuf};

use hf_hub::{api::sync::Api, Repo, RepoType};
use serde::Deserialize;
use tracing::debug;

use crate::core::{Result, SketchScoreError};

/// Checkpoint the original experiments were run against.
pub const DEFAULT_MODEL_ID: &str = "google/vit-base-patch16-224-in21k";

/// ViT architecture parameters, deserialized from the checkpoint's
/// `config.json`. Defaults match ViT-Base/16 at 224x224.
#[derive(Debug, Clone, Deserialize)]
pub struct VitConfig {
    #[serde(default = "default_hidden_size")]
    pub hidden_size: usize,
    #[serde(default = "default_num_hidden_layers")]
    pub num_hidden_layers: usize,
    #[serde(default = "default_num_attention_heads")]
    pub num_attention_heads: usize,
    #[serde(default = "default_intermediate_size")]
    pub intermediate_size: usize,
    #[serde(default = "default_image_size")]
    pub image_size: usize,
    #[serde(default = "default_patch_size")]
    pub patch_size: usize,
    #[serde(default = "default_layer_norm_eps")]
    pub layer_norm_eps: f64,
}

fn default_hidden_size() -> usize {
    768
}
fn default_num_hidden_layers() -> usize {
    12
}
fn default_num_attention_heads() -> usize {
    12
}
fn default_intermediate_size() -> usize {
    3072
}
fn default_image_size() -> usize {
    224
}
fn default_patch_size() -> usize {
    16
}
fn default_layer_norm_eps() -> f64 {
    1e-12
}

impl Default for VitConfig {
    fn default() -> Self {
        Self {
            hidden_size: default_hidden_size(),
            num_hidden_layers: default_num_hidden_layers(),
            num_attention_heads: default_num_attention_heads(),
            intermediate_size: default_intermediate_size(),
            image_size: default_image_size(),
            patch_size: default_patch_size(),
            layer_norm_eps: default_layer_norm_eps(),
        }
    }
}

impl VitConfig {
    /// Number of image patches per side.
    pub fn patches_per_side(&self) -> usize {
        self.image_size / self.patch_size
    }

    /// Sequence length including the CLS token.
    pub fn num_positions(&self) -> usize {
        self.patches_per_side().pow(2) + 1
    }

    /// Load configuration for a local path or hub model id.
    pub fn from_pretrained(model_id: &str) -> Result<Self> {
        let files = resolve_model_files(model_id)?;
        Self::from_file(&files.config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SketchScoreError::io("read config", path, e))?;
        serde_json::from_str(&raw).map_err(|e| SketchScoreError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Which serialization the resolved weight file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightsFormat {
    SafeTensors,
    PyTorch,
}

/// Resolved on-disk locations for a checkpoint.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub weights: PathBuf,
    pub format: WeightsFormat,
}

/// Resolve `config.json` and a weight file, locally or via the hub.
pub fn resolve_model_files(model_id: &str) -> Result<ModelFiles> {
    let local = Path::new(model_id);
    if local.is_dir() {
        let config = local.join("config.json");
        let safetensors = local.join("model.safetensors");
        let (weights, format) = if safetensors.exists() {
            (safetensors, WeightsFormat::SafeTensors)
        } else {
            (local.join("pytorch_model.bin"), WeightsFormat::PyTorch)
        };
        debug!(config = %config.display(), weights = %weights.display(), "using local checkpoint");
        return Ok(ModelFiles {
            config,
            weights,
            format,
        });
    }

    let api = Api::new().map_err(|e| SketchScoreError::model("create hub api", e))?;
    let repo = api.repo(Repo::with_revision(
        model_id.to_string(),
        RepoType::Model,
        "main".to_string(),
    ));

    let config = repo
        .get("config.json")
        .map_err(|e| SketchScoreError::model("download config.json", e))?;

    let (weights, format) = match repo.get("model.safetensors") {
        Ok(path) => (path, WeightsFormat::SafeTensors),
        Err(_) => {
            debug!(model_id, "model.safetensors not available, falling back to pytorch_model.bin");
            let path = repo
                .get("pytorch_model.bin")
                .map_err(|e| SketchScoreError::model("download weights", e))?;
            (path, WeightsFormat::PyTorch)
        }
    };

    Ok(ModelFiles {
        config,
        weights,
        format,
    })
}
