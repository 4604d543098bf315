//! ViT encoder built from candle-nn primitives.
//!
//! Mirrors the HuggingFace `ViTModel` forward pass for
//! `google/vit-base-patch16-224-in21k`: patch projection, CLS token,
//! learned position embeddings, 12 pre-LayerNorm transformer layers with
//! erf-GELU MLPs, a final layer norm, and CLS-token extraction as the
//! image fingerprint. No pooler and no L2 normalization — callers get the
//! raw `last_hidden_state[:, 0, :]`.

use candle_core::{DType, Device, IndexOp, Module, Tensor};
use candle_nn::{layer_norm, linear, LayerNorm, Linear, VarBuilder};
use tracing::{debug, info};

use crate::core::{Result, SketchScoreError};
use crate::embed::config::{resolve_model_files, VitConfig, WeightsFormat};

pub struct VitEncoder {
    config: VitConfig,
    patch_embedding: Linear,
    cls_token: Tensor,
    position_embeddings: Tensor,
    layers: Vec<VitLayer>,
    final_layer_norm: LayerNorm,
}

impl VitEncoder {
    /// Load encoder weights for a local path or hub model id.
    pub fn from_pretrained(model_id: &str, device: &Device) -> Result<Self> {
        let files = resolve_model_files(model_id)?;
        let config = VitConfig::from_file(&files.config)?;

        info!(weights = %files.weights.display(), "loading ViT weights");
        let vb = match files.format {
            WeightsFormat::SafeTensors => unsafe {
                VarBuilder::from_mmaped_safetensors(&[files.weights.clone()], DType::F32, device)?
            },
            WeightsFormat::PyTorch => VarBuilder::from_pth(&files.weights, DType::F32, device)?,
        };

        // `ViTModel` checkpoints store weights at the root;
        // `ViTForImageClassification` exports nest them under "vit.".
        let vb = if vb.contains_tensor("embeddings.cls_token") {
            vb
        } else {
            debug!("root-level embeddings not found, applying vit. prefix");
            vb.pp("vit")
        };

        Self::load_with_weights(config, vb)
    }

    fn load_with_weights(config: VitConfig, vb: VarBuilder) -> Result<Self> {
        // The patch projection ships as a Conv2d weight
        // [hidden, 3, patch, patch]; flattening the kernel turns it into a
        // Linear over flattened patches, which is how patches are extracted
        // in `embed_patches`.
        let conv_weight = vb.get(
            (config.hidden_size, 3, config.patch_size, config.patch_size),
            "embeddings.patch_embeddings.projection.weight",
        )?;
        let patch_dim = 3 * config.patch_size * config.patch_size;
        let patch_weight = conv_weight.reshape((config.hidden_size, patch_dim))?;
        let patch_bias = vb.get(
            (config.hidden_size,),
            "embeddings.patch_embeddings.projection.bias",
        )?;
        let patch_embedding = Linear::new(patch_weight, Some(patch_bias));

        let cls_token = vb.get((1, 1, config.hidden_size), "embeddings.cls_token")?;
        let position_embeddings = vb.get(
            (1, config.num_positions(), config.hidden_size),
            "embeddings.position_embeddings",
        )?;

        let mut layers = Vec::with_capacity(config.num_hidden_layers);
        for i in 0..config.num_hidden_layers {
            layers.push(VitLayer::new(
                &config,
                vb.pp(format!("encoder.layer.{i}")),
            )?);
        }

        let final_layer_norm =
            layer_norm(config.hidden_size, config.layer_norm_eps, vb.pp("layernorm"))?;

        Ok(Self {
            config,
            patch_embedding,
            cls_token,
            position_embeddings,
            layers,
            final_layer_norm,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.config.hidden_size
    }

    pub fn config(&self) -> &VitConfig {
        &self.config
    }

    /// Cut the image into patches and project each to the hidden size.
    fn embed_patches(&self, pixel_values: &Tensor) -> Result<Tensor> {
        let (batch, channels, height, width) = pixel_values.dims4()?;
        let patch = self.config.patch_size;
        if height % patch != 0 || width % patch != 0 {
            return Err(SketchScoreError::model(
                "patch embedding",
                format!("input {height}x{width} is not divisible by patch size {patch}"),
            ));
        }
        let rows = height / patch;
        let cols = width / patch;

        // [b, c, h, w] -> [b, rows*cols, c*patch*patch]
        let patches = pixel_values
            .reshape((batch, channels, rows, patch, cols, patch))?
            .permute((0, 2, 4, 1, 3, 5))?
            .reshape((batch, rows * cols, channels * patch * patch))?;

        Ok(self.patch_embedding.forward(&patches)?)
    }

    /// Forward pass: returns the CLS-token hidden state, `[batch, hidden]`.
    pub fn forward(&self, pixel_values: &Tensor) -> Result<Tensor> {
        let patch_embeddings = self.embed_patches(pixel_values)?;

        let batch = patch_embeddings.dim(0)?;
        let cls = self
            .cls_token
            .expand((batch, 1, self.config.hidden_size))?;
        let embeddings = Tensor::cat(&[&cls, &patch_embeddings], 1)?;
        let mut hidden = embeddings.broadcast_add(&self.position_embeddings)?;

        for layer in &self.layers {
            hidden = layer.forward(&hidden)?;
        }

        let hidden = self.final_layer_norm.forward(&hidden)?;
        Ok(hidden.i((.., 0, ..))?)
    }
}

/// One transformer block, pre-LayerNorm as in HF `ViTLayer`.
struct VitLayer {
    attention: VitSelfAttention,
    layernorm_before: LayerNorm,
    layernorm_after: LayerNorm,
    intermediate: Linear,
    output: Linear,
}

impl VitLayer {
    fn new(config: &VitConfig, vb: VarBuilder) -> Result<Self> {
        let attention = VitSelfAttention::new(config, vb.pp("attention"))?;
        let layernorm_before = layer_norm(
            config.hidden_size,
            config.layer_norm_eps,
            vb.pp("layernorm_before"),
        )?;
        let layernorm_after = layer_norm(
            config.hidden_size,
            config.layer_norm_eps,
            vb.pp("layernorm_after"),
        )?;
        let intermediate = linear(
            config.hidden_size,
            config.intermediate_size,
            vb.pp("intermediate.dense"),
        )?;
        let output = linear(
            config.intermediate_size,
            config.hidden_size,
            vb.pp("output.dense"),
        )?;

        Ok(Self {
            attention,
            layernorm_before,
            layernorm_after,
            intermediate,
            output,
        })
    }

    fn forward(&self, hidden_states: &Tensor) -> Result<Tensor> {
        let normed = self.layernorm_before.forward(hidden_states)?;
        let attn = self.attention.forward(&normed)?;
        let hidden_states = (attn + hidden_states)?;

        let normed = self.layernorm_after.forward(&hidden_states)?;
        let mlp = self.intermediate.forward(&normed)?.gelu_erf()?;
        let mlp = self.output.forward(&mlp)?;
        Ok((mlp + hidden_states)?)
    }
}

/// Multi-head self-attention with HF's query/key/value/output naming.
struct VitSelfAttention {
    query: Linear,
    key: Linear,
    value: Linear,
    output: Linear,
    num_heads: usize,
    head_dim: usize,
}

impl VitSelfAttention {
    fn new(config: &VitConfig, vb: VarBuilder) -> Result<Self> {
        let hidden = config.hidden_size;
        let query = linear(hidden, hidden, vb.pp("attention.query"))?;
        let key = linear(hidden, hidden, vb.pp("attention.key"))?;
        let value = linear(hidden, hidden, vb.pp("attention.value"))?;
        let output = linear(hidden, hidden, vb.pp("output.dense"))?;

        Ok(Self {
            query,
            key,
            value,
            output,
            num_heads: config.num_attention_heads,
            head_dim: hidden / config.num_attention_heads,
        })
    }

    fn forward(&self, hidden_states: &Tensor) -> Result<Tensor> {
        let (batch, seq_len, hidden) = hidden_states.dims3()?;

        let q = self.query.forward(hidden_states)?;
        let k = self.key.forward(hidden_states)?;
        let v = self.value.forward(hidden_states)?;

        // [b, seq, hidden] -> [b, heads, seq, head_dim]
        let reshape = |t: Tensor| -> Result<Tensor> {
            Ok(t.reshape((batch, seq_len, self.num_heads, self.head_dim))?
                .permute((0, 2, 1, 3))?
                .contiguous()?)
        };
        let q = reshape(q)?;
        let k = reshape(k)?;
        let v = reshape(v)?;

        let scale = 1.0 / (self.head_dim as f64).sqrt();
        let scores = (q.matmul(&k.t()?)? * scale)?;
        let weights = candle_nn::ops::softmax_last_dim(&scores)?;
        let context = weights.matmul(&v)?;

        let context = context
            .permute((0, 2, 1, 3))?
            .contiguous()?
            .reshape((batch, seq_len, hidden))?;
        Ok(self.output.forward(&context)?)
    }
}
