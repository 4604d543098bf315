//! Unit tests for checkpoint configuration handling.

use super::config::*;
use rstest::*;
use tempfile::tempdir;

#[rstest]
fn test_default_config_matches_vit_base() {
    let cfg = VitConfig::default();
    assert_eq!(cfg.hidden_size, 768);
    assert_eq!(cfg.num_hidden_layers, 12);
    assert_eq!(cfg.num_attention_heads, 12);
    assert_eq!(cfg.intermediate_size, 3072);
    assert_eq!(cfg.image_size, 224);
    assert_eq!(cfg.patch_size, 16);
    assert_eq!(cfg.layer_norm_eps, 1e-12);
}

#[rstest]
fn test_position_count_includes_cls() {
    let cfg = VitConfig::default();
    assert_eq!(cfg.patches_per_side(), 14);
    assert_eq!(cfg.num_positions(), 197);
}

#[rstest]
fn test_config_deserializes_with_missing_fields() {
    let cfg: VitConfig = serde_json::from_str(r#"{"hidden_size": 384}"#).unwrap();
    assert_eq!(cfg.hidden_size, 384);
    assert_eq!(cfg.num_hidden_layers, 12);
}

#[rstest]
fn test_config_ignores_unknown_fields() {
    // HF configs carry fields we never read (model_type, id2label, ...).
    let cfg: VitConfig =
        serde_json::from_str(r#"{"model_type": "vit", "hidden_size": 768, "qkv_bias": true}"#)
            .unwrap();
    assert_eq!(cfg.hidden_size, 768);
}

#[rstest]
fn test_from_file_reads_local_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"num_hidden_layers": 6}"#).unwrap();
    let cfg = VitConfig::from_file(&path).unwrap();
    assert_eq!(cfg.num_hidden_layers, 6);
}

#[rstest]
fn test_resolve_local_prefers_safetensors() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "{}").unwrap();
    std::fs::write(dir.path().join("model.safetensors"), b"").unwrap();
    std::fs::write(dir.path().join("pytorch_model.bin"), b"").unwrap();

    let files = resolve_model_files(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(files.format, WeightsFormat::SafeTensors);
    assert!(files.weights.ends_with("model.safetensors"));
}

#[rstest]
fn test_resolve_local_falls_back_to_pytorch() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "{}").unwrap();
    std::fs::write(dir.path().join("pytorch_model.bin"), b"").unwrap();

    let files = resolve_model_files(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(files.format, WeightsFormat::PyTorch);
}
