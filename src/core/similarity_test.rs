//! Unit tests for cosine similarity and the embedding wrapper.

use super::similarity::*;
use crate::core::SketchScoreError;
use rstest::*;

#[rstest]
fn test_cosine_self_similarity_is_one() {
    let v = vec![0.3f32, -1.2, 4.5, 0.01, 2.0];
    let sim = cosine_similarity(&v, &v).unwrap();
    assert!((sim - 1.0).abs() < 1e-6, "self similarity was {}", sim);
}

#[rstest]
fn test_cosine_is_symmetric() {
    let a = vec![1.0f32, 2.0, 3.0, -4.0];
    let b = vec![-0.5f32, 0.25, 7.0, 1.5];
    let ab = cosine_similarity(&a, &b).unwrap();
    let ba = cosine_similarity(&b, &a).unwrap();
    assert_eq!(ab, ba);
}

#[rstest]
#[case(vec![0.0, 0.0, 0.0], vec![1.0, 2.0, 3.0])]
#[case(vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0])]
#[case(vec![0.0, 0.0], vec![0.0, 0.0])]
fn test_zero_norm_returns_exactly_zero(#[case] a: Vec<f32>, #[case] b: Vec<f32>) {
    let sim = cosine_similarity(&a, &b).unwrap();
    assert_eq!(sim, 0.0);
}

#[rstest]
fn test_opposite_vectors_are_negative_one() {
    let a = vec![1.0f32, 0.0, 2.0];
    let b = vec![-1.0f32, 0.0, -2.0];
    let sim = cosine_similarity(&a, &b).unwrap();
    assert!((sim + 1.0).abs() < 1e-6);
}

#[rstest]
fn test_orthogonal_vectors_are_zero() {
    let a = vec![1.0f32, 0.0];
    let b = vec![0.0f32, 1.0];
    let sim = cosine_similarity(&a, &b).unwrap();
    assert!(sim.abs() < 1e-6);
}

#[rstest]
fn test_dimension_mismatch_is_an_error() {
    let a = vec![1.0f32, 2.0];
    let b = vec![1.0f32, 2.0, 3.0];
    match cosine_similarity(&a, &b) {
        Err(SketchScoreError::DimensionMismatch { left, right }) => {
            assert_eq!((left, right), (2, 3));
        }
        other => panic!("expected DimensionMismatch, got {:?}", other),
    }
}

#[rstest]
fn test_similarity_is_scale_invariant() {
    let a = vec![0.2f32, 0.8, -0.4];
    let scaled: Vec<f32> = a.iter().map(|v| v * 37.5).collect();
    let b = vec![1.0f32, -0.3, 0.9];
    let s1 = cosine_similarity(&a, &b).unwrap();
    let s2 = cosine_similarity(&scaled, &b).unwrap();
    assert!((s1 - s2).abs() < 1e-6);
}

#[rstest]
fn test_embedding_wrapper() {
    let e = Embedding::new(vec![3.0, 4.0]);
    assert_eq!(e.dim(), 2);
    assert!((e.norm() - 5.0).abs() < 1e-6);
    let other = Embedding::new(vec![3.0, 4.0]);
    assert!((e.cosine(&other).unwrap() - 1.0).abs() < 1e-6);
}
