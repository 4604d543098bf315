//! Unit tests for score file IO.

use super::scores::*;
use crate::core::SketchScoreError;
use rstest::*;
use std::fs;
use tempfile::TempDir;

#[rstest]
fn test_write_then_read_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores_enzo.txt");

    write_scores(&path, &[0.5, 0.25, -0.125]).unwrap();
    let scores = read_scores(&path).unwrap();

    assert_eq!(scores, vec![0.5, 0.25, -0.125]);
}

#[rstest]
fn test_write_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transformation_results").join("scores.txt");

    write_scores(&path, &[0.75]).unwrap();
    assert!(path.exists());
}

#[rstest]
fn test_one_value_per_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.txt");

    write_scores(&path, &[0.5, 0.25]).unwrap();
    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(raw.lines().count(), 2);
}

#[rstest]
fn test_read_skips_blank_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.txt");
    fs::write(&path, "0.5\n\n  \n0.25\n").unwrap();

    assert_eq!(read_scores(&path).unwrap(), vec![0.5, 0.25]);
}

#[rstest]
fn test_read_rejects_garbage_with_line_number() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.txt");
    fs::write(&path, "0.5\nnot-a-score\n").unwrap();

    match read_scores(&path) {
        Err(SketchScoreError::ScoreFile { message, .. }) => {
            assert!(message.contains("line 2"), "message: {message}");
        }
        other => panic!("expected ScoreFile error, got {:?}", other),
    }
}

#[rstest]
fn test_read_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    match read_scores(&dir.path().join("absent.txt")) {
        Err(SketchScoreError::Io { .. }) => {}
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[rstest]
fn test_empty_score_list() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.txt");

    write_scores(&path, &[]).unwrap();
    assert!(read_scores(&path).unwrap().is_empty());
}
