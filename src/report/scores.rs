//! Plain-text score files: one float per line.
//!
//! This is the interchange format between the sweep runs and the
//! statistical analysis, so it stays deliberately dumb.

use std::fs;
use std::path::Path;

use crate::core::{Result, SketchScoreError};

/// Write scores one per line, creating parent directories as needed.
pub fn write_scores(path: &Path, scores: &[f32]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| SketchScoreError::io("create score dir", parent, e))?;
    }

    let body = scores
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(path, body).map_err(|e| SketchScoreError::io("write scores", path, e))
}

/// Read a score file, ignoring blank lines. A non-numeric line is an
/// error rather than a silently dropped sample.
pub fn read_scores(path: &Path) -> Result<Vec<f64>> {
    let raw =
        fs::read_to_string(path).map_err(|e| SketchScoreError::io("read scores", path, e))?;

    let mut scores = Vec::new();
    for (line_number, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: f64 = trimmed.parse().map_err(|_| SketchScoreError::ScoreFile {
            path: path.to_path_buf(),
            message: format!("line {}: not a number: {trimmed:?}", line_number + 1),
        })?;
        scores.push(value);
    }
    Ok(scores)
}
