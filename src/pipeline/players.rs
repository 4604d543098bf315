//! Filesystem conventions: `players/<name>/<drawing>.<ext>` for hand
//! drawings and `fotos_canny/canny_<drawing>.<ext>` for references.
//! Identity lives in the directory structure, nowhere else.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{Result, SketchScoreError};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tiff"];

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Sorted player names: every subdirectory of `players_dir`.
pub fn list_players(players_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(players_dir)
        .map_err(|e| SketchScoreError::io("read players dir", players_dir, e))?;

    let mut players: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    players.sort();

    if players.is_empty() {
        return Err(SketchScoreError::NoPlayers(players_dir.to_path_buf()));
    }
    Ok(players)
}

/// Sorted drawing file names (not paths) inside one player's directory.
pub fn list_drawings(player_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(player_dir)
        .map_err(|e| SketchScoreError::io("read player dir", player_dir, e))?;

    let mut drawings: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file() && has_image_extension(&entry.path()))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    drawings.sort();

    if drawings.is_empty() {
        return Err(SketchScoreError::NoDrawings(player_dir.to_path_buf()));
    }
    Ok(drawings)
}

/// Find `canny_<stem>.<any extension>` under `canny_dir`.
///
/// The reference may have been exported with a different extension than
/// the drawing, so matching is on the stem alone. Candidates are sorted
/// so the result is deterministic when several extensions exist.
pub fn find_canny_reference(canny_dir: &Path, stem: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(canny_dir).ok()?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_image_extension(path))
        .filter(|path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s == format!("canny_{stem}"))
                .unwrap_or(false)
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}
