//! Unit tests for console table rendering.

use super::table::*;
use crate::pipeline::{Cell, ComparisonRow, ComparisonTable};
use rstest::*;
use std::path::PathBuf;

fn sample_table() -> ComparisonTable {
    ComparisonTable {
        columns: vec!["enzo".to_string(), "marcelo".to_string()],
        rows: vec![
            ComparisonRow {
                drawing: "estrela".to_string(),
                reference_image: PathBuf::from("canny_estrela.png"),
                cells: vec![
                    Cell {
                        score: Some(0.812_34),
                        image: None,
                    },
                    Cell {
                        score: None,
                        image: None,
                    },
                ],
            },
            ComparisonRow {
                drawing: "mack".to_string(),
                reference_image: PathBuf::from("canny_mack.png"),
                cells: vec![
                    Cell {
                        score: Some(0.5),
                        image: None,
                    },
                    Cell {
                        score: Some(0.25),
                        image: None,
                    },
                ],
            },
        ],
    }
}

#[rstest]
fn test_header_and_rows_present() {
    let out = render_console(&sample_table());
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].contains("drawing"));
    assert!(lines[0].contains("enzo"));
    assert!(lines[0].contains("marcelo"));
    // Header, rule, two data rows.
    assert_eq!(lines.len(), 4);
}

#[rstest]
fn test_scores_have_four_decimals() {
    let out = render_console(&sample_table());
    assert!(out.contains("0.8123"));
    assert!(out.contains("0.5000"));
    assert!(out.contains("0.2500"));
}

#[rstest]
fn test_missing_score_renders_as_na() {
    let out = render_console(&sample_table());
    assert!(out.contains("N/A"));
}

#[rstest]
fn test_columns_are_aligned() {
    let out = render_console(&sample_table());
    let lines: Vec<&str> = out.lines().collect();
    let header_pos = lines[0].find("enzo").unwrap();
    let row_pos = lines[2].find("0.8123").unwrap();
    assert_eq!(header_pos, row_pos);
}

#[rstest]
fn test_empty_table() {
    let table = ComparisonTable {
        columns: vec![],
        rows: vec![],
    };
    let out = render_console(&table);
    assert!(out.contains("drawing"));
}
