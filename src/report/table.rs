//! Console rendering of a comparison table.

use crate::pipeline::ComparisonTable;

const MISSING: &str = "N/A";

/// Render the table as an aligned text grid with one row per drawing
/// and one column per player. Scores are printed with four decimals.
pub fn render_console(table: &ComparisonTable) -> String {
    let mut header = vec!["drawing".to_string()];
    header.extend(table.columns.iter().cloned());

    let mut grid = vec![header];
    for row in &table.rows {
        let mut line = vec![row.drawing.clone()];
        for cell in &row.cells {
            line.push(match cell.score {
                Some(score) => format!("{score:.4}"),
                None => MISSING.to_string(),
            });
        }
        grid.push(line);
    }

    let columns = grid.iter().map(|row| row.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in &grid {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    for (index, row) in grid.iter().enumerate() {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{cell:<width$}", width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
        if index == 0 {
            let rule = widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str(&rule);
            out.push('\n');
        }
    }
    out
}
