//! HTML rendering of a comparison table.
//!
//! The report pairs every score with the image it was computed from, so
//! each drawing gets two table rows: scores on top, thumbnails below.

use std::fs;
use std::path::Path;

use crate::core::{Result, SketchScoreError};
use crate::pipeline::ComparisonTable;

const THUMB_WIDTH: u32 = 160;

/// Render a standalone HTML page for the table.
pub fn render_html(table: &ComparisonTable, title: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str("<style>\n");
    html.push_str("table { border-collapse: collapse; }\n");
    html.push_str("td, th { border: 1px solid #999; padding: 6px 10px; text-align: center; }\n");
    html.push_str("th { background: #eee; }\n");
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(title)));
    html.push_str("<table>\n<tr><th>drawing</th>");
    for column in &table.columns {
        html.push_str(&format!("<th>{}</th>", escape(column)));
    }
    html.push_str("</tr>\n");

    for row in &table.rows {
        html.push_str(&format!("<tr><td>{}</td>", escape(&row.drawing)));
        for cell in &row.cells {
            match cell.score {
                Some(score) => html.push_str(&format!("<td>{score:.4}</td>")),
                None => html.push_str("<td>N/A</td>"),
            }
        }
        html.push_str("</tr>\n");

        html.push_str(&format!(
            "<tr><td><img src=\"{}\" width=\"{THUMB_WIDTH}\"></td>",
            escape(&row.reference_image.display().to_string())
        ));
        for cell in &row.cells {
            match &cell.image {
                Some(image) => html.push_str(&format!(
                    "<td><img src=\"{}\" width=\"{THUMB_WIDTH}\"></td>",
                    escape(&image.display().to_string())
                )),
                None => html.push_str("<td></td>"),
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

/// Render and write the report, creating parent directories as needed.
pub fn write_html(path: &Path, table: &ComparisonTable, title: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| SketchScoreError::io("create report dir", parent, e))?;
    }
    fs::write(path, render_html(table, title))
        .map_err(|e| SketchScoreError::io("write report", path, e))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
