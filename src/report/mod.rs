//! Output surfaces: score files, console tables, HTML reports with
//! embedded images, and PNG plots of score distributions.

pub mod html;
pub mod plot;
pub mod scores;
pub mod table;

pub use html::{render_html, write_html};
pub use plot::{histogram, render_box_plots, render_histograms, Histogram};
pub use scores::{read_scores, write_scores};
pub use table::render_console;

#[cfg(test)]
mod scores_test;
#[cfg(test)]
mod table_test;
