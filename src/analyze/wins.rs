//! Per-drawing win tallies over a comparison table.

use std::collections::BTreeMap;

use crate::pipeline::ComparisonTable;

/// Win counts per column (player), plus how many drawings were decided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinTally {
    pub wins: BTreeMap<String, u32>,
    pub drawings_scored: u32,
}

impl WinTally {
    /// Columns ordered by win count descending, then name.
    pub fn ranking(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self
            .wins
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        ranked
    }
}

/// Tally wins: for each row, every column holding the maximum score gets
/// a win. Ties credit all tied columns. Rows with no scores at all are
/// not counted.
pub fn tally_wins(table: &ComparisonTable) -> WinTally {
    let mut tally = WinTally::default();
    for column in &table.columns {
        tally.wins.insert(column.clone(), 0);
    }

    for row in &table.rows {
        let best = row
            .cells
            .iter()
            .filter_map(|cell| cell.score)
            .fold(f32::NEG_INFINITY, f32::max);
        if best == f32::NEG_INFINITY {
            continue;
        }
        tally.drawings_scored += 1;

        for (column, cell) in table.columns.iter().zip(&row.cells) {
            if cell.score == Some(best) {
                *tally.wins.entry(column.clone()).or_insert(0) += 1;
            }
        }
    }

    tally
}
