use anyhow::Result;
use bio::alignment::pairwise::Aligner;

use crate::table::RecordTable;

use super::search::SearchSpace;
use super::top_clones::top_clones;

const GAP_OPEN: i32 = -5;
const GAP_EXTEND: i32 = -1;

#[derive(Debug, Clone)]
pub struct AlignmentReport {
    pub repertoire_id: String,
    pub clone_id: String,
    pub score: i32,
    pub pretty: String,
}

/// Align each repertoire's `top_n` most abundant junctions globally against
/// a query sequence (Needleman-Wunsch, match +1 / mismatch -1). Rows with a
/// null junction are skipped.
pub fn align_top_clones(
    table: &RecordTable,
    query: &str,
    top_n: usize,
    space: SearchSpace,
) -> Result<Vec<AlignmentReport>> {
    let top = top_clones(table, top_n)?;
    let junctions = top.str_column(space.column());

    let score = |a: u8, b: u8| if a == b { 1i32 } else { -1i32 };
    let mut aligner = Aligner::new(GAP_OPEN, GAP_EXTEND, &score);

    let mut reports = Vec::new();
    for row in 0..top.n_rows() {
        let junction = match junctions.and_then(|v| v[row].as_deref()) {
            Some(j) => j,
            None => continue,
        };
        let alignment = aligner.global(query.as_bytes(), junction.as_bytes());
        reports.push(AlignmentReport {
            repertoire_id: top.str_cell("repertoire_id", row).unwrap_or("").to_string(),
            clone_id: top.str_cell("clone_id", row).unwrap_or("").to_string(),
            score: alignment.score,
            pretty: alignment.pretty(query.as_bytes(), junction.as_bytes(), 80),
        });
    }
    Ok(reports)
}
