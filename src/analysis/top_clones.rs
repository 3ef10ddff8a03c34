use anyhow::{bail, Result};

use crate::table::RecordTable;

use super::rows_by_repertoire;

/// The `n` most abundant clones of every repertoire, by descending
/// `duplicate_frequency`. Ties and rows without a frequency keep their file
/// order (the sort is stable, nulls sink to the end).
pub fn top_clones(table: &RecordTable, n: usize) -> Result<RecordTable> {
    let frequency = match table.float_column("duplicate_frequency") {
        Some(f) => f,
        None => bail!("table has no duplicate_frequency column; run ingestion first"),
    };

    let mut picked: Vec<usize> = Vec::new();
    for (_, mut rows) in rows_by_repertoire(table) {
        rows.sort_by(|&a, &b| {
            let fa = frequency[a].unwrap_or(f64::NEG_INFINITY);
            let fb = frequency[b].unwrap_or(f64::NEG_INFINITY);
            fb.partial_cmp(&fa).expect("frequencies are finite")
        });
        picked.extend(rows.into_iter().take(n));
    }
    Ok(table.take_rows(&picked))
}
