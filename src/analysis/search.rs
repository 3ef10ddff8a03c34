use anyhow::{bail, Result};
use bio::alignment::distance::levenshtein;

use crate::table::RecordTable;

/// Which sequence representation a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSpace {
    Nucleotide,
    AminoAcid,
}

impl SearchSpace {
    pub fn column(&self) -> &'static str {
        match self {
            SearchSpace::Nucleotide => "junction",
            SearchSpace::AminoAcid => "junction_aa",
        }
    }
}

/// All rows whose junction is within `max_distance` edits of the query.
/// `max_distance` zero is an exact search. Rows with a null junction never
/// match.
pub fn search_sequences(
    table: &RecordTable,
    query: &str,
    max_distance: u32,
    space: SearchSpace,
) -> Result<RecordTable> {
    if query.is_empty() {
        bail!("search query must not be empty");
    }
    let values = match table.str_column(space.column()) {
        Some(v) => v,
        None => bail!("table has no {} column; run ingestion first", space.column()),
    };

    let hits: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| match v {
            Some(v) => levenshtein(query.as_bytes(), v.as_bytes()) <= max_distance,
            None => false,
        })
        .map(|(row, _)| row)
        .collect();
    Ok(table.take_rows(&hits))
}
