pub mod align;
pub mod gene_usage;
pub mod kmer;
pub mod relatedness;
pub mod search;
pub mod top_clones;

pub use gene_usage::GeneSegment;
pub use top_clones::top_clones;

use std::collections::HashMap;

use crate::table::RecordTable;

/// Row indices grouped by `repertoire_id`, repertoires in first-seen order,
/// rows in table order. Rows with a null repertoire id are ignored.
pub(crate) fn rows_by_repertoire(table: &RecordTable) -> Vec<(String, Vec<usize>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    if let Some(ids) = table.str_column("repertoire_id") {
        for (row, id) in ids.iter().enumerate() {
            if let Some(id) = id {
                if !groups.contains_key(id) {
                    order.push(id.clone());
                }
                groups.entry(id.clone()).or_default().push(row);
            }
        }
    }
    order
        .into_iter()
        .map(|id| {
            let rows = groups.remove(&id).unwrap_or_default();
            (id, rows)
        })
        .collect()
}
