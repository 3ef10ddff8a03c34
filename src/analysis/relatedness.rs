use std::collections::HashMap;

use anyhow::{bail, Result};
use bio::alignment::distance::levenshtein;
use serde::Serialize;

use crate::table::RecordTable;

use super::rows_by_repertoire;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RelatednessRow {
    pub repertoire_id: String,
    pub n_clonotypes: usize,
    pub related_fraction: f64,
}

/// Clonal relatedness per repertoire: the fraction of distinct junctions
/// within `max_distance` edits of the repertoire's most abundant junction.
/// The top junction itself counts (distance zero), so a repertoire with a
/// single clonotype scores 1.0.
pub fn clonal_relatedness(table: &RecordTable, max_distance: u32) -> Result<Vec<RelatednessRow>> {
    let junctions = match table.str_column("junction") {
        Some(j) => j,
        None => bail!("table has no junction column; run ingestion first"),
    };
    let counts = table.int_column("duplicate_count");

    let mut out: Vec<RelatednessRow> = Vec::new();
    for (repertoire_id, rows) in rows_by_repertoire(table) {
        // total template count per distinct junction, first-seen order kept
        let mut order: Vec<&str> = Vec::new();
        let mut totals: HashMap<&str, i64> = HashMap::new();
        for row in rows {
            let junction = match &junctions[row] {
                Some(j) => j.as_str(),
                None => continue,
            };
            let count = counts.and_then(|c| c[row]).unwrap_or(0);
            if !totals.contains_key(junction) {
                order.push(junction);
            }
            *totals.entry(junction).or_insert(0) += count;
        }
        if order.is_empty() {
            continue;
        }
        // strictly-greater comparison keeps the first-seen junction on ties
        let mut top = order[0];
        for junction in &order[1..] {
            if totals[junction] > totals[top] {
                top = junction;
            }
        }
        let related = order
            .iter()
            .filter(|j| levenshtein(top.as_bytes(), j.as_bytes()) <= max_distance)
            .count();
        out.push(RelatednessRow {
            repertoire_id,
            n_clonotypes: order.len(),
            related_fraction: related as f64 / order.len() as f64,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn strcol(vals: &[&str]) -> Column {
        Column::Str(vals.iter().map(|s| Some(s.to_string())).collect())
    }

    #[test]
    fn fraction_counts_junctions_near_the_top_clone() {
        let mut t = RecordTable::new();
        t.set_column("repertoire_id", Column::Str(vec![Some("s1".to_string()); 4]))
            .unwrap();
        t.set_column("junction", strcol(&["GTCAAA", "GTCAAT", "TTTTTT", "GTCAAA"]))
            .unwrap();
        t.set_column(
            "duplicate_count",
            Column::Int(vec![Some(50), Some(5), Some(2), Some(43)]),
        )
        .unwrap();

        let rows = clonal_relatedness(&t, 1).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].n_clonotypes, 3);
        // top junction GTCAAA (93 templates); GTCAAT is one edit away
        assert!((rows[0].related_fraction - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn single_clonotype_scores_one() {
        let mut t = RecordTable::new();
        t.set_column("repertoire_id", Column::Str(vec![Some("s1".to_string())]))
            .unwrap();
        t.set_column("junction", strcol(&["GTCAAA"])).unwrap();
        t.set_column("duplicate_count", Column::Int(vec![Some(1)])).unwrap();
        let rows = clonal_relatedness(&t, 0).unwrap();
        assert!((rows[0].related_fraction - 1.0).abs() < 1e-9);
    }
}
