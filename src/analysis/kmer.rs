use std::collections::HashMap;

use anyhow::{bail, Result};
use itertools::Itertools;
use serde::Serialize;

use crate::table::RecordTable;

use super::rows_by_repertoire;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KmerRow {
    pub repertoire_id: String,
    pub kmer: String,
    pub count: u64,
}

/// Count nucleotide k-mers over `junction` per repertoire. When `weighted`,
/// every occurrence counts `duplicate_count` times (rows without a count
/// weigh 1); otherwise once per clonotype row. Junctions shorter than `k`
/// contribute nothing.
pub fn count_kmers(table: &RecordTable, k: usize, weighted: bool) -> Result<Vec<KmerRow>> {
    if k == 0 {
        bail!("k-mer size must be at least 1");
    }
    let junctions = match table.str_column("junction") {
        Some(j) => j,
        None => bail!("table has no junction column; run ingestion first"),
    };
    let counts = table.int_column("duplicate_count");

    let mut out: Vec<KmerRow> = Vec::new();
    for (repertoire_id, rows) in rows_by_repertoire(table) {
        let mut tally: HashMap<String, u64> = HashMap::new();
        for row in rows {
            let junction = match &junctions[row] {
                Some(j) => j,
                None => continue,
            };
            let weight = if weighted {
                counts.and_then(|c| c[row]).map(|c| c.max(0) as u64).unwrap_or(1)
            } else {
                1
            };
            let bytes = junction.as_bytes();
            if bytes.len() < k {
                continue;
            }
            for window in bytes.windows(k) {
                let kmer = String::from_utf8_lossy(window).to_string();
                *tally.entry(kmer).or_insert(0) += weight;
            }
        }
        for (kmer, count) in tally
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
        {
            out.push(KmerRow {
                repertoire_id: repertoire_id.clone(),
                kmer,
                count,
            });
        }
    }
    Ok(out)
}
