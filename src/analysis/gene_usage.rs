use std::collections::HashMap;
use std::str::FromStr;

use anyhow::{bail, Result};
use itertools::Itertools;
use serde::Serialize;

use crate::ingest::derive::UNRECOGNIZED;
use crate::table::RecordTable;

use super::rows_by_repertoire;

/// Which gene segment family column to summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneSegment {
    V,
    D,
    J,
}

impl GeneSegment {
    pub fn family_column(&self) -> &'static str {
        match self {
            GeneSegment::V => "v_family",
            GeneSegment::D => "d_family",
            GeneSegment::J => "j_family",
        }
    }
}

impl FromStr for GeneSegment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<GeneSegment> {
        match s.to_ascii_lowercase().as_str() {
            "v" => Ok(GeneSegment::V),
            "d" => Ok(GeneSegment::D),
            "j" => Ok(GeneSegment::J),
            other => bail!("unknown gene segment {:?}, expected v, d or j", other),
        }
    }
}

/// How usage is weighted: by template counts, or one per clonotype row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageWeighting {
    DuplicateCount,
    UniqueClonotypes,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeneUsageRow {
    pub repertoire_id: String,
    pub family: String,
    pub frequency: f64,
}

/// Family usage frequencies per repertoire; frequencies within one
/// repertoire sum to 1. Output is sorted by repertoire (first-seen order)
/// then descending frequency, families alphabetical on ties.
pub fn gene_usage(
    table: &RecordTable,
    segment: GeneSegment,
    weighting: UsageWeighting,
) -> Result<Vec<GeneUsageRow>> {
    let families = match table.str_column(segment.family_column()) {
        Some(f) => f,
        None => bail!(
            "table has no {} column; run ingestion first",
            segment.family_column()
        ),
    };
    let counts = table.int_column("duplicate_count");

    let mut out: Vec<GeneUsageRow> = Vec::new();
    for (repertoire_id, rows) in rows_by_repertoire(table) {
        let mut usage: HashMap<&str, f64> = HashMap::new();
        let mut total = 0.0;
        for row in rows {
            let family = families[row].as_deref().unwrap_or(UNRECOGNIZED);
            let weight = match weighting {
                UsageWeighting::DuplicateCount => {
                    counts.and_then(|c| c[row]).unwrap_or(0) as f64
                }
                UsageWeighting::UniqueClonotypes => 1.0,
            };
            *usage.entry(family).or_insert(0.0) += weight;
            total += weight;
        }
        if total == 0.0 {
            continue;
        }
        let sorted = usage
            .into_iter()
            .sorted_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then(a.0.cmp(b.0)));
        for (family, weight) in sorted {
            out.push(GeneUsageRow {
                repertoire_id: repertoire_id.clone(),
                family: family.to_string(),
                frequency: weight / total,
            });
        }
    }
    Ok(out)
}
